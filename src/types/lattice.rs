use std::{collections::HashMap, fmt::Display};

use lazy_static::lazy_static;

use super::value::Value;

/// Largest code point a `Char` can hold.
const MAX_CODE_POINT: f64 = 0x10FFFF as f64;

/// A named node of the type lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Type {
    Any,
    Boolean,
    Char,
    Function,
    Integer,
    Iterable,
    List,
    Map,
    Maybe,
    Mutable,
    Negative,
    None,
    Number,
    Positive,
    Range,
    Tuple,
    Type,
    String,
    Unsigned,
    Zero,
}

/// How many type parameters a type takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Fixed(usize),
    Variadic,
}

lazy_static! {
    /// Every type by the name programs refer to it with, aliases included.
    pub static ref TYPE_LOOKUP: HashMap<&'static str, Type> = {
        let mut lookup = HashMap::new();
        for ty in Type::ALL {
            lookup.insert(ty.name(), ty);
        }
        lookup.insert("Int", Type::Integer);
        lookup
    };
}

impl Type {
    pub const ALL: [Type; 20] = [
        Type::Any,
        Type::Boolean,
        Type::Char,
        Type::Function,
        Type::Integer,
        Type::Iterable,
        Type::List,
        Type::Map,
        Type::Maybe,
        Type::Mutable,
        Type::Negative,
        Type::None,
        Type::Number,
        Type::Positive,
        Type::Range,
        Type::Tuple,
        Type::Type,
        Type::String,
        Type::Unsigned,
        Type::Zero,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Type::Any => "Any",
            Type::Boolean => "Boolean",
            Type::Char => "Char",
            Type::Function => "Function",
            Type::Integer => "Integer",
            Type::Iterable => "Iterable",
            Type::List => "List",
            Type::Map => "Map",
            Type::Maybe => "Maybe",
            Type::Mutable => "Mutable",
            Type::Negative => "Negative",
            Type::None => "None",
            Type::Number => "Number",
            Type::Positive => "Positive",
            Type::Range => "Range",
            Type::Tuple => "Tuple",
            Type::Type => "Type",
            Type::String => "String",
            Type::Unsigned => "Unsigned",
            Type::Zero => "Zero",
        }
    }

    pub fn from_name(name: &str) -> Option<Type> {
        TYPE_LOOKUP.get(name).copied()
    }

    pub fn arity(&self) -> Arity {
        match self {
            Type::Function
            | Type::List
            | Type::Maybe
            | Type::Mutable
            | Type::Range
            | Type::Iterable => Arity::Fixed(1),
            Type::Map => Arity::Fixed(2),
            Type::Tuple => Arity::Variadic,
            _ => Arity::Fixed(0),
        }
    }

    /// Direct refinements of this type.
    pub fn subtypes(&self) -> &'static [Type] {
        match self {
            Type::Any => &[
                Type::Boolean,
                Type::Function,
                Type::Iterable,
                Type::Maybe,
                Type::Mutable,
                Type::Number,
                Type::String,
                Type::Type,
            ],
            Type::Number => &[Type::Integer, Type::Negative, Type::Unsigned],
            Type::Integer => &[Type::Char],
            Type::String => &[Type::Char],
            Type::Iterable => &[Type::Map, Type::Range],
            Type::Map => &[Type::Tuple, Type::List],
            Type::Unsigned => &[Type::Positive, Type::Zero],
            _ => &[],
        }
    }

    /// Whether `value` belongs to this type.
    pub fn accepts(&self, value: &Value) -> bool {
        let number = value.as_number();

        match self {
            Type::Any => true,
            Type::None => false,
            Type::Boolean => matches!(value, Value::Boolean(_)),
            Type::Char => match value {
                Value::String(s) => s.chars().count() == 1,
                Value::Number(n) => (0.0..=MAX_CODE_POINT).contains(n),
                _ => false,
            },
            Type::Function => matches!(value, Value::Function),
            Type::Integer => number.is_some_and(|n| n.is_finite() && n.trunc() == n),
            Type::Iterable => matches!(
                value,
                Value::List(_) | Value::Map(_) | Value::Tuple(_) | Value::Range(..)
            ),
            Type::Map => matches!(value, Value::List(_) | Value::Map(_) | Value::Tuple(_)),
            Type::List => matches!(value, Value::List(_)),
            Type::Tuple => matches!(value, Value::Tuple(_)),
            Type::Range => matches!(value, Value::Range(..)),
            Type::Maybe => matches!(value, Value::Maybe(_)),
            Type::Mutable => matches!(value, Value::Mutable(_)),
            Type::Type => matches!(value, Value::Type(_)),
            Type::Number => number.is_some(),
            Type::String => matches!(value, Value::String(_)),
            Type::Negative => number.is_some_and(|n| n < 0.0),
            Type::Unsigned => number.is_some_and(|n| n >= 0.0),
            Type::Positive => number.is_some_and(|n| n > 0.0),
            Type::Zero => number.is_some_and(|n| n == 0.0),
        }
    }

    /// The most specific types below and including this one that accept
    /// `value`, following every branch that accepts it.
    pub fn types_of_value(&self, value: &Value) -> Vec<Type> {
        if !self.accepts(value) {
            return vec![];
        }

        let refined: Vec<Type> = self
            .subtypes()
            .iter()
            .flat_map(|subtype| subtype.types_of_value(value))
            .collect();

        if refined.is_empty() {
            vec![*self]
        } else {
            refined
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classifies `value` against the whole lattice. Types reachable along
/// more than one path are reported once, in first-seen order.
pub fn classify(value: &Value) -> Vec<Type> {
    let mut types = vec![];
    for ty in Type::Any.types_of_value(value) {
        if !types.contains(&ty) {
            types.push(ty);
        }
    }
    types
}
