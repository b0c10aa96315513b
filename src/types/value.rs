use std::fmt::Display;

use super::lattice::Type;

/// A runtime value, as far as the front end needs to know one.
/// Literals produce the scalar variants; the container variants exist so
/// the lattice can classify anything the language can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Boolean(bool),
    Number(f64),
    String(String),
    Function,
    List(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Tuple(Vec<Value>),
    Range(f64, f64),
    Maybe(Option<Box<Value>>),
    Mutable(Box<Value>),
    Type(Type),
}

impl Value {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

fn write_list(f: &mut std::fmt::Formatter<'_>, values: &[Value]) -> std::fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", value)?;
    }
    Ok(())
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Function => write!(f, "<function>"),
            Value::List(values) => {
                write!(f, "[")?;
                write_list(f, values)?;
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                write!(f, "}}")
            }
            Value::Tuple(values) => {
                write!(f, "(")?;
                write_list(f, values)?;
                write!(f, ")")
            }
            Value::Range(start, end) => write!(f, "{}..{}", start, end),
            Value::Maybe(Some(value)) => write!(f, "{}?", value),
            Value::Maybe(None) => write!(f, "none"),
            Value::Mutable(value) => write!(f, "@{}", value),
            Value::Type(ty) => write!(f, "{}", ty),
        }
    }
}
