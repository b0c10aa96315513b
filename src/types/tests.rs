//! Unit tests for the type lattice.

use proptest::prelude::*;

use super::{
    lattice::{classify, Arity, Type},
    value::Value,
};

#[test]
fn test_classify_numbers() {
    assert_eq!(classify(&Value::Number(2.5)), vec![Type::Positive]);
    assert_eq!(classify(&Value::Number(-3.0)), vec![Type::Integer, Type::Negative]);
    assert_eq!(classify(&Value::Number(0.0)), vec![Type::Char, Type::Zero]);
    assert_eq!(classify(&Value::Number(65.0)), vec![Type::Char, Type::Positive]);
    assert_eq!(
        classify(&Value::Number(1e12)),
        vec![Type::Integer, Type::Positive]
    );
    assert_eq!(classify(&Value::Number(-0.5)), vec![Type::Negative]);
}

#[test]
fn test_classify_strings() {
    assert_eq!(classify(&Value::String("ab".to_string())), vec![Type::String]);
    assert_eq!(classify(&Value::String("é".to_string())), vec![Type::Char]);
    assert_eq!(classify(&Value::String(String::new())), vec![Type::String]);
}

#[test]
fn test_classify_other_values() {
    assert_eq!(classify(&Value::Boolean(true)), vec![Type::Boolean]);
    assert_eq!(classify(&Value::Function), vec![Type::Function]);
    assert_eq!(classify(&Value::Tuple(vec![])), vec![Type::Tuple]);
    assert_eq!(classify(&Value::List(vec![Value::Number(1.0)])), vec![Type::List]);
    assert_eq!(classify(&Value::Map(vec![])), vec![Type::Map]);
    assert_eq!(classify(&Value::Range(0.0, 3.0)), vec![Type::Range]);
    assert_eq!(classify(&Value::Maybe(None)), vec![Type::Maybe]);
    assert_eq!(classify(&Value::Type(Type::Integer)), vec![Type::Type]);
}

#[test]
fn test_none_accepts_nothing() {
    assert!(!Type::None.accepts(&Value::Number(0.0)));
    assert!(Type::None.types_of_value(&Value::Boolean(false)).is_empty());
}

#[test]
fn test_type_names() {
    assert_eq!(Type::from_name("Int"), Some(Type::Integer));
    assert_eq!(Type::from_name("Integer"), Some(Type::Integer));
    assert_eq!(Type::from_name("Zero"), Some(Type::Zero));
    assert_eq!(Type::from_name("int"), None);
    assert_eq!(Type::Unsigned.to_string(), "Unsigned");
}

#[test]
fn test_type_arity() {
    assert_eq!(Type::Map.arity(), Arity::Fixed(2));
    assert_eq!(Type::Maybe.arity(), Arity::Fixed(1));
    assert_eq!(Type::Tuple.arity(), Arity::Variadic);
    assert_eq!(Type::Char.arity(), Arity::Fixed(0));
}

#[test]
fn test_every_type_reachable_from_any() {
    let mut seen = vec![Type::Any];
    let mut queue = vec![Type::Any];
    while let Some(ty) = queue.pop() {
        for subtype in ty.subtypes() {
            if !seen.contains(subtype) {
                seen.push(*subtype);
                queue.push(*subtype);
            }
        }
    }

    for ty in Type::ALL {
        assert_eq!(seen.contains(&ty), ty != Type::None, "{}", ty);
    }
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Boolean),
        (-1000i32..1000).prop_map(|n| Value::Number(n as f64)),
        (-1000.0f64..1000.0).prop_map(Value::Number),
        any::<f64>().prop_map(Value::Number),
        ".{0,3}".prop_map(Value::String),
        Just(Value::Function),
        Just(Value::Tuple(vec![])),
        Just(Value::Range(0.0, 1.0)),
    ]
}

proptest! {
    #[test]
    fn test_classify_is_most_specific(value in value_strategy()) {
        let types = classify(&value);

        prop_assert!(!types.is_empty());
        for ty in types {
            prop_assert!(ty.accepts(&value));
            for subtype in ty.subtypes() {
                prop_assert!(!subtype.accepts(&value), "{} refines {} for {}", subtype, ty, value);
            }
        }
    }

    #[test]
    fn test_number_subtypes_refine_number(n in any::<f64>()) {
        let value = Value::Number(n);
        for ty in Type::Number.subtypes() {
            if ty.accepts(&value) {
                prop_assert!(Type::Number.accepts(&value));
            }
        }
    }
}
