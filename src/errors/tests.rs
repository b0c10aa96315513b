//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use std::sync::Arc;

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::lexer::tokenize;
use crate::Location;

fn location() -> Location {
    Location::new("let a = #;", Arc::new("test.cor".to_string()), 8, 1, 0)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        location(),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.to_string(), "unknown token: \"#\" at test.cor:1:9");
}

#[test]
fn test_error_location() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "while".to_string(),
        },
        location(),
    );

    assert_eq!(error.get_location().pos, 8);
    assert_eq!(error.get_location().column, 9);
}

#[test]
fn test_structural_error_names() {
    let cases = [
        (
            ErrorImpl::WrongClosingToken {
                expected: ")".to_string(),
                found: "}".to_string(),
            },
            "WrongClosingToken",
        ),
        (
            ErrorImpl::UnclosedBlock {
                expected: "}".to_string(),
            },
            "UnclosedBlock",
        ),
        (
            ErrorImpl::UnexpectedDelimiter {
                delimiter: ",".to_string(),
                block: "BLOCK_OPEN".to_string(),
            },
            "UnexpectedDelimiter",
        ),
        (
            ErrorImpl::MissingOperand {
                operator: "ADD".to_string(),
            },
            "MissingOperand",
        ),
    ];

    for (error_impl, name) in cases {
        assert_eq!(Error::new(error_impl, location()).get_error_name(), name);
    }
}

#[test]
fn test_unterminated_literal_error() {
    let error = Error::new(
        ErrorImpl::UnterminatedLiteral {
            kind: "STR".to_string(),
        },
        location(),
    );

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
    assert_eq!(
        error.get_tip().to_string(),
        "Unexpected end of input in STR, is a closing quote missing?"
    );
}

#[test]
fn test_variable_not_declared_error() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        location(),
    );

    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(
        error.get_error().to_string(),
        "identifier \"foo\" not previously declared"
    );
}

#[test]
fn test_unknown_type_error() {
    let error = Error::new(
        ErrorImpl::UnknownType {
            type_: "CustomType".to_string(),
        },
        location(),
    );

    assert_eq!(error.get_error_name(), "UnknownType");
}

#[test]
fn test_control_flow_errors() {
    let error = Error::new(ErrorImpl::ReturnOutsideFunction, location());
    assert_eq!(error.get_error_name(), "ReturnOutsideFunction");
    assert_eq!(error.get_tip().to_string(), "Cannot return from a non-function");

    let error = Error::new(ErrorImpl::BreakOutsideLoop, location());
    assert_eq!(error.get_error_name(), "BreakOutsideLoop");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        location(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
        },
        location(),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_diagnostic_from_error() {
    let diagnostic = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "#".to_string(),
        },
        location(),
    )
    .to_diagnostic();

    assert_eq!(diagnostic.name, "UnrecognisedToken");
    assert_eq!(diagnostic.trace.len(), 1);
    assert_eq!(diagnostic.trace[0].file, "test.cor");
    assert_eq!((diagnostic.trace[0].row, diagnostic.trace[0].col), (1, 9));
    assert_eq!(diagnostic.trace[0].token_name, None);
    assert_eq!(
        diagnostic.neighbourhood,
        ("let a = ".to_string(), "#;".to_string())
    );
}

#[test]
fn test_diagnostic_names_the_token() {
    let error = tokenize("x = \"open", Some("main.cor".to_string())).unwrap_err();
    let diagnostic = error.to_diagnostic();

    assert_eq!(diagnostic.trace[0].token_name.as_deref(), Some("UNTERMINATED"));
    assert_eq!(diagnostic.trace[0].col, 5);
    assert_eq!(diagnostic.neighbourhood.0, "x = ");
}
