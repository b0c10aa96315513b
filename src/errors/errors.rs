use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::Token, Location};

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{internal_error} at {location}")]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
    token_name: Option<String>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
            token_name: None,
        }
    }

    /// Creates an error positioned on `token`, remembering its name for the trace.
    pub fn at_token(error_impl: ErrorImpl, token: &Token) -> Self {
        Error {
            internal_error: error_impl,
            location: token.location.clone(),
            token_name: Some(token.kind.to_string()),
        }
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnterminatedLiteral { .. } => "UnterminatedLiteral",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::WrongClosingToken { .. } => "WrongClosingToken",
            ErrorImpl::UnclosedBlock { .. } => "UnclosedBlock",
            ErrorImpl::UnexpectedDelimiter { .. } => "UnexpectedDelimiter",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::MissingOperand { .. } => "MissingOperand",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::ReturnOutsideFunction => "ReturnOutsideFunction",
            ErrorImpl::BreakOutsideLoop => "BreakOutsideLoop",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedLiteral { kind } => ErrorTip::Suggestion(format!(
                "Unexpected end of input in {}, is a closing quote missing?",
                kind
            )),
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::WrongClosingToken { expected, .. } => {
                ErrorTip::Suggestion(format!("Expected a closing `{}`", expected))
            }
            ErrorImpl::UnclosedBlock { expected } => {
                ErrorTip::Suggestion(format!("Block is never closed, add a `{}`", expected))
            }
            ErrorImpl::UnexpectedDelimiter { delimiter, block } => ErrorTip::Suggestion(format!(
                "`{}` can only separate values inside parentheses or brackets, not in {}",
                delimiter, block
            )),
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::MissingOperand { operator } => {
                ErrorTip::Suggestion(format!("Operator `{}` is missing an operand", operator))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Identifier `{}` not previously declared", variable))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("`{}` does not name a type", type_))
            }
            ErrorImpl::ReturnOutsideFunction => {
                ErrorTip::Suggestion(String::from("Cannot return from a non-function"))
            }
            ErrorImpl::BreakOutsideLoop => {
                ErrorTip::Suggestion(String::from("Cannot break from a non-loop"))
            }
        }
    }

    /// Converts the error into the record handed to the diagnostic sink.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic {
            message: self.internal_error.to_string(),
            name: self.get_error_name().to_string(),
            tip: self.get_tip().to_string(),
            trace: vec![TraceEntry {
                file: self.location.file.to_string(),
                row: self.location.line,
                col: self.location.column,
                token_name: self.token_name.clone(),
            }],
            neighbourhood: self.location.neighbourhood.clone(),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unknown token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected end of input in {kind}")]
    UnterminatedLiteral { kind: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },

    // Structural
    #[error("wrong closing token, expected {expected} but found {found}")]
    WrongClosingToken { expected: String, found: String },
    #[error("unclosed block, expected {expected}")]
    UnclosedBlock { expected: String },
    #[error("unexpected delimiter {delimiter:?} in expression of type {block}")]
    UnexpectedDelimiter { delimiter: String, block: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("missing operand for {operator}")]
    MissingOperand { operator: String },

    // Semantic
    #[error("identifier {variable:?} not previously declared")]
    VariableNotDeclared { variable: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("cannot return from a non-function")]
    ReturnOutsideFunction,
    #[error("cannot break from a non-loop")]
    BreakOutsideLoop,
}

/// One frame of a diagnostic trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub file: String,
    pub row: usize,
    pub col: usize,
    pub token_name: Option<String>,
}

/// A fatal error as the diagnostic sink receives it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub name: String,
    pub tip: String,
    pub trace: Vec<TraceEntry>,
    pub neighbourhood: (String, String),
}
