//! Lexical analysis module for the compiler.
//!
//! This module contains the tokenizer that converts source code into a
//! stream of located tokens. It handles:
//!
//! - The ordered token catalog, where the first matching entry wins
//! - Literals, keywords, operators and the context dependent tokens
//! - Line, column and neighbourhood tracking for error reporting
//! - Comments and whitespace, kept by `scan` and dropped by `tokenize`

pub mod lexer;
pub mod tokens;
