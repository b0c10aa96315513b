//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source location information
//! - Specific error variants for the lexical, structural and semantic phases
//! - The diagnostic record handed to whoever reports the error
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
