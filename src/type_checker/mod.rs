//! Type inference and semantic analysis module.
//!
//! This module walks the lowered tree and gives every node the set of
//! shapes its value may take. Along the way it:
//!
//! - Resolves identifiers against copied lexical scopes
//! - Binds declared names to their declared type
//! - Collects `return` payloads into functions and `break` payloads into loops
//! - Rejects undeclared identifiers and control flow with nowhere to go
//!
//! Constructs without an inference rule are warned about and given the
//! uninhabited type so the rest of the tree is still checked.

pub mod scope;
pub mod type_checker;
pub mod type_set;

#[cfg(test)]
mod tests;
