//! Parser module for building the parse tree.
//!
//! This module turns a stream of tokens into a tree of `ParseNode`s
//! without a grammar. It works in passes:
//!
//! - Bracket nesting
//! - Argument and statement delimiter grouping
//! - Resolution of tokens whose role depends on their neighbours
//! - Operator collapsing by precedence tier and associativity
//!
//! Operator metadata lives in one static table in `lookups`, shared by
//! ambiguity resolution and collapsing.

pub mod lookups;
pub mod node;
pub mod operators;
pub mod parser;
