//! The type lattice.
//!
//! Types form a DAG rooted at `Any`, where every subtype refines its
//! parents. Classifying a value walks every accepting branch and keeps the
//! most specific matches, so a value may land in several unrelated types.

pub mod lattice;
pub mod value;

#[cfg(test)]
mod tests;
