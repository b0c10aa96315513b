/// AST module
/// Contains the nodes type inference walks and the lowering that builds them
///
/// Submodules:
/// - ast: Node kinds and the annotated tree dump
/// - lower: Conversion from the parse tree, including literal values
pub mod ast;
pub mod lower;
