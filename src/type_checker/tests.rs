//! Unit tests for type inference.

use super::{
    scope::{Binding, Scope, GLOBAL_SCOPE},
    type_checker::type_check,
    type_set::{TypeResult, TypeSet},
};
use crate::{
    ast::{
        ast::{Node, NodeKind},
        lower::lower,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    types::lattice::Type,
};

fn check(source: &str) -> Result<Node, Error> {
    let mut program = lower(&parse(tokenize(source, Some("test.cor".to_string())).unwrap()).unwrap())?;
    type_check(&mut program)?;
    Ok(program)
}

fn returns(source: &str) -> String {
    check(source).unwrap().returns.to_string()
}

#[test]
fn test_infer_literals() {
    assert_eq!(returns("2.5"), "{Positive}");
    assert_eq!(returns("\"ab\""), "{String}");
    assert_eq!(returns("`3"), "{Char, Positive}");
    assert_eq!(returns("false"), "{Boolean}");
}

#[test]
fn test_infer_block_takes_last_statement() {
    assert_eq!(returns("1; \"ab\""), "{String}");
    assert_eq!(returns("{ true; 2.5 }"), "{Positive}");
    assert_eq!(returns("{}"), "{None}");
}

#[test]
fn test_infer_binary_uses_left_operand() {
    assert_eq!(returns("2.5 + \"ab\""), "{Positive}");
}

#[test]
fn test_infer_declaration() {
    assert_eq!(returns("Int x"), "{Maybe<{Integer}>}");
    assert_eq!(returns("Int x; x"), "{Integer}");
    assert_eq!(returns("String s = \"ab\""), "{String}");
}

#[test]
fn test_infer_type_names() {
    assert_eq!(returns("Boolean"), "{Type}");
}

#[test]
fn test_infer_undeclared_identifier() {
    let error = check("Int x; { x; y }").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "y".to_string()
        }
    );
    assert_eq!(error.get_location().line, 1);
    assert_eq!(error.get_location().column, 13);
}

#[test]
fn test_infer_declaration_with_unknown_type() {
    let error = check("Int x; x y").unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::UnknownType {
            type_: "x".to_string()
        }
    );

    let error = check("Widget w").unwrap_err();
    assert!(matches!(error.get_error(), ErrorImpl::VariableNotDeclared { .. }));
}

#[test]
fn test_infer_scopes_do_not_leak() {
    assert!(check("{ Int x }; x").is_err());
    assert!(check("if true { Int x } else { x }").is_err());
    assert!(check("Int x; { x }").is_ok());
}

#[test]
fn test_infer_tuple() {
    assert_eq!(returns("(2.5, \"ab\")"), "{Tuple<{Positive}, {String}>}");
    assert_eq!(returns("()"), "{Tuple}");
}

#[test]
fn test_infer_conditional_unions_branches() {
    assert_eq!(returns("Boolean c; if c { 2.5 } else { \"ab\" }"), "{Positive, String}");
    assert_eq!(returns("if true 2.5"), "{Positive, None}");
    assert_eq!(returns("if true 2.5 else 0.5"), "{Positive}");
}

#[test]
fn test_infer_conditional_test_scope() {
    assert_eq!(returns("if (Int q) q"), "{Integer, None}");

    let error = check("if (Int q) q; q").unwrap_err();
    assert_eq!(
        error.get_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "q".to_string()
        }
    );
}

#[test]
fn test_infer_loop_result() {
    assert_eq!(returns("while true 2.5"), "{List<{Positive}>}");
}

#[test]
fn test_infer_loop_captures_breaks() {
    assert_eq!(
        returns("Boolean n; do { break \"ab\"; 2.5 } while n"),
        "{List<{Positive}>, String}"
    );
    assert_eq!(returns("do { break; 2.5 }"), "{List<{Positive}>}");
}

#[test]
fn test_infer_post_condition_sees_body_scope() {
    assert!(check("do { Boolean done } until done").is_ok());
    assert_eq!(returns("do { Boolean done; 2.5 } while done"), "{List<{Positive}>}");
    assert!(check("do { Boolean done } until done; done").is_err());
    assert!(check("until (done) { Boolean done }").is_err());
}

#[test]
fn test_infer_function_collects_returns() {
    assert_eq!(
        returns("() -> { return \"ab\"; 2.5 }"),
        "{Function<{String, Positive}>}"
    );
    assert_eq!(returns("(Int a) => a"), "{Function<{Integer}>}");
}

#[test]
fn test_infer_conditional_early_exit() {
    assert_eq!(
        returns("Boolean c; do { if c break 1; 2.5 }"),
        "{List<{Positive}>, Char, Positive}"
    );
    assert_eq!(
        returns("Boolean c; () -> { if c return 1; 2.5 }"),
        "{Function<{Char, Positive}>}"
    );
    assert_eq!(returns("(Int a) -> return a"), "{Function<{Integer}>}");
}

#[test]
fn test_infer_capturing_function() {
    assert!(check("Int a; Function f = () -> { a }").is_ok());

    let error = check("Int a; Function g = () => { a }").unwrap_err();
    assert_eq!(
        error.get_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "a".to_string()
        }
    );
}

#[test]
fn test_infer_control_outside_target() {
    assert_eq!(
        check("return 1").unwrap_err().get_error(),
        &ErrorImpl::ReturnOutsideFunction
    );
    assert_eq!(
        check("break").unwrap_err().get_error(),
        &ErrorImpl::BreakOutsideLoop
    );
    assert_eq!(
        check("do { () -> { break 1 } }").unwrap_err().get_error(),
        &ErrorImpl::BreakOutsideLoop
    );
    assert!(check("() -> { do { return 1 } }").is_ok());
}

#[test]
fn test_infer_unknown_nodes_are_none() {
    let program = check("Int a; a.b").unwrap();
    assert_eq!(program.returns.to_string(), "{None}");
}

#[test]
fn test_infer_annotates_every_node() {
    let program = check("Int x = 1 + 2").unwrap();

    fn walk(node: &Node) {
        assert_ne!(node.returns, TypeSet::new(), "{} has no result", node.name());
        node.children().into_iter().for_each(walk);
    }
    walk(&program);

    match &program.kind {
        NodeKind::Program(statements) => assert_eq!(statements.len(), 1),
        other => panic!("expected a program, got {:?}", other),
    }
}

#[test]
fn test_type_set_dedupes_structurally() {
    let mut set = TypeSet::of(Type::List, vec![TypeSet::of(Type::Integer, vec![])]);
    set.push(TypeResult {
        ty: Type::List,
        parameters: vec![TypeSet::of(Type::Integer, vec![])],
    });
    set.union(TypeSet::none());
    set.union(TypeSet::none());

    assert_eq!(set.to_string(), "{List<{Integer}>, None}");
    assert!(!set.is_none());
    assert!(TypeSet::none().is_none());
}

#[test]
fn test_global_scope_names_every_type() {
    assert_eq!(GLOBAL_SCOPE.get("Int"), Some(&Binding::TypeName(Type::Integer)));
    assert_eq!(GLOBAL_SCOPE.get("None"), Some(&Binding::TypeName(Type::None)));
    for ty in Type::ALL {
        assert_eq!(GLOBAL_SCOPE.get(ty.name()), Some(&Binding::TypeName(ty)));
    }
}

#[test]
fn test_child_scope_is_a_copy() {
    let parent = Scope::global();
    let mut child = parent.child();
    child.declare("x", Binding::Value(TypeSet::none()));

    assert!(child.get("x").is_some());
    assert!(parent.get("x").is_none());
}
