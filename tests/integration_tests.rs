//! Integration tests for end-to-end compilation.
//!
//! These tests run the whole front end, from source text through
//! tokenization, structural parsing, lowering and type inference.

use corvin::{compile_source, errors::errors::ErrorImpl, CompiledUnit};
use rayon::prelude::*;

fn compile(source: &str) -> CompiledUnit {
    compile_source(source, Some("test.cor".to_string())).unwrap()
}

#[test]
fn test_compile_arithmetic() {
    let unit = compile("1 + 2 * 3");

    assert_eq!(unit.tree.children.len(), 1);
    assert_eq!(unit.tree.children[0].to_string(), "ADD(INT(1), MUL(INT(2), INT(3)))");
    assert_eq!(unit.program.returns.to_string(), "{Char, Positive}");
}

#[test]
fn test_compile_resolves_ambiguous_updates() {
    let unit = compile("Int a; --a; a--");

    assert_eq!(unit.tree.children[1].to_string(), "EXP_DELIMIT(DEC_PRE(IDENTIFIER(a)))");
    assert_eq!(unit.tree.children[2].to_string(), "EXP_DELIMIT(DEC_POST(IDENTIFIER(a)))");
    assert_eq!(unit.program.returns.to_string(), "{Integer}");
}

#[test]
fn test_compile_declaration_dump() {
    let unit = compile("Int x = 2.5");
    let dump = unit.program.to_string();

    assert!(dump.starts_with("Program : {Positive}\n"), "{}", dump);
    assert!(dump.contains("Declaration Int x : {Maybe<{Integer}>}"), "{}", dump);
}

#[test]
fn test_compile_unterminated_string() {
    let error = compile_source("Int x = \"abc", Some("main.cor".to_string())).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedLiteral");
    assert_eq!(error.get_location().line, 1);
    assert_eq!(error.get_location().column, 9);
}

#[test]
fn test_compile_undeclared_identifier() {
    let error = compile_source("Int x;\nx + y", Some("main.cor".to_string())).unwrap_err();

    assert_eq!(
        error.get_error(),
        &ErrorImpl::VariableNotDeclared {
            variable: "y".to_string()
        }
    );

    let diagnostic = error.to_diagnostic();
    assert_eq!(diagnostic.trace[0].file, "main.cor");
    assert_eq!((diagnostic.trace[0].row, diagnostic.trace[0].col), (2, 5));
    assert_eq!(diagnostic.neighbourhood, ("x + ".to_string(), "y".to_string()));
}

#[test]
fn test_compile_function_capture() {
    let unit = compile("Int a; Function f = () -> { return a; 2.5 }; f");
    assert_eq!(unit.program.returns.to_string(), "{Function}");

    let error = compile_source("Int a; () => a", None).unwrap_err();
    assert_eq!(error.get_error_name(), "VariableNotDeclared");
    assert_eq!(error.get_location().file.as_str(), "shell");
}

#[test]
fn test_compile_conditional_union() {
    let unit = compile("Boolean c; if c { \"yes\" } else { 2.5 }");

    assert_eq!(unit.program.returns.to_string(), "{String, Positive}");
}

#[test]
fn test_compile_loop_with_break() {
    let unit = compile("Boolean c; while (c) { break \"done\"; 2.5 }");

    assert_eq!(unit.program.returns.to_string(), "{List<{Positive}>, String}");
}

#[test]
fn test_compile_structural_errors() {
    let error = compile_source("{ (1 }", None).unwrap_err();
    assert_eq!(error.get_error_name(), "WrongClosingToken");

    let error = compile_source("1 +", None).unwrap_err();
    assert_eq!(error.get_error_name(), "MissingOperand");
}

#[test]
fn test_compile_files_in_parallel() {
    let sources = vec![
        ("a.cor", "Int a = 1"),
        ("b.cor", "String b; b"),
        ("c.cor", "Boolean c = y"),
    ];

    let results: Vec<_> = sources
        .par_iter()
        .map(|(name, source)| compile_source(source, Some(name.to_string())))
        .collect();

    assert_eq!(results[0].as_ref().unwrap().program.returns.to_string(), "{Char, Positive}");
    assert_eq!(results[1].as_ref().unwrap().program.returns.to_string(), "{String}");
    let error = results[2].as_ref().unwrap_err();
    assert_eq!(error.get_location().file.as_str(), "c.cor");
}
