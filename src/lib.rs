#![allow(clippy::module_inception)]

use std::{fmt::Display, sync::Arc};

use tracing::debug;

use crate::{
    ast::{ast::Node, lower::lower},
    errors::errors::{Diagnostic, Error},
    parser::{node::ParseNode, parser::parse},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;
pub mod types;

extern crate regex;

/// Characters of context kept on each side of a location.
const NEIGHBOURHOOD: usize = 10;

/// Where a token starts in its source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub file: Arc<String>,
    /// Byte offset into the source.
    pub pos: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// Source text just before and just after the location, on the same line.
    pub neighbourhood: (String, String),
}

impl Location {
    pub fn new(source: &str, file: Arc<String>, pos: usize, line: usize, line_start: usize) -> Self {
        let before_text = &source[line_start..pos];
        let after_text = &source[pos..];

        let skip = before_text.chars().count().saturating_sub(NEIGHBOURHOOD);
        let before = before_text.chars().skip(skip).collect();
        let after = after_text
            .chars()
            .take_while(|c| *c != '\n' && *c != '\r')
            .take(NEIGHBOURHOOD)
            .collect();

        Location {
            file,
            pos,
            line,
            column: before_text.chars().count() + 1,
            neighbourhood: (before, after),
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// Everything the front end produces for one source file.
#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub tree: ParseNode,
    pub program: Node,
}

/// Runs the whole front end over one source file: tokenize, parse, lower
/// and infer. Stops at the first error.
pub fn compile_source(source: &str, file: Option<String>) -> Result<CompiledUnit, Error> {
    let tokens = lexer::lexer::tokenize(source, file)?;
    let tree = parse(tokens)?;
    let mut program = lower(&tree)?;
    type_checker::type_checker::type_check(&mut program)?;

    debug!(returns = %program.returns, "compiled unit");
    Ok(CompiledUnit { tree, program })
}

pub fn display_error(diagnostic: &Diagnostic) {
    /*
        error: message
        -> final.cor:20:9
           |
        20 | let a = #;
           | --------^
    */

    let Some(frame) = diagnostic.trace.first() else {
        eprintln!("Error: {}", diagnostic.name);
        return;
    };

    let line_string = frame.row.to_string();
    let padding = line_string.len() + 2;

    if diagnostic.tip.is_empty() {
        eprintln!("Error: {} ({})", diagnostic.name, diagnostic.message);
    } else {
        eprintln!("Error: {} ({})", diagnostic.name, diagnostic.tip);
    }
    match &frame.token_name {
        Some(token) => eprintln!("-> {}:{}:{} at {}", frame.file, frame.row, frame.col, token),
        None => eprintln!("-> {}:{}:{}", frame.file, frame.row, frame.col),
    }
    eprintln!("{:>padding$}", "|");

    let (before, after) = &diagnostic.neighbourhood;
    let (before_removed, _) = remove_starting_whitespace(before);
    eprintln!("{} | {}{}", line_string, before_removed, after.trim_end());

    let arrows = before_removed.chars().count() + 1;

    eprintln!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::Location;

    #[test]
    fn test_location_neighbourhood() {
        let source = "Int alpha = 1\nInt beta = alpha + 22";
        let pos = source.find("alpha +").unwrap();
        let line_start = source.find('\n').unwrap() + 1;
        let location = Location::new(source, Arc::new("test.cor".to_string()), pos, 2, line_start);

        assert_eq!(location.line, 2);
        assert_eq!(location.column, 12);
        assert_eq!(location.neighbourhood.0, "nt beta = ");
        assert_eq!(location.neighbourhood.1, "alpha + 22");
        assert_eq!(location.to_string(), "test.cor:2:12");
    }

    #[test]
    fn test_location_neighbourhood_stops_at_line_break() {
        let source = "ab\ncd";
        let location = Location::new(source, Arc::new("shell".to_string()), 1, 1, 0);

        assert_eq!(location.column, 2);
        assert_eq!(location.neighbourhood, ("a".to_string(), "b".to_string()));
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("   x = 1");
        assert_eq!(text, "x = 1");
        assert_eq!(removed, 3);
    }
}
