//! Structural parser turning the flat token stream into a tree.
//!
//! Parsing runs as a sequence of passes, each finishing over the whole
//! tree before the next starts:
//! - Block collapsing nests tokens by their brackets
//! - Argument splitting groups `,` separated values
//! - Statement splitting groups `;` separated statements
//! - Ambiguity resolution picks a concrete kind for context dependent tokens
//! - Operator collapsing builds operator nodes tier by tier
//!
//! Every pass works bottom-up: a node's children are processed before
//! the node's own level.

use std::vec::IntoIter;

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Location, MK_TOKEN,
};

use super::{
    node::{Child, ParseNode},
    operators::{collapse_operators, resolve_ambiguous},
};

/// Cursor used by block collapsing.
pub struct Parser {
    tokens: IntoIter<Token>,
    last_location: Location,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens: tokens.into_iter(),
            last_location: Location::default(),
        }
    }

    /// Next token, or a synthetic end-of-input once the stream runs dry.
    fn advance(&mut self) -> Token {
        match self.tokens.next() {
            Some(token) => {
                self.last_location = token.location.clone();
                token
            }
            None => MK_TOKEN!(TokenKind::Eof, String::new(), self.last_location.clone()),
        }
    }

    /// Collects tokens up to the close matching `opener` into one node
    /// headed by the opener. With no opener, collects up to end-of-input
    /// and heads the node with the sentinel.
    pub fn collapse_block(&mut self, opener: Option<Token>) -> Result<ParseNode, Error> {
        let expected = opener.as_ref().and_then(|open| open.kind.closing());
        let mut children = vec![];

        loop {
            let token = self.advance();

            if token.kind.is_block_open() {
                let block = self.collapse_block(Some(token))?;
                children.push(Child::Node(block));
            } else if token.kind.is_block_close() {
                return match (opener, expected) {
                    (Some(open), Some(close)) if close == token.kind => Ok(ParseNode::new(open, children)),
                    (_, close) => Err(Error::at_token(
                        ErrorImpl::WrongClosingToken {
                            expected: close.map_or_else(|| TokenKind::Eof.describe(), |kind| kind.describe()),
                            found: token.kind.describe(),
                        },
                        &token,
                    )),
                };
            } else if token.kind == TokenKind::Eof {
                return match (opener, expected) {
                    (Some(open), Some(close)) => Err(Error::at_token(
                        ErrorImpl::UnclosedBlock {
                            expected: close.describe(),
                        },
                        &open,
                    )),
                    _ => Ok(ParseNode::new(token, children)),
                };
            } else {
                children.push(Child::Token(token));
            }
        }
    }
}

/// Nests `tokens` by their brackets. Closing brackets are consumed and the
/// root is headed by the end-of-input sentinel.
pub fn collapse_blocks(tokens: Vec<Token>) -> Result<ParseNode, Error> {
    Parser::new(tokens).collapse_block(None)
}

/// Regroups the children of `node` around `delimiter`. A level without the
/// delimiter is left alone, and a trailing empty group is dropped.
fn split_level(node: &mut ParseNode, delimiter: TokenKind) {
    let has_delimiter = node
        .children
        .iter()
        .any(|child| matches!(child, Child::Token(token) if token.kind == delimiter));
    if !has_delimiter {
        return;
    }

    let mut groups = vec![];
    let mut current = vec![];
    let mut last_delimiter = None;

    for child in std::mem::take(&mut node.children) {
        match child {
            Child::Token(token) if token.kind == delimiter => {
                groups.push(Child::Node(ParseNode::new(token.clone(), std::mem::take(&mut current))));
                last_delimiter = Some(token);
            }
            other => current.push(other),
        }
    }

    if let Some(delimiter) = last_delimiter {
        if !current.is_empty() {
            groups.push(Child::Node(ParseNode::new(delimiter, current)));
        }
    }

    node.children = groups;
}

/// Splits every level on `,`. Only tuples, lists and braces directly inside
/// them may hold argument delimiters.
pub fn split_arguments(node: &mut ParseNode, parent: Option<TokenKind>) -> Result<(), Error> {
    let kind = node.head.kind;
    for child in node.children.iter_mut() {
        if let Child::Node(inner) = child {
            split_arguments(inner, Some(kind))?;
        }
    }

    let allowed = match kind {
        TokenKind::TupleOpen | TokenKind::ListOpen => true,
        TokenKind::BlockOpen => matches!(parent, Some(TokenKind::TupleOpen | TokenKind::ListOpen)),
        _ => false,
    };

    if !allowed {
        let stray = node
            .children
            .iter()
            .filter_map(Child::as_token)
            .find(|token| token.kind == TokenKind::ArgDelimit);

        return match stray {
            Some(token) => Err(Error::at_token(
                ErrorImpl::UnexpectedDelimiter {
                    delimiter: token.kind.describe(),
                    block: kind.to_string(),
                },
                token,
            )),
            None => Ok(()),
        };
    }

    split_level(node, TokenKind::ArgDelimit);
    Ok(())
}

/// Splits every level on `;`.
pub fn split_statements(node: &mut ParseNode) {
    for child in node.children.iter_mut() {
        if let Child::Node(inner) = child {
            split_statements(inner);
        }
    }

    split_level(node, TokenKind::ExpDelimit);
}

/// Parses a token stream, as produced by `tokenize`, into a tree.
pub fn parse(tokens: Vec<Token>) -> Result<ParseNode, Error> {
    let mut root = collapse_blocks(tokens)?;
    debug!(nodes = root.size(), "collapsed blocks");

    split_arguments(&mut root, None)?;
    split_statements(&mut root);
    debug!(nodes = root.size(), "split delimiters");

    resolve_ambiguous(&mut root)?;
    collapse_operators(&mut root)?;
    debug!(nodes = root.size(), "collapsed operators");

    Ok(root)
}
