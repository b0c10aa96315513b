use std::fmt::Display;

use crate::lexer::tokens::{Category, Token};

/// A child of a [`ParseNode`]: either a leaf token or a subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Token(Token),
    Node(ParseNode),
}

impl Child {
    /// The token this child starts at, used to position errors.
    pub fn first_token(&self) -> &Token {
        match self {
            Child::Token(token) => token,
            Child::Node(node) => &node.head,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&ParseNode> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    /// True for an operator or ambiguous token that has not been collapsed.
    pub fn is_bare_operator(&self) -> bool {
        matches!(
            self,
            Child::Token(token) if matches!(token.category(), Category::Operator | Category::Ambiguous)
        )
    }
}

/// A tree node headed by the token that produced it: a block opener,
/// a delimiter, an operator or, for the root, the end-of-input sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseNode {
    pub head: Token,
    pub children: Vec<Child>,
}

impl ParseNode {
    pub fn new(head: Token, children: Vec<Child>) -> Self {
        ParseNode { head, children }
    }

    /// Leaf tokens in source order, heads excluded.
    pub fn leaves(&self) -> Vec<&Token> {
        let mut leaves = vec![];
        for child in &self.children {
            match child {
                Child::Token(token) => leaves.push(token),
                Child::Node(node) => leaves.extend(node.leaves()),
            }
        }
        leaves
    }

    /// Number of nodes in the tree, this one included.
    pub fn size(&self) -> usize {
        1 + self
            .children
            .iter()
            .filter_map(Child::as_node)
            .map(ParseNode::size)
            .sum::<usize>()
    }
}

impl Display for Child {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Child::Token(token) => write!(f, "{}", token),
            Child::Node(node) => write!(f, "{}", node),
        }
    }
}

impl Display for ParseNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.head.kind)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}
