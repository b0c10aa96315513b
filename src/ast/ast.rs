use std::fmt::{Display, Write};

use crate::{
    lexer::tokens::TokenKind,
    type_checker::type_set::TypeSet,
    types::value::Value,
    Location,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopKind {
    Do,
    DoWhile,
    DoUntil,
    While,
    Until,
}

impl LoopKind {
    /// Post-condition loops test inside the body's scope.
    pub fn tests_after_body(&self) -> bool {
        matches!(self, LoopKind::DoWhile | LoopKind::DoUntil)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Program(Vec<Node>),
    Block(Vec<Node>),
    Binary {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary {
        operator: TokenKind,
        argument: Box<Node>,
    },
    Update {
        operator: TokenKind,
        argument: Box<Node>,
    },
    Identifier(String),
    Declaration {
        type_name: String,
        name: String,
    },
    Assignment {
        operator: TokenKind,
        left: Box<Node>,
        right: Box<Node>,
    },
    Return(Box<Node>),
    Break(Box<Node>),
    Empty,
    Literal(Value),
    Tuple(Vec<Node>),
    Conditional {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    Loop {
        kind: LoopKind,
        body: Box<Node>,
        test: Option<Box<Node>>,
    },
    Function {
        /// `->` functions see the enclosing scope, `=>` functions only the globals.
        capturing: bool,
        parameters: Box<Node>,
        body: Box<Node>,
    },
    ParameterList(Vec<Node>),
    /// A construct inference has no rule for, named by what produced it.
    Unknown(String),
}

/// A node of the lowered tree, carrying the result inference gave it.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub location: Location,
    pub returns: TypeSet,
}

impl Node {
    pub fn new(kind: NodeKind, location: Location) -> Self {
        Node {
            kind,
            location,
            returns: TypeSet::new(),
        }
    }

    pub fn boxed(kind: NodeKind, location: Location) -> Box<Self> {
        Box::new(Node::new(kind, location))
    }

    pub fn name(&self) -> String {
        match &self.kind {
            NodeKind::Program(_) => String::from("Program"),
            NodeKind::Block(_) => String::from("Block"),
            NodeKind::Binary { operator, .. } => format!("Binary {}", operator),
            NodeKind::Unary { operator, .. } => format!("Unary {}", operator),
            NodeKind::Update { operator, .. } => format!("Update {}", operator),
            NodeKind::Identifier(name) => format!("Identifier {}", name),
            NodeKind::Declaration { type_name, name } => format!("Declaration {} {}", type_name, name),
            NodeKind::Assignment { operator, .. } => format!("Assignment {}", operator),
            NodeKind::Return(_) => String::from("Return"),
            NodeKind::Break(_) => String::from("Break"),
            NodeKind::Empty => String::from("Empty"),
            NodeKind::Literal(value) => format!("Literal {}", value),
            NodeKind::Tuple(_) => String::from("Tuple"),
            NodeKind::Conditional { .. } => String::from("Conditional"),
            NodeKind::Loop { kind, .. } => format!("Loop {:?}", kind),
            NodeKind::Function { capturing, .. } => {
                format!("Function {}", if *capturing { "->" } else { "=>" })
            }
            NodeKind::ParameterList(_) => String::from("ParameterList"),
            NodeKind::Unknown(what) => format!("Unknown {}", what),
        }
    }

    /// Direct children in evaluation order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Program(nodes)
            | NodeKind::Block(nodes)
            | NodeKind::Tuple(nodes)
            | NodeKind::ParameterList(nodes) => nodes.iter().collect(),
            NodeKind::Binary { left, right, .. } | NodeKind::Assignment { left, right, .. } => {
                vec![&**left, &**right]
            }
            NodeKind::Unary { argument, .. } | NodeKind::Update { argument, .. } => vec![&**argument],
            NodeKind::Return(value) | NodeKind::Break(value) => vec![&**value],
            NodeKind::Conditional {
                test,
                consequent,
                alternate,
            } => {
                let mut children: Vec<&Node> = vec![&**test, &**consequent];
                children.extend(alternate.as_deref());
                children
            }
            NodeKind::Loop { body, test, .. } => {
                let mut children: Vec<&Node> = vec![&**body];
                children.extend(test.as_deref());
                children
            }
            NodeKind::Function {
                parameters, body, ..
            } => vec![&**parameters, &**body],
            NodeKind::Identifier(_)
            | NodeKind::Declaration { .. }
            | NodeKind::Empty
            | NodeKind::Literal(_)
            | NodeKind::Unknown(_) => vec![],
        }
    }

    fn write_tree(&self, out: &mut String, depth: usize) -> std::fmt::Result {
        writeln!(out, "{:indent$}{} : {}", "", self.name(), self.returns, indent = depth * 2)?;
        for child in self.children() {
            child.write_tree(out, depth + 1)?;
        }
        Ok(())
    }
}

impl Display for Node {
    /// Indented dump of the tree with every node's inferred result.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut out = String::new();
        self.write_tree(&mut out, 0)?;
        write!(f, "{}", out)
    }
}
