//! Lowering from the parse tree to inference nodes.
//!
//! The parse tree only knows heads and children. Lowering gives each
//! shape its meaning: declarations from adjacent identifiers, tuples from
//! argument groups, conditionals and loops from their operator pairs.

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    parser::node::{Child, ParseNode},
    types::value::Value,
    Location,
};

use super::ast::{LoopKind, Node, NodeKind};

/// Lowers a parsed program.
pub fn lower(root: &ParseNode) -> Result<Node, Error> {
    let statements = lower_statements(&root.children, &root.head.location)?;
    let location = statements
        .first()
        .map_or_else(|| root.head.location.clone(), |node| node.location.clone());

    debug!(statements = statements.len(), "lowered program");
    Ok(Node::new(NodeKind::Program(statements), location))
}

fn is_group(child: &Child, delimiter: TokenKind) -> bool {
    matches!(child, Child::Node(node) if node.head.kind == delimiter)
}

fn is_split(children: &[Child], delimiter: TokenKind) -> bool {
    !children.is_empty() && children.iter().all(|child| is_group(child, delimiter))
}

/// One node per statement of a level.
fn lower_statements(children: &[Child], location: &Location) -> Result<Vec<Node>, Error> {
    if is_split(children, TokenKind::ExpDelimit) {
        children
            .iter()
            .filter_map(Child::as_node)
            .map(|group| lower_expression(&group.children, &group.head.location))
            .collect()
    } else {
        Ok(vec![lower_expression(children, location)?])
    }
}

/// A level as a single node: the statement itself, or a block of them.
fn lower_sequence(children: &[Child], location: &Location) -> Result<Node, Error> {
    let mut statements = lower_statements(children, location)?;
    if statements.len() == 1 {
        if let Some(only) = statements.pop() {
            return Ok(only);
        }
    }

    Ok(Node::new(NodeKind::Block(statements), location.clone()))
}

/// The items of one statement. Anything but a single item or a declaration
/// is a juxtaposition with no meaning yet.
fn lower_expression(items: &[Child], location: &Location) -> Result<Node, Error> {
    match items {
        [] => Ok(Node::new(NodeKind::Empty, location.clone())),
        [only] => lower_child(only),
        [Child::Token(type_name), Child::Token(name)]
            if type_name.kind == TokenKind::Identifier && name.kind == TokenKind::Identifier =>
        {
            Ok(declaration(type_name, name))
        }
        [Child::Token(type_name), Child::Node(assign)]
            if type_name.kind == TokenKind::Identifier && assign.head.kind == TokenKind::Assign =>
        {
            match assign.children.as_slice() {
                [Child::Token(name), value] if name.kind == TokenKind::Identifier => Ok(Node::new(
                    NodeKind::Assignment {
                        operator: TokenKind::Assign,
                        left: Box::new(declaration(type_name, name)),
                        right: Box::new(lower_child(value)?),
                    },
                    assign.head.location.clone(),
                )),
                _ => Ok(unknown("juxtaposition", &type_name.location)),
            }
        }
        [first, ..] => Ok(unknown("juxtaposition", &first.first_token().location)),
    }
}

fn declaration(type_name: &Token, name: &Token) -> Node {
    Node::new(
        NodeKind::Declaration {
            type_name: type_name.text.clone(),
            name: name.text.clone(),
        },
        type_name.location.clone(),
    )
}

fn unknown(what: &str, location: &Location) -> Node {
    Node::new(NodeKind::Unknown(what.to_string()), location.clone())
}

fn lower_child(child: &Child) -> Result<Node, Error> {
    match child {
        Child::Token(token) => lower_token(token),
        Child::Node(node) => lower_node(node),
    }
}

fn lower_token(token: &Token) -> Result<Node, Error> {
    let kind = match token.kind {
        TokenKind::Identifier => NodeKind::Identifier(token.text.clone()),
        TokenKind::Int
        | TokenKind::Frac
        | TokenKind::Str
        | TokenKind::StrNoEsc
        | TokenKind::Char
        | TokenKind::Bool => NodeKind::Literal(parse_literal(token)?),
        other => NodeKind::Unknown(other.to_string()),
    };

    Ok(Node::new(kind, token.location.clone()))
}

/// The operand of a collapsed operator at `index`. Collapsing guarantees
/// the count, so a missing one means the tree was built by hand.
fn operand(node: &ParseNode, index: usize) -> Result<Box<Node>, Error> {
    match node.children.get(index) {
        Some(child) => Ok(Box::new(lower_child(child)?)),
        None => Err(Error::at_token(
            ErrorImpl::MissingOperand {
                operator: node.head.kind.to_string(),
            },
            &node.head,
        )),
    }
}

fn unexpected(token: &Token) -> Error {
    Error::at_token(
        ErrorImpl::UnexpectedToken {
            token: token.text.clone(),
        },
        token,
    )
}

fn lower_node(node: &ParseNode) -> Result<Node, Error> {
    let head = &node.head;
    let location = head.location.clone();

    let kind = match head.kind {
        TokenKind::BlockOpen if is_split(&node.children, TokenKind::ArgDelimit) => {
            NodeKind::Unknown(String::from("map"))
        }
        TokenKind::BlockOpen => NodeKind::Block(lower_statements(&node.children, &location)?),
        TokenKind::TupleOpen if node.children.is_empty() => NodeKind::Tuple(vec![]),
        TokenKind::TupleOpen if is_split(&node.children, TokenKind::ArgDelimit) => NodeKind::Tuple(
            node.children
                .iter()
                .filter_map(Child::as_node)
                .map(|group| lower_sequence(&group.children, &group.head.location))
                .collect::<Result<_, _>>()?,
        ),
        TokenKind::TupleOpen | TokenKind::ExpDelimit | TokenKind::ArgDelimit => {
            return lower_sequence(&node.children, &location)
        }
        TokenKind::ListOpen => NodeKind::Unknown(String::from("list")),

        TokenKind::Pow
        | TokenKind::Mul
        | TokenKind::Div
        | TokenKind::Mod
        | TokenKind::Add
        | TokenKind::Sub
        | TokenKind::BitLeft
        | TokenKind::BitRight
        | TokenKind::RangeFull
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LtEq
        | TokenKind::GtEq
        | TokenKind::Eq
        | TokenKind::Neq
        | TokenKind::BitAnd
        | TokenKind::BitXor
        | TokenKind::BitOr
        | TokenKind::And
        | TokenKind::Xor
        | TokenKind::Or
        | TokenKind::Each => NodeKind::Binary {
            operator: head.kind,
            left: operand(node, 0)?,
            right: operand(node, 1)?,
        },

        TokenKind::Neg
        | TokenKind::Not
        | TokenKind::BitNot
        | TokenKind::Deref
        | TokenKind::Ref
        | TokenKind::Maybe
        | TokenKind::RangeInf
        | TokenKind::RangeNegInf => NodeKind::Unary {
            operator: head.kind,
            argument: operand(node, 0)?,
        },

        TokenKind::DecPre | TokenKind::DecPost | TokenKind::IncPre | TokenKind::IncPost => {
            NodeKind::Update {
                operator: head.kind,
                argument: operand(node, 0)?,
            }
        }

        TokenKind::Assign
        | TokenKind::AddAssign
        | TokenKind::SubAssign
        | TokenKind::MulAssign
        | TokenKind::DivAssign
        | TokenKind::ModAssign
        | TokenKind::PowAssign
        | TokenKind::XorAssign
        | TokenKind::OrAssign
        | TokenKind::AndAssign
        | TokenKind::LeftAssign
        | TokenKind::RightAssign => NodeKind::Assignment {
            operator: head.kind,
            left: operand(node, 0)?,
            right: operand(node, 1)?,
        },

        TokenKind::ReturnValue => NodeKind::Return(operand(node, 0)?),
        TokenKind::BreakValue => NodeKind::Break(operand(node, 0)?),
        TokenKind::ReturnEmpty => NodeKind::Return(Node::boxed(NodeKind::Empty, location.clone())),
        TokenKind::BreakEmpty => NodeKind::Break(Node::boxed(NodeKind::Empty, location.clone())),

        TokenKind::If => NodeKind::Conditional {
            test: operand(node, 0)?,
            consequent: operand(node, 1)?,
            alternate: None,
        },
        TokenKind::Else => match node.children.first() {
            Some(Child::Node(branch)) if branch.head.kind == TokenKind::If => NodeKind::Conditional {
                test: operand(branch, 0)?,
                consequent: operand(branch, 1)?,
                alternate: Some(operand(node, 1)?),
            },
            _ => return Err(unexpected(head)),
        },

        TokenKind::Do => NodeKind::Loop {
            kind: LoopKind::Do,
            body: operand(node, 0)?,
            test: None,
        },
        TokenKind::WhilePre | TokenKind::UntilPre => NodeKind::Loop {
            kind: if head.kind == TokenKind::WhilePre {
                LoopKind::While
            } else {
                LoopKind::Until
            },
            test: Some(operand(node, 0)?),
            body: operand(node, 1)?,
        },
        TokenKind::WhilePost | TokenKind::UntilPost => match node.children.first() {
            Some(Child::Node(body)) if body.head.kind == TokenKind::Do => NodeKind::Loop {
                kind: if head.kind == TokenKind::WhilePost {
                    LoopKind::DoWhile
                } else {
                    LoopKind::DoUntil
                },
                body: operand(body, 0)?,
                test: Some(operand(node, 1)?),
            },
            _ => return Err(unexpected(head)),
        },

        TokenKind::Closure | TokenKind::Function => NodeKind::Function {
            capturing: head.kind == TokenKind::Closure,
            parameters: Box::new(lower_parameters(node.children.first(), &location)?),
            body: operand(node, 1)?,
        },

        other => NodeKind::Unknown(other.to_string()),
    };

    Ok(Node::new(kind, location))
}

fn lower_parameters(side: Option<&Child>, location: &Location) -> Result<Node, Error> {
    let parameters = match side {
        Some(Child::Node(tuple)) if tuple.head.kind == TokenKind::TupleOpen => {
            if tuple.children.is_empty() {
                vec![]
            } else if is_split(&tuple.children, TokenKind::ArgDelimit) {
                tuple
                    .children
                    .iter()
                    .filter_map(Child::as_node)
                    .map(|group| lower_sequence(&group.children, &group.head.location))
                    .collect::<Result<_, _>>()?
            } else {
                lower_statements(&tuple.children, &tuple.head.location)?
            }
        }
        Some(child) => vec![lower_child(child)?],
        None => vec![],
    };

    Ok(Node::new(NodeKind::ParameterList(parameters), location.clone()))
}

fn number_error(token: &Token) -> Error {
    Error::at_token(
        ErrorImpl::NumberParseError {
            token: token.text.clone(),
        },
        token,
    )
}

fn parse_integer(token: &Token) -> Result<f64, Error> {
    let text = token.text.as_str();
    let (digits, radix) = match text.get(..2) {
        Some("0x" | "0X") => (&text[2..], 16),
        Some("0b" | "0B") => (&text[2..], 2),
        Some("0o" | "0O") => (&text[2..], 8),
        _ => (text, 10),
    };

    u64::from_str_radix(digits, radix)
        .map(|n| n as f64)
        .map_err(|_| number_error(token))
}

/// Strips `width` quote characters from both ends of a literal.
fn inner(text: &str, width: usize) -> &str {
    text.get(width..text.len().saturating_sub(width)).unwrap_or_default()
}

fn parse_literal(token: &Token) -> Result<Value, Error> {
    match token.kind {
        TokenKind::Int => parse_integer(token).map(Value::Number),
        TokenKind::Frac => token
            .text
            .parse::<f64>()
            .map(Value::Number)
            .map_err(|_| number_error(token)),
        TokenKind::Str | TokenKind::Char => Ok(Value::String(unescape(inner(&token.text, 1)))),
        TokenKind::StrNoEsc => Ok(Value::String(inner(&token.text, 3).to_string())),
        TokenKind::Bool => Ok(Value::Boolean(token.text == "true")),
        _ => Err(unexpected(token)),
    }
}

/// Resolves backslash escapes. Unknown escapes keep their backslash.
pub fn unescape(literal: &str) -> String {
    let mut result = String::new();
    let mut chars = literal.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }

        match chars.peek().copied() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some('0') => result.push('\0'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('\'') => result.push('\''),
            Some('x') => {
                chars.next();
                let mut hex = String::new();
                while hex.len() < 2 {
                    match chars.peek() {
                        Some(c) if c.is_ascii_hexdigit() => {
                            hex.push(*c);
                            chars.next();
                        }
                        _ => break,
                    }
                }

                match u8::from_str_radix(&hex, 16) {
                    Ok(byte) => result.push(byte as char),
                    Err(_) => {
                        result.push_str("\\x");
                        result.push_str(&hex);
                    }
                }
                continue;
            }
            Some(_) => {
                result.push(ch);
                continue;
            }
            None => {
                result.push(ch);
                break;
            }
        }
        chars.next();
    }

    result
}
