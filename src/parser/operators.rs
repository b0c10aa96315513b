use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Category, TokenKind},
};

use super::{
    lookups::{candidates, operator_info, Associativity, OperatorInfo, Tier},
    node::{Child, ParseNode},
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

/// Whether `child` is an operator that needs an operand on `side`.
/// An unresolved ambiguous token only counts when all of its candidates do.
fn is_hungry(child: &Child, side: Side) -> bool {
    let Child::Token(token) = child else {
        return false;
    };

    let wants = |kind: TokenKind| {
        operator_info(kind).is_some_and(|info| match side {
            Side::Left => info.wants_left(),
            Side::Right => info.wants_right(),
        })
    };

    match token.category() {
        Category::Operator => wants(token.kind),
        Category::Ambiguous => candidates(token.kind).iter().all(|kind| wants(*kind)),
        _ => false,
    }
}

/// A candidate fits at `index` when every operand slot exists and the
/// neighbour in that slot is not an operator reaching back for it.
fn accepts(children: &[Child], index: usize, candidate: TokenKind) -> bool {
    let Some(info) = operator_info(candidate) else {
        return false;
    };

    info.offsets.iter().all(|offset| {
        let Some(neighbour) = index
            .checked_add_signed(*offset)
            .and_then(|position| children.get(position))
        else {
            return false;
        };

        if *offset < 0 {
            !is_hungry(neighbour, Side::Right)
        } else {
            !is_hungry(neighbour, Side::Left)
        }
    })
}

fn resolve_level(children: &mut [Child]) -> Result<(), Error> {
    for index in 0..children.len() {
        let Child::Token(token) = &children[index] else {
            continue;
        };
        if token.category() != Category::Ambiguous {
            continue;
        }

        let level: &[Child] = children;
        let choice = candidates(token.kind)
            .iter()
            .copied()
            .find(|candidate| accepts(level, index, *candidate));

        match choice {
            Some(kind) => {
                let resolved = token.resolve(kind);
                children[index] = Child::Token(resolved);
            }
            None => {
                return Err(Error::at_token(
                    ErrorImpl::UnexpectedToken {
                        token: token.text.clone(),
                    },
                    token,
                ))
            }
        }
    }

    Ok(())
}

/// Replaces every ambiguous token in the tree with its first fitting
/// candidate, children before parents and left to right within a level.
pub fn resolve_ambiguous(node: &mut ParseNode) -> Result<(), Error> {
    for child in node.children.iter_mut() {
        if let Child::Node(inner) = child {
            resolve_ambiguous(inner)?;
        }
    }

    resolve_level(&mut node.children)
}

/// Operator info for a bare operator token that never consumes a left
/// operand.
fn right_only_operator(child: &Child) -> Option<OperatorInfo> {
    child
        .as_token()
        .filter(|token| token.category() == Category::Operator)
        .and_then(|token| operator_info(token.kind))
        .filter(|info| !info.wants_left())
}

/// Collapses the operator at `index` with its operands into one node.
/// Returns the position the new node was inserted at.
fn collapse_at(children: &mut Vec<Child>, index: usize, info: OperatorInfo) -> Result<usize, Error> {
    let Some(operator) = children[index].as_token().cloned() else {
        return Ok(index);
    };

    let mut positions = Vec::with_capacity(info.offsets.len());
    for offset in info.offsets {
        let slot = index
            .checked_add_signed(*offset)
            .filter(|position| *position < children.len());

        // A looser operator on the right that takes nothing from its left,
        // such as `break 1` in `if c break 1`, becomes the operand
        if let Some(slot) = slot.filter(|_| *offset > 0) {
            if let Some(inner) = right_only_operator(&children[slot]) {
                collapse_at(children, slot, inner)?;
            }
        }

        let position = slot.filter(|position| !children[*position].is_bare_operator());

        match position {
            Some(position) => positions.push(position),
            None => {
                return Err(Error::at_token(
                    ErrorImpl::MissingOperand {
                        operator: operator.kind.to_string(),
                    },
                    &operator,
                ))
            }
        }
    }

    let lo = positions.iter().copied().fold(index, usize::min);
    let hi = positions.iter().copied().fold(index, usize::max);

    let mut span: Vec<Option<Child>> = children.drain(lo..=hi).map(Some).collect();
    let operands = positions
        .iter()
        .filter_map(|position| span[position - lo].take())
        .collect();

    children.insert(lo, Child::Node(ParseNode::new(operator, operands)));
    Ok(lo)
}

fn tier_operator(child: &Child, tier: Tier) -> Option<OperatorInfo> {
    child
        .as_token()
        .and_then(|token| operator_info(token.kind))
        .filter(|info| info.tier == tier)
}

/// Collapses every operator of `tier` on one level, scanning in the
/// direction of the tier's associativity.
pub fn collapse_tier(children: &mut Vec<Child>, tier: Tier) -> Result<(), Error> {
    match tier.associativity() {
        Associativity::Left => {
            let mut index = 0;
            while index < children.len() {
                if let Some(info) = tier_operator(&children[index], tier) {
                    index = collapse_at(children, index, info)?;
                }
                index += 1;
            }
        }
        Associativity::Right => {
            let mut index = children.len();
            while index > 0 {
                index -= 1;
                if let Some(info) = tier_operator(&children[index], tier) {
                    index = collapse_at(children, index, info)?;
                }
            }
        }
    }

    Ok(())
}

/// Builds operator nodes across the tree, children first, one tier at a
/// time from the tightest to the loosest.
pub fn collapse_operators(node: &mut ParseNode) -> Result<(), Error> {
    for child in node.children.iter_mut() {
        if let Child::Node(inner) = child {
            collapse_operators(inner)?;
        }
    }

    for tier in Tier::ALL {
        collapse_tier(&mut node.children, tier)?;
    }

    Ok(())
}
