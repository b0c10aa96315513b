use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::lexer::tokens::TokenKind;

/// Precedence tiers from the tightest binding to the loosest.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Tier {
    PostfixAccess,
    Prefix,
    Power,
    Multiplicative,
    Additive,
    Bitshift,
    Range,
    Relational,
    Equality,
    BitAnd,
    BitXor,
    BitOr,
    LogicalAnd,
    LogicalXor,
    LogicalOr,
    Branch,
    Alternate,
    Function,
    Assignment,
    Each,
    Control,
}

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Associativity {
    Left,
    Right,
}

impl Tier {
    /// Every tier in collapsing order.
    pub const ALL: [Tier; 21] = [
        Tier::PostfixAccess,
        Tier::Prefix,
        Tier::Power,
        Tier::Multiplicative,
        Tier::Additive,
        Tier::Bitshift,
        Tier::Range,
        Tier::Relational,
        Tier::Equality,
        Tier::BitAnd,
        Tier::BitXor,
        Tier::BitOr,
        Tier::LogicalAnd,
        Tier::LogicalXor,
        Tier::LogicalOr,
        Tier::Branch,
        Tier::Alternate,
        Tier::Function,
        Tier::Assignment,
        Tier::Each,
        Tier::Control,
    ];

    pub fn associativity(&self) -> Associativity {
        match self {
            Tier::Prefix
            | Tier::Branch
            | Tier::Alternate
            | Tier::Function
            | Tier::Assignment
            | Tier::Control => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

/// Where an operator sits and which neighbours it consumes.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct OperatorInfo {
    pub tier: Tier,
    /// Operand positions relative to the operator, in the order the
    /// operands appear in the collapsed node.
    pub offsets: &'static [isize],
}

impl OperatorInfo {
    pub fn wants_left(&self) -> bool {
        self.offsets.iter().any(|offset| *offset < 0)
    }

    pub fn wants_right(&self) -> bool {
        self.offsets.iter().any(|offset| *offset > 0)
    }
}

const POSTFIX: &[isize] = &[-1];
const PREFIX: &[isize] = &[1];
const BINARY: &[isize] = &[-1, 1];
const BRANCH: &[isize] = &[1, 2];
const NULLARY: &[isize] = &[];

pub type OperatorLookup = HashMap<TokenKind, OperatorInfo>;
pub type AmbiguousLookup = HashMap<TokenKind, &'static [TokenKind]>;

lazy_static! {
    static ref OPERATOR_LOOKUP: OperatorLookup = create_operator_lookups();
    static ref AMBIGUOUS_LOOKUP: AmbiguousLookup = create_ambiguous_lookups();
}

fn operator(lookup: &mut OperatorLookup, kind: TokenKind, tier: Tier, offsets: &'static [isize]) {
    lookup.insert(kind, OperatorInfo { tier, offsets });
}

pub fn create_operator_lookups() -> OperatorLookup {
    let mut lookup = HashMap::new();

    // Postfix and access
    operator(&mut lookup, TokenKind::DecPost, Tier::PostfixAccess, POSTFIX);
    operator(&mut lookup, TokenKind::IncPost, Tier::PostfixAccess, POSTFIX);
    operator(&mut lookup, TokenKind::Maybe, Tier::PostfixAccess, POSTFIX);
    operator(&mut lookup, TokenKind::Ref, Tier::PostfixAccess, POSTFIX);
    operator(&mut lookup, TokenKind::MaybeAccess, Tier::PostfixAccess, BINARY);
    operator(&mut lookup, TokenKind::Access, Tier::PostfixAccess, BINARY);
    operator(&mut lookup, TokenKind::Cast, Tier::PostfixAccess, BINARY);

    // Prefix
    operator(&mut lookup, TokenKind::DecPre, Tier::Prefix, PREFIX);
    operator(&mut lookup, TokenKind::IncPre, Tier::Prefix, PREFIX);
    operator(&mut lookup, TokenKind::Neg, Tier::Prefix, PREFIX);
    operator(&mut lookup, TokenKind::Not, Tier::Prefix, PREFIX);
    operator(&mut lookup, TokenKind::BitNot, Tier::Prefix, PREFIX);
    operator(&mut lookup, TokenKind::Deref, Tier::Prefix, PREFIX);

    // Arithmetic
    operator(&mut lookup, TokenKind::Pow, Tier::Power, BINARY);
    operator(&mut lookup, TokenKind::Mul, Tier::Multiplicative, BINARY);
    operator(&mut lookup, TokenKind::Div, Tier::Multiplicative, BINARY);
    operator(&mut lookup, TokenKind::Mod, Tier::Multiplicative, BINARY);
    operator(&mut lookup, TokenKind::Add, Tier::Additive, BINARY);
    operator(&mut lookup, TokenKind::Sub, Tier::Additive, BINARY);
    operator(&mut lookup, TokenKind::BitLeft, Tier::Bitshift, BINARY);
    operator(&mut lookup, TokenKind::BitRight, Tier::Bitshift, BINARY);

    // Ranges
    operator(&mut lookup, TokenKind::RangeFull, Tier::Range, BINARY);
    operator(&mut lookup, TokenKind::RangeInf, Tier::Range, POSTFIX);
    operator(&mut lookup, TokenKind::RangeNegInf, Tier::Range, PREFIX);

    // Comparison
    operator(&mut lookup, TokenKind::Lt, Tier::Relational, BINARY);
    operator(&mut lookup, TokenKind::Gt, Tier::Relational, BINARY);
    operator(&mut lookup, TokenKind::LtEq, Tier::Relational, BINARY);
    operator(&mut lookup, TokenKind::GtEq, Tier::Relational, BINARY);
    operator(&mut lookup, TokenKind::Eq, Tier::Equality, BINARY);
    operator(&mut lookup, TokenKind::Neq, Tier::Equality, BINARY);

    // Bitwise and logical
    operator(&mut lookup, TokenKind::BitAnd, Tier::BitAnd, BINARY);
    operator(&mut lookup, TokenKind::BitXor, Tier::BitXor, BINARY);
    operator(&mut lookup, TokenKind::BitOr, Tier::BitOr, BINARY);
    operator(&mut lookup, TokenKind::And, Tier::LogicalAnd, BINARY);
    operator(&mut lookup, TokenKind::Xor, Tier::LogicalXor, BINARY);
    operator(&mut lookup, TokenKind::Or, Tier::LogicalOr, BINARY);

    // Control flow
    operator(&mut lookup, TokenKind::If, Tier::Branch, BRANCH);
    operator(&mut lookup, TokenKind::WhilePre, Tier::Branch, BRANCH);
    operator(&mut lookup, TokenKind::UntilPre, Tier::Branch, BRANCH);
    operator(&mut lookup, TokenKind::Do, Tier::Branch, PREFIX);
    operator(&mut lookup, TokenKind::Else, Tier::Alternate, BINARY);
    operator(&mut lookup, TokenKind::WhilePost, Tier::Alternate, BINARY);
    operator(&mut lookup, TokenKind::UntilPost, Tier::Alternate, BINARY);

    // Functions
    operator(&mut lookup, TokenKind::Closure, Tier::Function, BINARY);
    operator(&mut lookup, TokenKind::Function, Tier::Function, BINARY);

    // Assignment
    for kind in [
        TokenKind::Assign,
        TokenKind::AddAssign,
        TokenKind::SubAssign,
        TokenKind::MulAssign,
        TokenKind::DivAssign,
        TokenKind::ModAssign,
        TokenKind::PowAssign,
        TokenKind::XorAssign,
        TokenKind::OrAssign,
        TokenKind::AndAssign,
        TokenKind::LeftAssign,
        TokenKind::RightAssign,
    ] {
        operator(&mut lookup, kind, Tier::Assignment, BINARY);
    }

    operator(&mut lookup, TokenKind::Each, Tier::Each, BINARY);

    operator(&mut lookup, TokenKind::ReturnValue, Tier::Control, PREFIX);
    operator(&mut lookup, TokenKind::ReturnEmpty, Tier::Control, NULLARY);
    operator(&mut lookup, TokenKind::BreakValue, Tier::Control, PREFIX);
    operator(&mut lookup, TokenKind::BreakEmpty, Tier::Control, NULLARY);

    lookup
}

pub fn create_ambiguous_lookups() -> AmbiguousLookup {
    let mut lookup: AmbiguousLookup = HashMap::new();

    // Candidates are listed in tier order, tightest first
    lookup.insert(TokenKind::MinMin, &[TokenKind::DecPost, TokenKind::DecPre]);
    lookup.insert(TokenKind::PlusPlus, &[TokenKind::IncPost, TokenKind::IncPre]);
    lookup.insert(
        TokenKind::DotDot,
        &[TokenKind::RangeFull, TokenKind::RangeInf, TokenKind::RangeNegInf],
    );
    lookup.insert(TokenKind::While, &[TokenKind::WhilePre, TokenKind::WhilePost]);
    lookup.insert(TokenKind::Until, &[TokenKind::UntilPre, TokenKind::UntilPost]);
    lookup.insert(TokenKind::Return, &[TokenKind::ReturnValue, TokenKind::ReturnEmpty]);
    lookup.insert(TokenKind::Break, &[TokenKind::BreakValue, TokenKind::BreakEmpty]);

    lookup
}

pub fn operator_info(kind: TokenKind) -> Option<OperatorInfo> {
    OPERATOR_LOOKUP.get(&kind).copied()
}

/// The concrete kinds an ambiguous token may resolve to. Empty for
/// anything that is not ambiguous.
pub fn candidates(kind: TokenKind) -> &'static [TokenKind] {
    AMBIGUOUS_LOOKUP.get(&kind).copied().unwrap_or(&[])
}
