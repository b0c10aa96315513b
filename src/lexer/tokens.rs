use lazy_static::lazy_static;
use regex::Regex;
use std::fmt::Display;

use crate::{errors::errors::ErrorImpl, parser::lookups::operator_info, Location, MK_KEYWORD, MK_PATTERN};

lazy_static! {
    /// Every token the language knows, in priority order.
    ///
    /// The tokenizer takes the first entry that matches, not the longest one,
    /// so longer spellings sit above their prefixes (`**=` above `**` above `*`).
    pub static ref TOKEN_CATALOG: Vec<TokenSpec> = vec![
        // Comments
        MK_PATTERN!(TokenKind::Comment, r"^//[^\n]*"),
        TokenSpec { kind: TokenKind::Comment, matcher: Matcher::Custom(match_block_comment) },

        // Literals
        MK_PATTERN!(TokenKind::StrNoEsc, r#"^"""(?s:.*?)""""#),
        TokenSpec { kind: TokenKind::Unterminated, matcher: Matcher::Custom(match_unterminated_str_no_esc) },
        MK_PATTERN!(TokenKind::Str, r#"^"(?:[^"\\]|\\(?s:.))*""#),
        MK_PATTERN!(TokenKind::Char, r"^'(?:[^'\\]|\\(?s:.))*'"),
        MK_PATTERN!(TokenKind::Frac, r"^(?:[0-9]+\.[0-9]+|\.[0-9]+)"),
        MK_PATTERN!(TokenKind::Int, r"^0[xX][0-9a-fA-F]+"),
        MK_PATTERN!(TokenKind::Int, r"^0[bB][01]+"),
        MK_PATTERN!(TokenKind::Int, r"^0[oO][0-7]+"),
        MK_PATTERN!(TokenKind::Int, r"^[0-9]+"),

        // Reserved words
        MK_KEYWORD!(TokenKind::Bool, "true"),
        MK_KEYWORD!(TokenKind::Bool, "false"),
        MK_KEYWORD!(TokenKind::If, "if"),
        MK_KEYWORD!(TokenKind::Else, "else"),
        MK_KEYWORD!(TokenKind::Do, "do"),
        MK_KEYWORD!(TokenKind::While, "while"),
        MK_KEYWORD!(TokenKind::Until, "until"),
        MK_KEYWORD!(TokenKind::Return, "return"),
        MK_KEYWORD!(TokenKind::Break, "break"),

        // Assignment
        MK_PATTERN!(TokenKind::PowAssign, r"^\*\*="),
        MK_PATTERN!(TokenKind::LeftAssign, r"^<<="),
        MK_PATTERN!(TokenKind::RightAssign, r"^>>="),
        MK_PATTERN!(TokenKind::AddAssign, r"^\+="),
        MK_PATTERN!(TokenKind::SubAssign, r"^-="),
        MK_PATTERN!(TokenKind::MulAssign, r"^\*="),
        MK_PATTERN!(TokenKind::DivAssign, r"^/="),
        MK_PATTERN!(TokenKind::ModAssign, r"^%="),
        MK_PATTERN!(TokenKind::XorAssign, r"^\^="),
        MK_PATTERN!(TokenKind::OrAssign, r"^\|="),
        MK_PATTERN!(TokenKind::AndAssign, r"^&="),
        MK_PATTERN!(TokenKind::Eq, r"^=="),
        MK_PATTERN!(TokenKind::Function, r"^=>"),
        MK_PATTERN!(TokenKind::Assign, r"^="),
        MK_PATTERN!(TokenKind::Closure, r"^->"),

        // Context dependent
        MK_PATTERN!(TokenKind::MinMin, r"^--"),
        MK_PATTERN!(TokenKind::PlusPlus, r"^\+\+"),
        MK_PATTERN!(TokenKind::DotDot, r"^\.\."),

        // Arithmetic, logic and comparison
        MK_PATTERN!(TokenKind::Neg, r"^`"),
        MK_PATTERN!(TokenKind::Sub, r"^-"),
        MK_PATTERN!(TokenKind::Add, r"^\+"),
        MK_PATTERN!(TokenKind::Pow, r"^\*\*"),
        MK_PATTERN!(TokenKind::Div, r"^/"),
        MK_PATTERN!(TokenKind::Mul, r"^\*"),
        MK_PATTERN!(TokenKind::Mod, r"^%"),
        MK_PATTERN!(TokenKind::Neq, r"^!="),
        MK_PATTERN!(TokenKind::Not, r"^!"),
        MK_PATTERN!(TokenKind::And, r"^&&"),
        MK_PATTERN!(TokenKind::Or, r"^\|\|"),
        MK_PATTERN!(TokenKind::Xor, r"^\^\^"),
        MK_PATTERN!(TokenKind::BitXor, r"^\^"),
        MK_PATTERN!(TokenKind::BitOr, r"^\|"),
        MK_PATTERN!(TokenKind::BitAnd, r"^&"),
        MK_PATTERN!(TokenKind::BitNot, r"^~"),
        MK_PATTERN!(TokenKind::BitLeft, r"^<<"),
        MK_PATTERN!(TokenKind::BitRight, r"^>>"),
        MK_PATTERN!(TokenKind::GtEq, r"^>="),
        MK_PATTERN!(TokenKind::LtEq, r"^<="),
        MK_PATTERN!(TokenKind::Lt, r"^<"),
        MK_PATTERN!(TokenKind::Gt, r"^>"),

        // References and access
        MK_PATTERN!(TokenKind::Ref, r"^@\?"),
        MK_PATTERN!(TokenKind::Deref, r"^@"),
        MK_PATTERN!(TokenKind::MaybeAccess, r"^\?\."),
        MK_PATTERN!(TokenKind::Access, r"^\."),
        MK_PATTERN!(TokenKind::Maybe, r"^\?"),
        MK_PATTERN!(TokenKind::Cast, r"^::"),
        MK_PATTERN!(TokenKind::Each, r"^:"),

        // Separators
        MK_PATTERN!(TokenKind::BlockOpen, r"^\{"),
        MK_PATTERN!(TokenKind::TupleOpen, r"^\("),
        MK_PATTERN!(TokenKind::ListOpen, r"^\["),
        MK_PATTERN!(TokenKind::BlockClose, r"^\}"),
        MK_PATTERN!(TokenKind::TupleClose, r"^\)"),
        MK_PATTERN!(TokenKind::ListClose, r"^\]"),
        MK_PATTERN!(TokenKind::ArgDelimit, r"^,"),
        MK_PATTERN!(TokenKind::ExpDelimit, r"^;+"),

        MK_PATTERN!(TokenKind::Whitespace, r"^\s+"),

        TokenSpec { kind: TokenKind::Eof, matcher: Matcher::Custom(match_end_of_input) },
        MK_PATTERN!(TokenKind::Identifier, r"^[a-zA-Z_$][\w$]*"),

        // Errors
        TokenSpec { kind: TokenKind::Unterminated, matcher: Matcher::Custom(match_unterminated_str) },
        TokenSpec { kind: TokenKind::Unterminated, matcher: Matcher::Custom(match_unterminated_char) },
        TokenSpec { kind: TokenKind::Unknown, matcher: Matcher::Custom(match_unknown) },
    ];
}

/// Outcome of a matcher: `None` when it does not apply, otherwise the
/// consumed length or a fatal lexical error.
pub type MatchResult = Option<Result<usize, ErrorImpl>>;

pub enum Matcher {
    Pattern(Regex),
    Keyword(&'static str),
    Custom(fn(&str) -> MatchResult),
}

pub struct TokenSpec {
    pub kind: TokenKind,
    pub matcher: Matcher,
}

impl TokenSpec {
    pub fn try_match(&self, rest: &str) -> MatchResult {
        match &self.matcher {
            Matcher::Pattern(regex) => regex.find(rest).map(|found| Ok(found.end())),
            Matcher::Keyword(word) => {
                let after = rest.strip_prefix(word)?;
                let boundary = after.chars().next().map_or(true, |c| !is_identifier_char(c));
                boundary.then_some(Ok(word.len()))
            }
            Matcher::Custom(matcher) => matcher(rest),
        }
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn match_block_comment(rest: &str) -> MatchResult {
    if !rest.starts_with("/*") {
        return None;
    }

    let bytes = rest.as_bytes();
    let mut depth = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i..].starts_with(b"/*") {
            depth += 1;
            i += 2;
        } else if bytes[i..].starts_with(b"*/") {
            depth -= 1;
            i += 2;
            if depth == 0 {
                return Some(Ok(i));
            }
        } else {
            i += 1;
        }
    }

    // An unclosed comment runs to the end of the input
    Some(Ok(rest.len()))
}

fn match_unterminated_str_no_esc(rest: &str) -> MatchResult {
    rest.starts_with(r#"""""#).then(|| {
        Err(ErrorImpl::UnterminatedLiteral {
            kind: TokenKind::StrNoEsc.to_string(),
        })
    })
}

fn match_unterminated_str(rest: &str) -> MatchResult {
    rest.starts_with('"').then(|| {
        Err(ErrorImpl::UnterminatedLiteral {
            kind: TokenKind::Str.to_string(),
        })
    })
}

fn match_unterminated_char(rest: &str) -> MatchResult {
    rest.starts_with('\'').then(|| {
        Err(ErrorImpl::UnterminatedLiteral {
            kind: TokenKind::Char.to_string(),
        })
    })
}

fn match_end_of_input(rest: &str) -> MatchResult {
    rest.is_empty().then_some(Ok(0))
}

fn match_unknown(rest: &str) -> MatchResult {
    rest.chars().next().map(|c| {
        Err(ErrorImpl::UnrecognisedToken {
            token: c.to_string(),
        })
    })
}

/// The role a token plays before the parser looks at it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Category {
    Discard,
    Literal,
    Identifier,
    Separator,
    Operator,
    Ambiguous,
    Invalid,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    // Discarded
    Whitespace,
    Comment,

    // Literals
    Int,
    Frac,
    Str,
    StrNoEsc,
    Char,
    Bool,

    Identifier,

    // Separators
    BlockOpen,
    TupleOpen,
    ListOpen,
    BlockClose,
    TupleClose,
    ListClose,
    ArgDelimit,
    ExpDelimit,
    Eof,

    // Ambiguous until the parser sees their neighbours
    MinMin,
    PlusPlus,
    DotDot,
    While,
    Until,
    Return,
    Break,

    // Postfix and access
    DecPost,
    IncPost,
    Maybe,
    Ref,
    MaybeAccess,
    Access,
    Cast,

    // Prefix
    DecPre,
    IncPre,
    Neg,
    Not,
    BitNot,
    Deref,

    // Binary
    Pow,
    Mul,
    Div,
    Mod,
    Add,
    Sub,
    BitLeft,
    BitRight,
    RangeFull,
    RangeInf,
    RangeNegInf,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Eq,
    Neq,
    BitAnd,
    BitXor,
    BitOr,
    And,
    Xor,
    Or,

    // Control flow
    If,
    Else,
    Do,
    WhilePre,
    WhilePost,
    UntilPre,
    UntilPost,

    // Functions
    Closure,  // ->
    Function, // =>

    // Assignment
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    PowAssign,
    XorAssign,
    OrAssign,
    AndAssign,
    LeftAssign,
    RightAssign,

    Each,

    ReturnValue,
    ReturnEmpty,
    BreakValue,
    BreakEmpty,

    // Errors
    Unterminated,
    Unknown,
}

impl TokenKind {
    pub fn category(&self) -> Category {
        match self {
            TokenKind::Whitespace | TokenKind::Comment => Category::Discard,
            TokenKind::Int
            | TokenKind::Frac
            | TokenKind::Str
            | TokenKind::StrNoEsc
            | TokenKind::Char
            | TokenKind::Bool => Category::Literal,
            TokenKind::Identifier => Category::Identifier,
            TokenKind::BlockOpen
            | TokenKind::TupleOpen
            | TokenKind::ListOpen
            | TokenKind::BlockClose
            | TokenKind::TupleClose
            | TokenKind::ListClose
            | TokenKind::ArgDelimit
            | TokenKind::ExpDelimit
            | TokenKind::Eof => Category::Separator,
            TokenKind::MinMin
            | TokenKind::PlusPlus
            | TokenKind::DotDot
            | TokenKind::While
            | TokenKind::Until
            | TokenKind::Return
            | TokenKind::Break => Category::Ambiguous,
            TokenKind::Unterminated | TokenKind::Unknown => Category::Invalid,
            kind if operator_info(*kind).is_some() => Category::Operator,
            _ => Category::Invalid,
        }
    }

    pub fn is_block_open(&self) -> bool {
        matches!(self, TokenKind::BlockOpen | TokenKind::TupleOpen | TokenKind::ListOpen)
    }

    pub fn is_block_close(&self) -> bool {
        matches!(self, TokenKind::BlockClose | TokenKind::TupleClose | TokenKind::ListClose)
    }

    /// The closing kind that ends a block opened by `self`.
    pub fn closing(&self) -> Option<TokenKind> {
        match self {
            TokenKind::BlockOpen => Some(TokenKind::BlockClose),
            TokenKind::TupleOpen => Some(TokenKind::TupleClose),
            TokenKind::ListOpen => Some(TokenKind::ListClose),
            _ => None,
        }
    }

    /// Source spelling for separators, the catalog name for everything else.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::BlockOpen => String::from("{"),
            TokenKind::TupleOpen => String::from("("),
            TokenKind::ListOpen => String::from("["),
            TokenKind::BlockClose => String::from("}"),
            TokenKind::TupleClose => String::from(")"),
            TokenKind::ListClose => String::from("]"),
            TokenKind::ArgDelimit => String::from(","),
            TokenKind::ExpDelimit => String::from(";"),
            _ => self.to_string(),
        }
    }
}

impl Display for TokenKind {
    /// Renders the variant in catalog style, `DecPost` as `DEC_POST`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let debug = format!("{:?}", self);
        let mut name = String::with_capacity(debug.len() + 4);
        for (i, c) in debug.chars().enumerate() {
            if c.is_uppercase() && i > 0 {
                name.push('_');
            }
            name.push(c.to_ascii_uppercase());
        }
        write!(f, "{}", name)
    }
}

/// A catalog match bound to its place in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub location: Location,
}

impl Token {
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// Returns a copy of this occurrence reinterpreted as `kind`.
    pub fn resolve(&self, kind: TokenKind) -> Token {
        Token {
            kind,
            text: self.text.clone(),
            location: self.location.clone(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.category() {
            Category::Literal | Category::Identifier => write!(f, "{}({})", self.kind, self.text),
            _ => write!(f, "{}", self.kind),
        }
    }
}
