//! Utility macros for the compiler.
//!
//! This module defines helper macros used throughout the compiler:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_PATTERN!` - Creates a catalog entry matched by an anchored regex
//! - `MK_KEYWORD!` - Creates a catalog entry matched by a whole word
//!
//! These macros reduce boilerplate in the token catalog.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The matched source text
/// * `$location` - The source location
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Int, "42".to_string(), location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $location:expr) => {
        Token {
            kind: $kind,
            text: $text,
            location: $location,
        }
    };
}

/// Creates a catalog entry for a regex pattern.
///
/// The pattern must be anchored with `^` so it only matches at the cursor.
///
/// # Example
///
/// ```ignore
/// MK_PATTERN!(TokenKind::Add, r"^\+")
/// ```
#[macro_export]
macro_rules! MK_PATTERN {
    ($kind:expr, $regex:literal) => {
        TokenSpec {
            kind: $kind,
            matcher: Matcher::Pattern(Regex::new($regex).unwrap()),
        }
    };
}

/// Creates a catalog entry for a reserved word.
#[macro_export]
macro_rules! MK_KEYWORD {
    ($kind:expr, $word:literal) => {
        TokenSpec {
            kind: $kind,
            matcher: Matcher::Keyword($word),
        }
    };
}
