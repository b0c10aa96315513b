use std::sync::Arc;

use tracing::debug;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Location, MK_TOKEN,
};

use super::tokens::{Category, Token, TokenKind, TOKEN_CATALOG};

/// Cursor over the source text. Tracks enough state to build a
/// [`Location`] for every token without rescanning the input.
pub struct Lexer<'a> {
    tokens: Vec<Token>,
    source: &'a str,
    pos: usize,
    line: usize,
    line_start: usize,
    file: Arc<String>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Option<String>) -> Lexer<'a> {
        let file_name = Arc::new(file.unwrap_or_else(|| String::from("shell")));

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            line_start: 0,
            file: file_name,
        }
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn location(&self) -> Location {
        Location::new(self.source, Arc::clone(&self.file), self.pos, self.line, self.line_start)
    }

    /// Moves the cursor past `n` bytes, counting the line breaks crossed.
    pub fn advance_n(&mut self, n: usize) {
        let consumed = &self.source[self.pos..self.pos + n];
        for (offset, c) in consumed.char_indices() {
            if c == '\n' {
                self.line += 1;
                self.line_start = self.pos + offset + 1;
            }
        }
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    /// Matches one catalog entry at the cursor and records it.
    /// Returns the kind that matched.
    fn step(&mut self) -> Result<TokenKind, Error> {
        let rest = self.remainder();

        for spec in TOKEN_CATALOG.iter() {
            let Some(outcome) = spec.try_match(rest) else {
                continue;
            };

            let location = self.location();
            return match outcome {
                Ok(length) => {
                    let text = rest[..length].to_string();
                    self.push(MK_TOKEN!(spec.kind, text, location));
                    self.advance_n(length);
                    Ok(spec.kind)
                }
                Err(error) => {
                    let text = rest.chars().next().map(String::from).unwrap_or_default();
                    Err(Error::at_token(error, &MK_TOKEN!(spec.kind, text, location)))
                }
            };
        }

        // The catch-all entry matches any non-empty input and the
        // sentinel matches the empty one, so the catalog never runs dry.
        Err(Error::new(
            ErrorImpl::UnrecognisedToken {
                token: rest.chars().take(1).collect(),
            },
            self.location(),
        ))
    }
}

/// Tokenizes `source` into the complete, lossless token stream, discarded
/// whitespace and comments included. The last token is always `EOF`.
pub fn scan(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while lex.step()? != TokenKind::Eof {}

    debug!(file = %lex.file, tokens = lex.tokens.len(), "scanned source");
    Ok(lex.tokens)
}

/// Tokenizes `source` into the tokens the parser consumes.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let tokens: Vec<Token> = scan(source, file)?
        .into_iter()
        .filter(|token| token.category() != Category::Discard)
        .collect();

    debug!(tokens = tokens.len(), "tokenized source");
    Ok(tokens)
}
