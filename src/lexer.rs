//! Simple lexer for `.imp` files.
//!
//! Tokenization walks the source once, trying an ordered list of rules at the
//! current offset and keeping the first one that matches. Whitespace and `#`
//! comments match but produce no token. If no rule matches, tokenization halts
//! with a [`LexError`] and the parser never sees the offending input.

use nom::{
    branch::alt,
    character::complete::{char, multispace1, not_line_ending},
    combinator::{recognize, value},
    sequence::preceded,
    IResult, Parser,
};
use thiserror::Error;

use token::Token;

pub mod int;
pub mod symbol;
pub mod token;
pub mod word;

/// The general return type for [`crate::lexer`] rules.
///
/// A rule producing `None` matched trivia (whitespace or a comment).
pub type LexResult<'src> = IResult<&'src str, Option<Token<'src>>>;

/// The error produced when the source contains a character no rule accepts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("illegal character {character:?} at line {line}, column {column}")]
pub struct LexError {
    /// The offending character.
    pub character: char,
    /// The 1-based line of `character`.
    pub line: usize,
    /// The 1-based column (in characters) of `character`.
    pub column: usize,
}

impl LexError {
    /// Constructs the error for the character at byte `offset` in `source`.
    fn at(source: &str, offset: usize) -> Self {
        let consumed = &source[..offset];
        let line_start = consumed.rfind('\n').map_or(0, |i| i + 1);

        Self {
            character: source[offset..].chars().next().unwrap_or('\0'),
            line: consumed.matches('\n').count() + 1,
            column: consumed[line_start..].chars().count() + 1,
        }
    }
}

/// Splits the entirety of `source` into [`Token`]s.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        let (tail, token) =
            rule(rest).map_err(|_| LexError::at(source, source.len() - rest.len()))?;
        tokens.extend(token);
        rest = tail;
    }

    Ok(tokens)
}

/// Tries every rule at the head of `input`, in order.
fn rule(input: &str) -> LexResult<'_> {
    alt((trivia, symbol::glyph, int::int, word::word)).parse(input)
}

/// Parses whitespace or a `#` comment running to the end of the line.
fn trivia(input: &str) -> LexResult<'_> {
    value(
        None,
        alt((
            multispace1,
            recognize(preceded(char('#'), not_line_ending)),
        )),
    )
    .parse(input)
}
