//! Basic lexing functionality for IMP integer literals.

use nom::{character::complete::digit1, Parser};

use super::{token::Token, LexResult};

/// Parses a [`Tag::Int`](super::token::Tag::Int) token from `input`.
///
/// The digits are kept as text; conversion to a concrete integer type happens
/// in the grammar, which knows which type the program is evaluated with.
pub fn int(input: &str) -> LexResult<'_> {
    digit1
        .parse(input)
        .map(|(tail, digits)| (tail, Some(Token::int(digits))))
}
