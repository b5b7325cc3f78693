//! Keywords and variable names.

use nom::{
    bytes::complete::take_while,
    character::complete::satisfy,
    combinator::recognize,
    sequence::pair,
    Parser,
};

use super::{token::Token, LexResult};

/// The words tagged [`Tag::Reserved`](super::token::Tag::Reserved) rather than
/// [`Tag::Id`](super::token::Tag::Id).
pub const KEYWORDS: [&str; 10] = [
    "and", "or", "not", "if", "then", "else", "while", "do", "end", "print",
];

/// Parses a word, i.e. a latin letter followed by any number of latin letters,
/// digits, and underscores.
///
/// The whole word is matched before it is classified, so `iffy` is a single
/// variable rather than the keyword `if` followed by `fy`.
pub fn word(input: &str) -> LexResult<'_> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
    .map(|(tail, text)| {
        let token = match KEYWORDS.contains(&text) {
            true => Token::reserved(text),
            false => Token::id(text),
        };
        (tail, Some(token))
    })
}
