//! Parsers for the operator and punctuation symbols of an IMP program.
//!
//! Every symbol is tagged [`Tag::Reserved`](super::token::Tag::Reserved). Within
//! each group, longer symbols are tried before any symbol that is their prefix.

use nom::{branch::alt, bytes::complete::tag, IResult, Parser};

use super::{token::Token, LexResult};

/// Parses any non-keyword symbol from `input`.
pub fn glyph(input: &str) -> LexResult<'_> {
    alt((assign, punctuation, relational, arithmetic))
        .parse(input)
        .map(|(tail, text)| (tail, Some(Token::reserved(text))))
}

/// Parses the assignment operator `:=`.
fn assign(input: &str) -> IResult<&str, &str> {
    tag(":=").parse(input)
}

/// Parses a parenthesis or the statement separator `;`.
fn punctuation(input: &str) -> IResult<&str, &str> {
    alt((tag("("), tag(")"), tag(";"))).parse(input)
}

/// Parses one of the comparison operators.
fn relational(input: &str) -> IResult<&str, &str> {
    alt((
        tag("<="),
        tag("<"),
        tag(">="),
        tag(">"),
        tag("=="),
        tag("="),
        tag("!="),
    ))
    .parse(input)
}

/// Parses one of the binary arithmetic operators.
fn arithmetic(input: &str) -> IResult<&str, &str> {
    alt((tag("+"), tag("-"), tag("*"), tag("/"))).parse(input)
}
