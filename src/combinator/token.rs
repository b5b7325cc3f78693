//! The primitive parsers, each consuming exactly one [`Token`].

use crate::lexer::token::{Tag, Token};

use super::{NoMatch, ParseResult, Parser};

/// Matches a single token with exactly this text and [`Tag`].
///
/// This is the parser used for keywords and operators, and produces the text
/// of the matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchValue {
    /// The text the token must have.
    value: &'static str,
    /// The tag the token must have.
    tag: Tag,
}

impl MatchValue {
    /// Constructs a new [`MatchValue`].
    pub const fn new(value: &'static str, tag: Tag) -> Self {
        Self { value, tag }
    }
}

impl Parser for MatchValue {
    type Output = String;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        match tokens.get(pos) {
            Some(token) if token.text == self.value && token.tag == self.tag => {
                Ok((pos + 1, token.text.to_owned()))
            }
            _ => Err(NoMatch),
        }
    }
}

/// Matches a single token with this [`Tag`], whatever its text.
///
/// This is the parser used for integer literals and variable names, and
/// produces the text of the matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchTag {
    /// The tag the token must have.
    tag: Tag,
}

impl MatchTag {
    /// Constructs a new [`MatchTag`].
    pub const fn new(tag: Tag) -> Self {
        Self { tag }
    }
}

impl Parser for MatchTag {
    type Output = String;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        match tokens.get(pos) {
            Some(token) if token.tag == self.tag => Ok((pos + 1, token.text.to_owned())),
            _ => Err(NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::token::Tokens;

    use super::*;

    #[test]
    fn check_match_value() {
        let tokens = Tokens::try_from("if x then").unwrap();
        let r#if = MatchValue::new("if", Tag::Reserved);

        assert_eq!(r#if.parse(&tokens, 0), Ok((1, String::from("if"))));
        assert_eq!(r#if.parse(&tokens, 1), Err(NoMatch));
        assert_eq!(r#if.parse(&tokens, 3), Err(NoMatch));

        // the tag must match as well as the text
        let tokens = [Token::id("if")];
        assert_eq!(r#if.parse(&tokens, 0), Err(NoMatch));
    }

    #[test]
    fn check_match_tag() {
        let tokens = Tokens::try_from("x := 42").unwrap();
        let id = MatchTag::new(Tag::Id);
        let int = MatchTag::new(Tag::Int);

        assert_eq!(id.parse(&tokens, 0), Ok((1, String::from("x"))));
        assert_eq!(id.parse(&tokens, 1), Err(NoMatch));
        assert_eq!(int.parse(&tokens, 2), Ok((3, String::from("42"))));
        assert_eq!(int.parse(&tokens, 3), Err(NoMatch));
        assert_eq!(int.parse(&[], 0), Err(NoMatch));
    }
}
