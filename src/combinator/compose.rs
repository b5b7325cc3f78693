//! The general-purpose combinators.

use crate::lexer::token::Token;

use super::{NoMatch, ParseResult, Parser};

/// Runs `left`, then `right` from where `left` stopped.
///
/// Produces the pair of both values, and fails if either parser fails.
#[derive(Debug, Clone, Copy)]
pub struct Sequence<A, B> {
    /// The parser applied first.
    left: A,
    /// The parser applied to the remaining input.
    right: B,
}

impl<A, B> Sequence<A, B> {
    /// Constructs a new [`Sequence`].
    pub fn new(left: A, right: B) -> Self {
        Self { left, right }
    }
}

impl<A: Parser, B: Parser> Parser for Sequence<A, B> {
    type Output = (A::Output, B::Output);

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        let (pos, left) = self.left.parse(tokens, pos)?;
        let (pos, right) = self.right.parse(tokens, pos)?;
        Ok((pos, (left, right)))
    }
}

/// Ordered choice between `first` and `second`.
///
/// `second` is only tried, at the original position, if `first` fails.
#[derive(Debug, Clone, Copy)]
pub struct Alternation<A, B> {
    /// The preferred alternative.
    first: A,
    /// The fallback alternative.
    second: B,
}

impl<A, B> Alternation<A, B> {
    /// Constructs a new [`Alternation`].
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A, B> Parser for Alternation<A, B>
where
    A: Parser,
    B: Parser<Output = A::Output>,
{
    type Output = A::Output;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        self.first
            .parse(tokens, pos)
            .or_else(|_| self.second.parse(tokens, pos))
    }
}

/// Always succeeds, producing `None` without consuming anything when the
/// inner parser fails.
#[derive(Debug, Clone, Copy)]
pub struct Optional<P> {
    /// The optional parser.
    inner: P,
}

impl<P> Optional<P> {
    /// Constructs a new [`Optional`].
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for Optional<P> {
    type Output = Option<P::Output>;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        match self.inner.parse(tokens, pos) {
            Ok((next, value)) => Ok((next, Some(value))),
            Err(NoMatch) => Ok((pos, None)),
        }
    }
}

/// Applies the inner parser until it fails, collecting every value.
///
/// This always succeeds, possibly with an empty [`Vec`]. The inner parser is
/// expected to consume at least one token whenever it succeeds; one that does
/// not will loop forever.
#[derive(Debug, Clone, Copy)]
pub struct ZeroOrMore<P> {
    /// The repeated parser.
    inner: P,
}

impl<P> ZeroOrMore<P> {
    /// Constructs a new [`ZeroOrMore`].
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for ZeroOrMore<P> {
    type Output = Vec<P::Output>;

    fn parse(&self, tokens: &[Token<'_>], mut pos: usize) -> ParseResult<Self::Output> {
        let mut values = Vec::new();

        while let Ok((next, value)) = self.inner.parse(tokens, pos) {
            values.push(value);
            pos = next;
        }

        Ok((pos, values))
    }
}

/// Replaces the value of the inner parser with `f(value)`.
#[derive(Clone, Copy)]
pub struct Map<P, F> {
    /// The parser producing the original value.
    inner: P,
    /// The mapping function.
    f: F,
}

impl<P, F> Map<P, F> {
    /// Constructs a new [`Map`].
    pub fn new(inner: P, f: F) -> Self {
        Self { inner, f }
    }
}

impl<P, F, U> Parser for Map<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        self.inner
            .parse(tokens, pos)
            .map(|(next, value)| (next, (self.f)(value)))
    }
}

/// Like [`Map`], but fails without consuming anything when `f` returns an
/// error.
///
/// This plays the role of [`nom::combinator::map_res`] for token parsers.
#[derive(Clone, Copy)]
pub struct TryMap<P, F> {
    /// The parser producing the original value.
    inner: P,
    /// The fallible mapping function.
    f: F,
}

impl<P, F> TryMap<P, F> {
    /// Constructs a new [`TryMap`].
    pub fn new(inner: P, f: F) -> Self {
        Self { inner, f }
    }
}

impl<P, F, U, E> Parser for TryMap<P, F>
where
    P: Parser,
    F: Fn(P::Output) -> Result<U, E>,
{
    type Output = U;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        let (next, value) = self.inner.parse(tokens, pos)?;
        (self.f)(value).map(|value| (next, value)).map_err(|_| NoMatch)
    }
}

/// Succeeds only if the inner parser succeeds and consumes every token.
///
/// This is the top-level parser of a program, rejecting input that would only
/// match with trailing garbage left over.
#[derive(Debug, Clone, Copy)]
pub struct WholeInput<P> {
    /// The parser that must consume the input.
    inner: P,
}

impl<P> WholeInput<P> {
    /// Constructs a new [`WholeInput`].
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

impl<P: Parser> Parser for WholeInput<P> {
    type Output = P::Output;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        match self.inner.parse(tokens, pos)? {
            (next, value) if next == tokens.len() => Ok((next, value)),
            _ => Err(NoMatch),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        combinator::{MatchTag, MatchValue},
        lexer::token::{Tag, Tokens},
    };

    use super::*;

    fn keyword(kw: &'static str) -> MatchValue {
        MatchValue::new(kw, Tag::Reserved)
    }

    #[test]
    fn check_sequence() {
        let tokens = Tokens::try_from("x := 1").unwrap();
        let assign = MatchTag::new(Tag::Id)
            .then(keyword(":="))
            .then(MatchTag::new(Tag::Int));

        let (pos, ((name, _), value)) = assign.parse(&tokens, 0).unwrap();
        assert_eq!(pos, 3);
        assert_eq!(name, "x");
        assert_eq!(value, "1");

        // failure on the right fails the whole sequence
        let tokens = Tokens::try_from("x := y").unwrap();
        assert_eq!(assign.parse(&tokens, 0), Err(NoMatch));
    }

    #[test]
    fn check_alternation() {
        let tokens = Tokens::try_from("+ - *").unwrap();
        let additive = keyword("+").or(keyword("-"));

        assert_eq!(additive.parse(&tokens, 0), Ok((1, String::from("+"))));
        assert_eq!(additive.parse(&tokens, 1), Ok((2, String::from("-"))));
        assert_eq!(additive.parse(&tokens, 2), Err(NoMatch));

        // the second branch starts from the original position, not from
        // wherever the first branch got to before failing
        let tokens = Tokens::try_from("x y").unwrap();
        let pair = MatchTag::new(Tag::Id)
            .then(MatchTag::new(Tag::Int))
            .map(|(a, _)| a)
            .or(MatchTag::new(Tag::Id));
        assert_eq!(pair.parse(&tokens, 0), Ok((1, String::from("x"))));
    }

    #[test]
    fn optional_never_fails() {
        let tokens = Tokens::try_from("else x end").unwrap();
        let r#else = keyword("else").opt();

        for pos in 0..=tokens.len() + 1 {
            let (next, value) = r#else.parse(&tokens, pos).unwrap();
            match pos {
                0 => assert_eq!((next, value), (1, Some(String::from("else")))),
                _ => assert_eq!((next, value), (pos, None)),
            }
        }
    }

    #[test]
    fn zero_or_more_never_fails() {
        let tokens = Tokens::try_from("a b c 1 d").unwrap();
        let ids = MatchTag::new(Tag::Id).repeat();

        let first = ids.parse(&tokens, 0);
        assert_eq!(
            first,
            Ok((
                3,
                vec![String::from("a"), String::from("b"), String::from("c")]
            ))
        );
        // repeated invocations are deterministic
        assert_eq!(ids.parse(&tokens, 0), first);

        for pos in 0..=tokens.len() {
            let (next, _) = ids.parse(&tokens, pos).unwrap();
            assert!(next >= pos);
        }
        assert_eq!(ids.parse(&tokens, 3), Ok((3, vec![])));
        assert_eq!(ids.parse(&tokens, 4), Ok((5, vec![String::from("d")])));
    }

    #[test]
    fn check_map_and_try_map() {
        let tokens = Tokens::try_from("12 99999999999999999999").unwrap();
        let len = MatchTag::new(Tag::Int).map(|text| text.len());
        let int = MatchTag::new(Tag::Int).try_map(|text| text.parse::<i64>());

        assert_eq!(len.parse(&tokens, 0), Ok((1, 2)));
        assert_eq!(len.parse(&tokens, 1), Ok((2, 20)));
        assert_eq!(int.parse(&tokens, 0), Ok((1, 12)));
        assert_eq!(int.parse(&tokens, 1), Err(NoMatch));
        assert_eq!(int.parse(&tokens, 2), Err(NoMatch));
    }

    #[test]
    fn whole_input_rejects_trailing_tokens() {
        let tokens = Tokens::try_from("x := 1 y").unwrap();
        let assign = MatchTag::new(Tag::Id)
            .then(keyword(":="))
            .then(MatchTag::new(Tag::Int));

        assert!(assign.parse(&tokens, 0).is_ok());
        assert_eq!(assign.whole_input().parse(&tokens, 0), Err(NoMatch));

        let tokens = Tokens::try_from("x := 1").unwrap();
        assert_eq!(
            assign.whole_input().parse(&tokens, 0).map(|(pos, _)| pos),
            Ok(3)
        );
    }
}
