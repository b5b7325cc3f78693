//! A small algebra of composable parsers over token slices.
//!
//! # Model
//! Every [`Parser`] is a pure function from a token slice and a position into
//! that slice to a [`ParseResult`]: either the parsed value together with the
//! position of the next unconsumed token, or [`NoMatch`]. Because the input is
//! an immutable slice and a plain index, a failing branch never needs to undo
//! anything; an [`Alternation`] simply retries at the position it was given.
//!
//! # Composition
//! Parsers are built by wrapping other parsers, and building one never runs
//! it. The methods on [`Parser`] are the intended way to compose them:
//!
//! | method                      | combinator        | value                       |
//! |-----------------------------|-------------------|-----------------------------|
//! | [`then`](Parser::then)      | [`Sequence`]      | `(left, right)`             |
//! | [`or`](Parser::or)          | [`Alternation`]   | the first successful value  |
//! | [`opt`](Parser::opt)        | [`Optional`]      | `Option<_>`                 |
//! | [`repeat`](Parser::repeat)  | [`ZeroOrMore`]    | `Vec<_>`                    |
//! | [`map`](Parser::map)        | [`Map`]           | `f(value)`                  |
//! | [`try_map`](Parser::try_map)| [`TryMap`]        | `f(value)?`                 |
//! | [`separated_by`](Parser::separated_by) | [`SeparatedList`] | the left fold of the list |
//! | [`whole_input`](Parser::whole_input)   | [`WholeInput`]    | the inner value           |
//!
//! The leaves are [`MatchValue`] and [`MatchTag`], and recursive grammars are
//! tied together with [`Lazy`].

use thiserror::Error;

use crate::lexer::token::Token;

mod compose;
mod lazy;
mod separated;
mod token;

pub use compose::{Alternation, Map, Optional, Sequence, TryMap, WholeInput, ZeroOrMore};
pub use lazy::Lazy;
pub use separated::SeparatedList;
pub use token::{MatchTag, MatchValue};

/// The signal that a [`Parser`] did not match at the position it was given.
///
/// This is deliberately not an [`Option`], so that it can never be confused
/// with the `None` value legitimately produced by [`Optional`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[error("no match")]
pub struct NoMatch;

sa::assert_eq_size!(NoMatch, ());

/// The return type of [`Parser::parse`].
///
/// On success this holds the position of the next unconsumed token followed
/// by the parsed value, mirroring the `(tail, output)` order of [`nom`].
pub type ParseResult<T> = Result<(usize, T), NoMatch>;

/// A type-erased [`Parser`] producing values of type `O`.
pub type BoxedParser<O> = Box<dyn Parser<Output = O>>;

/// A function combining two parsed values, as produced by the separator of a
/// [`SeparatedList`].
pub type Combiner<O> = fn(O, O) -> O;

/// A parser over slices of [`Token`]s.
pub trait Parser {
    /// The type of the values produced on success.
    type Output;

    /// Runs `self` against `tokens`, starting at the token with index `pos`.
    ///
    /// On success the returned position is never less than `pos`.
    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output>;

    /// Returns a [`Sequence`] running `self` and then `next`.
    fn then<P>(self, next: P) -> Sequence<Self, P>
    where
        Self: Sized,
        P: Parser,
    {
        Sequence::new(self, next)
    }

    /// Returns an [`Alternation`] trying `self` and then `other`.
    fn or<P>(self, other: P) -> Alternation<Self, P>
    where
        Self: Sized,
        P: Parser<Output = Self::Output>,
    {
        Alternation::new(self, other)
    }

    /// Returns an [`Optional`] wrapping `self`.
    fn opt(self) -> Optional<Self>
    where
        Self: Sized,
    {
        Optional::new(self)
    }

    /// Returns a [`ZeroOrMore`] repeating `self`.
    fn repeat(self) -> ZeroOrMore<Self>
    where
        Self: Sized,
    {
        ZeroOrMore::new(self)
    }

    /// Returns a [`Map`] applying `f` to the values of `self`.
    fn map<F, U>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> U,
    {
        Map::new(self, f)
    }

    /// Returns a [`TryMap`] applying the fallible `f` to the values of `self`.
    fn try_map<F, U, E>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Output) -> Result<U, E>,
    {
        TryMap::new(self, f)
    }

    /// Returns a [`SeparatedList`] of `self` separated by `separator`.
    fn separated_by<S>(self, separator: S) -> SeparatedList<Self, S>
    where
        Self: Sized,
        S: Parser,
        S::Output: FnOnce(Self::Output, Self::Output) -> Self::Output,
    {
        SeparatedList::new(self, separator)
    }

    /// Returns a [`WholeInput`] wrapping `self`.
    fn whole_input(self) -> WholeInput<Self>
    where
        Self: Sized,
    {
        WholeInput::new(self)
    }

    /// Erases the type of `self`.
    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<P: Parser + ?Sized> Parser for Box<P> {
    type Output = P::Output;

    #[inline(always)]
    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        (**self).parse(tokens, pos)
    }
}

impl<P: Parser + ?Sized> Parser for &P {
    type Output = P::Output;

    #[inline(always)]
    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        (**self).parse(tokens, pos)
    }
}
