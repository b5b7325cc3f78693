//! Left-associative separated lists.
//!
//! # Left recursion
//! A binary operator is most naturally described by a left-recursive rule,
//! like `sum ::= sum '+' term | term`, but a recursive-descent parser that
//! follows such a rule calls itself at the same position forever. The same
//! holds for statement sequences (`list ::= list ';' stmt | stmt`).
//!
//! [`SeparatedList`] sidesteps this by matching the flat form of the rule,
//! `term ('+' term)*`, in a loop, and folding the values from the left as it
//! goes. The separator parser does not produce a token, it produces the
//! function used to fold, so `1 - 2 - 3` is built as `(1 - 2) - 3` with no
//! recursion at all.

use crate::lexer::token::Token;

use super::{ParseResult, Parser};

/// A non-empty list of `element`s separated by `separator`s, folded from the
/// left with the functions the separators produce.
///
/// For the input `e1 s1 e2 s2 e3` the value is `s2(s1(e1, e2), e3)`. The list
/// ends, without failing, at the first separator that is not followed by an
/// element; that trailing separator is left unconsumed.
#[derive(Debug, Clone, Copy)]
pub struct SeparatedList<P, S> {
    /// The parser for the list elements.
    element: P,
    /// The parser producing the combining functions.
    separator: S,
}

impl<P, S> SeparatedList<P, S> {
    /// Constructs a new [`SeparatedList`].
    pub fn new(element: P, separator: S) -> Self {
        Self { element, separator }
    }
}

impl<P, S> Parser for SeparatedList<P, S>
where
    P: Parser,
    S: Parser,
    S::Output: FnOnce(P::Output, P::Output) -> P::Output,
{
    type Output = P::Output;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        let (mut pos, mut acc) = self.element.parse(tokens, pos)?;

        loop {
            let Ok((after_separator, combine)) = self.separator.parse(tokens, pos) else {
                break;
            };
            let Ok((next, rhs)) = self.element.parse(tokens, after_separator) else {
                break;
            };

            acc = combine(acc, rhs);
            pos = next;
        }

        Ok((pos, acc))
    }
}
