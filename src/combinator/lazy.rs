//! Deferred construction of parsers, for recursive grammars.

use std::cell::OnceCell;

use crate::lexer::token::Token;

use super::{BoxedParser, ParseResult, Parser};

/// A parser built on first use by calling a constructor function.
///
/// A grammar rule that refers to itself (directly or through other rules)
/// cannot be built eagerly, since building it would require the finished rule.
/// Wrapping the inner reference in a [`Lazy`] defers construction until the
/// first call to [`Parser::parse`], by which point the construction of the
/// enclosing rule has finished. The constructed parser is then cached, so the
/// constructor runs at most once per [`Lazy`].
pub struct Lazy<O> {
    /// The cached parser.
    parser: OnceCell<BoxedParser<O>>,
    /// The constructor for `parser`.
    thunk: Box<dyn Fn() -> BoxedParser<O>>,
}

impl<O> Lazy<O> {
    /// Constructs a [`Lazy`] that builds its parser with `thunk`.
    pub fn new(thunk: impl Fn() -> BoxedParser<O> + 'static) -> Self {
        Self {
            parser: OnceCell::new(),
            thunk: Box::new(thunk),
        }
    }

    /// Returns `true` if the parser has already been constructed.
    pub fn is_forced(&self) -> bool {
        self.parser.get().is_some()
    }
}

impl<O> Parser for Lazy<O> {
    type Output = O;

    fn parse(&self, tokens: &[Token<'_>], pos: usize) -> ParseResult<Self::Output> {
        self.parser
            .get_or_init(|| (self.thunk)())
            .parse(tokens, pos)
    }
}

impl<O> std::fmt::Debug for Lazy<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lazy")
            .field("forced", &self.is_forced())
            .finish_non_exhaustive()
    }
}
