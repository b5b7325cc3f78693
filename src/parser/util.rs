//! Common functionality for the [`crate::parser`] submodules.
//!
//! Besides the small wrappers around the primitive token parsers, this module
//! holds [`precedence`], which is how both kinds of IMP expression encode their
//! operator precedence: one [`SeparatedList`](crate::combinator::SeparatedList)
//! per precedence level, with the tightest-binding level innermost.

use crate::{
    combinator::{BoxedParser, Combiner, MatchTag, MatchValue, Parser},
    lexer::token::Tag,
};

/// Returns a [`Parser`] matching the reserved word or operator `kw`.
pub fn keyword(kw: &'static str) -> MatchValue {
    MatchValue::new(kw, Tag::Reserved)
}

/// Returns a [`Parser`] matching any variable name.
pub fn id() -> MatchTag {
    MatchTag::new(Tag::Id)
}

/// Returns a [`Parser`] matching `inner` between parentheses, producing the
/// value of `inner`.
pub fn group<P>(inner: P) -> BoxedParser<P::Output>
where
    P: Parser + 'static,
{
    keyword("(")
        .then(inner)
        .then(keyword(")"))
        .map(|((_, value), _)| value)
        .boxed()
}

/// Returns a [`Parser`] matching any one of the reserved operators in `ops`,
/// trying them in order.
///
/// # Panics
/// Panics if `ops` is empty.
pub fn any_operator_in_list(ops: &[&'static str]) -> BoxedParser<String> {
    ops.iter()
        .copied()
        .map(|op| keyword(op).boxed())
        .reduce(|lhs, rhs| lhs.or(rhs).boxed())
        .expect("operator lists are never empty")
}

/// Builds a precedence-climbing parser from `value` and the operator `levels`.
///
/// `levels` is ordered from the tightest-binding operators to the loosest.
/// Each level wraps the parser built so far in a left-associative
/// [`SeparatedList`](crate::combinator::SeparatedList), whose separator maps
/// the matched operator to a [`Combiner`] with `combine`.
pub fn precedence<O: 'static>(
    value: BoxedParser<O>,
    levels: &[&[&'static str]],
    combine: fn(&str) -> Combiner<O>,
) -> BoxedParser<O> {
    levels.iter().fold(value, |parser, level| {
        parser
            .separated_by(any_operator_in_list(level).map(move |op| combine(&op)))
            .boxed()
    })
}
