//! Boolean expressions.
//!
//! # Grammar
//! Boolean expressions are built the same way as [arithmetic
//! expressions](super::aexp): the connectives are matched as left-folded lists,
//! with `and` binding tighter than `or`.
//!
//! ```raw
//! bexp        ::= conjunction ('or' conjunction)*
//! conjunction ::= term ('and' term)*
//! term        ::= 'not' term
//!               | aexp relop aexp
//!               | '(' bexp ')'
//! relop       ::= '<' | '<=' | '>' | '>=' | '=' | '==' | '!='
//! ```
//!
//! Both `=` and `==` spell equality. Since a relational comparison starts with
//! an arithmetic expression, which may itself be parenthesised, it is tried
//! before the parenthesised boolean case.

use std::ops::{BitAnd, BitOr, Not};

use crate::{
    ast::tree::NodeCount,
    combinator::{BoxedParser, Combiner, Lazy, Parser},
    int::{ImpInt, ImpSize},
};

use super::{
    aexp::{aexp, Aexp},
    util::{any_operator_in_list, group, keyword, precedence},
};

/// The operator levels of boolean expressions, tightest first.
const BEXP_PRECEDENCE_LEVELS: &[&[&str]] = &[&["and"], &["or"]];

/// The relational operators.
const RELOPS: &[&str] = &["<", "<=", ">", ">=", "=", "==", "!="];

/// A boolean expression.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Bexp<T = ImpSize> {
    /// The less-than comparison, corresponding to `<`.
    LessThan(Aexp<T>, Aexp<T>),
    /// The less-than-or-equal comparison, corresponding to `<=`.
    LessEq(Aexp<T>, Aexp<T>),
    /// The greater-than comparison, corresponding to `>`.
    GreaterThan(Aexp<T>, Aexp<T>),
    /// The greater-than-or-equal comparison, corresponding to `>=`.
    GreaterEq(Aexp<T>, Aexp<T>),
    /// The equality comparison, corresponding to `=` and `==`.
    Eq(Aexp<T>, Aexp<T>),
    /// The inequality comparison, corresponding to `!=`.
    NotEq(Aexp<T>, Aexp<T>),
    /// The unary logical NOT operator.
    Not(Box<Self>),
    /// The binary logical AND operator.
    And(Box<Self>, Box<Self>),
    /// The binary logical OR operator.
    Or(Box<Self>, Box<Self>),
}

impl<T> Not for Bexp<T> {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bexp::Not(Box::new(self))
    }
}

impl<T> BitAnd for Bexp<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Bexp::And(Box::new(self), Box::new(rhs))
    }
}

impl<T> BitOr for Bexp<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Bexp::Or(Box::new(self), Box::new(rhs))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Bexp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LessThan(lhs, rhs) => write!(f, "(< {lhs} {rhs})"),
            Self::LessEq(lhs, rhs) => write!(f, "(<= {lhs} {rhs})"),
            Self::GreaterThan(lhs, rhs) => write!(f, "(> {lhs} {rhs})"),
            Self::GreaterEq(lhs, rhs) => write!(f, "(>= {lhs} {rhs})"),
            Self::Eq(lhs, rhs) => write!(f, "(= {lhs} {rhs})"),
            Self::NotEq(lhs, rhs) => write!(f, "(!= {lhs} {rhs})"),
            Self::Not(inner) => write!(f, "(not {inner})"),
            Self::And(lhs, rhs) => write!(f, "(and {lhs} {rhs})"),
            Self::Or(lhs, rhs) => write!(f, "(or {lhs} {rhs})"),
        }
    }
}

impl<T> NodeCount for Bexp<T> {
    fn count_nodes(&self) -> usize {
        1 + match self {
            Self::LessThan(lhs, rhs)
            | Self::LessEq(lhs, rhs)
            | Self::GreaterThan(lhs, rhs)
            | Self::GreaterEq(lhs, rhs)
            | Self::Eq(lhs, rhs)
            | Self::NotEq(lhs, rhs) => lhs.count_nodes() + rhs.count_nodes(),
            Self::Not(inner) => inner.count_nodes(),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => lhs.count_nodes() + rhs.count_nodes(),
        }
    }
}

impl<T> Bexp<T> {
    /// Moves the boolean operands of `self` onto `stack`, leaving trivial
    /// comparisons behind.
    fn take_operands(&mut self, stack: &mut Vec<Self>) {
        let empty = || Bexp::Eq(Aexp::Var(String::new()), Aexp::Var(String::new()));

        match self {
            Self::Not(inner) => stack.push(std::mem::replace(&mut **inner, empty())),
            Self::And(lhs, rhs) | Self::Or(lhs, rhs) => {
                stack.push(std::mem::replace(&mut **lhs, empty()));
                stack.push(std::mem::replace(&mut **rhs, empty()));
            }
            _ => {}
        }
    }
}

impl<T> Drop for Bexp<T> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_operands(&mut stack);

        while let Some(mut expr) = stack.pop() {
            expr.take_operands(&mut stack);
        }
    }
}

/// Returns a [`Parser`] for a complete [`Bexp`].
pub fn bexp<T: ImpInt>() -> BoxedParser<Bexp<T>> {
    precedence(bexp_term(), BEXP_PRECEDENCE_LEVELS, process_logic)
}

/// Returns a [`Parser`] for a negation, a comparison, or a parenthesised [`Bexp`].
fn bexp_term<T: ImpInt>() -> BoxedParser<Bexp<T>> {
    bexp_not().or(bexp_relop()).or(bexp_group()).boxed()
}

/// Returns a [`Parser`] for a [`Bexp::Not`], which binds tighter than either
/// connective.
fn bexp_not<T: ImpInt>() -> BoxedParser<Bexp<T>> {
    keyword("not")
        .then(Lazy::new(bexp_term::<T>))
        .map(|(_, inner)| !inner)
        .boxed()
}

/// Returns a [`Parser`] for a comparison between two [`Aexp`]s.
fn bexp_relop<T: ImpInt>() -> BoxedParser<Bexp<T>> {
    aexp()
        .then(any_operator_in_list(RELOPS))
        .then(aexp())
        .map(|((lhs, op), rhs)| process_relop(&op)(lhs, rhs))
        .boxed()
}

/// Returns a [`Parser`] for a parenthesised [`Bexp`], whose inner expression
/// is built lazily.
fn bexp_group<T: ImpInt>() -> BoxedParser<Bexp<T>> {
    group(Lazy::new(bexp::<T>))
}

/// Maps a relational operator to the constructor of its [`Bexp`] variant.
fn process_relop<T>(op: &str) -> fn(Aexp<T>, Aexp<T>) -> Bexp<T> {
    match op {
        "<" => Bexp::LessThan,
        "<=" => Bexp::LessEq,
        ">" => Bexp::GreaterThan,
        ">=" => Bexp::GreaterEq,
        "=" | "==" => Bexp::Eq,
        "!=" => Bexp::NotEq,
        _ => unreachable!("unknown relational operator: {op}"),
    }
}

/// Maps a logical connective to the constructor of its [`Bexp`] variant.
fn process_logic<T>(op: &str) -> Combiner<Bexp<T>> {
    match op {
        "and" => <Bexp<T> as BitAnd>::bitand,
        "or" => <Bexp<T> as BitOr>::bitor,
        _ => unreachable!("unknown logic operator: {op}"),
    }
}
