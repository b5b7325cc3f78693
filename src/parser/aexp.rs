//! Arithmetic expressions.
//!
//! # Grammar
//! The natural grammar for arithmetic expressions is left-recursive, and
//! would never terminate if it were translated directly into a
//! recursive-descent parser.
//!
//! ```raw
//! aexp ::= INT | ID | '(' aexp ')'
//!        | aexp '*' aexp | aexp '/' aexp
//!        | aexp '+' aexp | aexp '-' aexp
//! ```
//!
//! Instead, each precedence level is matched as a flat, left-folded list
//! (see [`precedence`]), with multiplication and division binding tighter
//! than addition and subtraction. Only the parenthesised case recurses, and
//! it does so through a [`Lazy`].
//!
//! ```raw
//! aexp    ::= product (('+' | '-') product)*
//! product ::= term (('*' | '/') term)*
//! term    ::= INT | ID | '(' aexp ')'
//! ```

use std::ops::{Add, Div, Mul, Sub};

use crate::{
    ast::tree::NodeCount,
    combinator::{BoxedParser, Combiner, Lazy, MatchTag, Parser},
    int::{ImpInt, ImpSize},
    lexer::token::Tag,
};

use super::util::{group, id, precedence};

/// The operator levels of arithmetic expressions, tightest first.
const AEXP_PRECEDENCE_LEVELS: &[&[&str]] = &[&["*", "/"], &["+", "-"]];

/// An arithmetic expression.
///
/// Arithmetic expressions consist of
/// - integers (`T`s);
/// - variables;
/// - addition, subtraction, multiplication and division expressions.
///
/// The [`Display`](std::fmt::Display) implementation on this type produces an
/// appropriate lisp-style s-expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Aexp<T = ImpSize> {
    /// An integer literal.
    Int(T),
    /// A variable reference.
    Var(String),
    /// Binary addition.
    Add(Box<Self>, Box<Self>),
    /// Binary left-to-right subtraction.
    Sub(Box<Self>, Box<Self>),
    /// Binary multiplication.
    Mul(Box<Self>, Box<Self>),
    /// Binary left-to-right division.
    Div(Box<Self>, Box<Self>),
}

impl<T> Add for Aexp<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Aexp::Add(Box::new(self), Box::new(rhs))
    }
}

impl<T> Sub for Aexp<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Aexp::Sub(Box::new(self), Box::new(rhs))
    }
}

impl<T> Mul for Aexp<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Aexp::Mul(Box::new(self), Box::new(rhs))
    }
}

impl<T> Div for Aexp<T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Aexp::Div(Box::new(self), Box::new(rhs))
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Aexp<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aexp::Int(int) => write!(f, "{int}"),
            Aexp::Var(var) => write!(f, "{var}"),
            Aexp::Add(lhs, rhs) => write!(f, "(+ {lhs} {rhs})"),
            Aexp::Sub(lhs, rhs) => write!(f, "(- {lhs} {rhs})"),
            Aexp::Mul(lhs, rhs) => write!(f, "(* {lhs} {rhs})"),
            Aexp::Div(lhs, rhs) => write!(f, "(/ {lhs} {rhs})"),
        }
    }
}

impl<T> NodeCount for Aexp<T> {
    fn count_nodes(&self) -> usize {
        // the number of nodes in a tree is 1 + the number of nodes in its subtrees
        1 + match self {
            Self::Add(lhs, rhs)
            | Self::Sub(lhs, rhs)
            | Self::Mul(lhs, rhs)
            | Self::Div(lhs, rhs) => lhs.count_nodes() + rhs.count_nodes(),
            Self::Int(_) | Self::Var(_) => 0,
        }
    }
}

impl<T> Aexp<T> {
    /// Constructs an [`Aexp::Var`] by invoking [`Into::into`].
    pub fn var_from(var: impl Into<String>) -> Self {
        Self::Var(var.into())
    }

    /// Moves the operands of `self` onto `stack`, leaving empty leaves behind.
    fn take_operands(&mut self, stack: &mut Vec<Self>) {
        if let Self::Add(lhs, rhs) | Self::Sub(lhs, rhs) | Self::Mul(lhs, rhs) | Self::Div(lhs, rhs) =
            self
        {
            stack.push(std::mem::replace(&mut **lhs, Self::Var(String::new())));
            stack.push(std::mem::replace(&mut **rhs, Self::Var(String::new())));
        }
    }
}

// operator chains are left-nested as deep as they are long
impl<T> Drop for Aexp<T> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_operands(&mut stack);

        while let Some(mut expr) = stack.pop() {
            expr.take_operands(&mut stack);
        }
    }
}

/// Returns a [`Parser`] for a complete [`Aexp`].
pub fn aexp<T: ImpInt>() -> BoxedParser<Aexp<T>> {
    precedence(aexp_term(), AEXP_PRECEDENCE_LEVELS, process_binop)
}

/// Returns a [`Parser`] for a term, i.e. a value or a parenthesised [`Aexp`].
fn aexp_term<T: ImpInt>() -> BoxedParser<Aexp<T>> {
    aexp_value().or(aexp_group()).boxed()
}

/// Returns a [`Parser`] for a parenthesised [`Aexp`], whose inner expression
/// is built lazily.
fn aexp_group<T: ImpInt>() -> BoxedParser<Aexp<T>> {
    group(Lazy::new(aexp::<T>))
}

/// Returns a [`Parser`] for an [`Aexp::Int`] or an [`Aexp::Var`].
fn aexp_value<T: ImpInt>() -> BoxedParser<Aexp<T>> {
    num().map(Aexp::Int).or(id().map(Aexp::Var)).boxed()
}

/// Returns a [`Parser`] converting an integer literal into a `T`.
///
/// Literals that do not fit in `T` do not match.
fn num<T: ImpInt>() -> impl Parser<Output = T> {
    MatchTag::new(Tag::Int).try_map(|text| text.parse::<T>())
}

/// Maps an arithmetic operator to the constructor of its [`Aexp`] variant.
fn process_binop<T>(op: &str) -> Combiner<Aexp<T>> {
    match op {
        "+" => <Aexp<T> as Add>::add,
        "-" => <Aexp<T> as Sub>::sub,
        "*" => <Aexp<T> as Mul>::mul,
        "/" => <Aexp<T> as Div>::div,
        _ => unreachable!("unknown arithmetic operator: {op}"),
    }
}
