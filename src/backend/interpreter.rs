//! A tree-walk [`Interpreter`] for IMP programs.

use std::{collections::HashMap, io::Write};

use num_traits::{CheckedAdd, CheckedDiv, CheckedMul, CheckedSub, Zero};
use thiserror::Error;

use crate::{
    ast::{
        tree::{Evaluator, Tree},
        Ast,
    },
    int::{ImpInt, ImpSize},
    parser::{aexp::Aexp, bexp::Bexp, cmd::Cmd},
};

/// The errors that can halt the execution of a program.
///
/// Effects performed before the error (assignments and output) are kept.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The right-hand side of a division evaluated to zero.
    #[error("division by zero")]
    DivisionByZero,
    /// The result of an operation does not fit the integer type.
    #[error("integer overflow while evaluating `{op}`")]
    Overflow {
        /// The operator that overflowed.
        op: &'static str,
    },
    /// The output of a `print` statement could not be written.
    #[error("failed to write program output")]
    Output(#[from] std::io::Error),
}

/// The state of an interpreter, mapping variable names to their values.
///
/// Variables that have never been assigned read as zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State<T = ImpSize>(HashMap<String, T>);

impl<T> Default for State<T> {
    fn default() -> Self {
        Self(HashMap::new())
    }
}

impl<T> From<HashMap<String, T>> for State<T> {
    fn from(value: HashMap<String, T>) -> Self {
        Self(value)
    }
}

impl<T> FromIterator<(String, T)> for State<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> State<T> {
    /// Returns the value of the given `var`, or `None` if it is unbound.
    pub fn get(&self, var: &str) -> Option<&T> {
        self.0.get(var)
    }

    /// Binds `var` to `value`, replacing any previous binding.
    pub fn assign(&mut self, var: impl Into<String>, value: T) {
        self.0.insert(var.into(), value);
    }

    /// Returns the number of bound variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the bindings of `self`, sorted by name.
    pub fn sorted(&self) -> Vec<(&str, &T)> {
        let mut bindings: Vec<_> = self.0.iter().map(|(k, v)| (k.as_str(), v)).collect();
        bindings.sort_unstable_by_key(|(name, _)| *name);
        bindings
    }
}

impl<T: Clone + Zero> State<T> {
    /// Returns the value of `var`, reading unbound variables as zero.
    pub fn lookup(&self, var: &str) -> T {
        self.get(var).cloned().unwrap_or_else(T::zero)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for State<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "{{}}");
        }

        let bindings = self
            .sorted()
            .into_iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{ {bindings} }}")
    }
}

/// An arithmetic operator waiting for the values of its operands.
#[derive(Debug, Clone, Copy)]
enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
}

impl ArithOp {
    /// Applies `self` to its operands with checked arithmetic.
    fn apply<T: ImpInt>(self, lhs: T, rhs: T) -> Result<T, EvalError> {
        match self {
            Self::Add => CheckedAdd::checked_add(&lhs, &rhs).ok_or(EvalError::Overflow { op: "+" }),
            Self::Sub => CheckedSub::checked_sub(&lhs, &rhs).ok_or(EvalError::Overflow { op: "-" }),
            Self::Mul => CheckedMul::checked_mul(&lhs, &rhs).ok_or(EvalError::Overflow { op: "*" }),
            Self::Div if rhs.is_zero() => Err(EvalError::DivisionByZero),
            // truncates towards zero, and only overflows for MIN / -1
            Self::Div => {
                CheckedDiv::checked_div(&lhs, &rhs).ok_or(EvalError::Overflow { op: "/" })
            }
        }
    }
}

/// A unit of pending work in [`evaluate_aexp`].
enum AexpStep<'a, T> {
    /// Push the value of a subexpression.
    Eval(&'a Aexp<T>),
    /// Replace the top two values with the result of an operator.
    Apply(ArithOp),
}

/// Evaluates the given `expr` based on some `state`.
///
/// Operands are evaluated left to right, each before its operator. The walk
/// uses an explicit stack, so chains like `1 + 1 + ... + 1` (which the parser
/// nests as deep as they are long) do not grow the call stack.
pub fn evaluate_aexp<T: ImpInt>(state: &State<T>, expr: &Aexp<T>) -> Result<T, EvalError> {
    let mut steps = vec![AexpStep::Eval(expr)];
    let mut values: Vec<T> = Vec::new();

    while let Some(step) = steps.pop() {
        let (op, lhs, rhs) = match step {
            AexpStep::Eval(Aexp::Int(int)) => {
                values.push(int.clone());
                continue;
            }
            AexpStep::Eval(Aexp::Var(var)) => {
                values.push(state.lookup(var));
                continue;
            }
            AexpStep::Apply(op) => {
                let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
                    unreachable!("operands are evaluated before their operator")
                };
                values.push(op.apply(lhs, rhs)?);
                continue;
            }
            AexpStep::Eval(Aexp::Add(lhs, rhs)) => (ArithOp::Add, lhs, rhs),
            AexpStep::Eval(Aexp::Sub(lhs, rhs)) => (ArithOp::Sub, lhs, rhs),
            AexpStep::Eval(Aexp::Mul(lhs, rhs)) => (ArithOp::Mul, lhs, rhs),
            AexpStep::Eval(Aexp::Div(lhs, rhs)) => (ArithOp::Div, lhs, rhs),
        };

        steps.push(AexpStep::Apply(op));
        steps.push(AexpStep::Eval(&**rhs));
        steps.push(AexpStep::Eval(&**lhs));
    }

    let Some(value) = values.pop() else {
        unreachable!("every expression produces a value")
    };
    Ok(value)
}

/// A unit of pending work in [`evaluate_bexp`].
enum BexpStep<'a, T> {
    /// Push the value of a subexpression.
    Eval(&'a Bexp<T>),
    /// Negate the top value.
    Not,
    /// Replace the top two values with their conjunction.
    And,
    /// Replace the top two values with their disjunction.
    Or,
}

/// Evaluates the given boolean `expr` based on some `state`.
///
/// Both operands of `and` and `or` are always evaluated, so an error in the
/// right operand is reported even when the left one decides the result. As
/// with [`evaluate_aexp`], long chains of connectives are walked with an
/// explicit stack.
pub fn evaluate_bexp<T: ImpInt>(state: &State<T>, expr: &Bexp<T>) -> Result<bool, EvalError> {
    let compare = |lhs: &Aexp<T>, rhs: &Aexp<T>| -> Result<(T, T), EvalError> {
        Ok((evaluate_aexp(state, lhs)?, evaluate_aexp(state, rhs)?))
    };

    let mut steps = vec![BexpStep::Eval(expr)];
    let mut values: Vec<bool> = Vec::new();

    while let Some(step) = steps.pop() {
        let value = match step {
            BexpStep::Eval(Bexp::LessThan(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l < r)?,
            BexpStep::Eval(Bexp::LessEq(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l <= r)?,
            BexpStep::Eval(Bexp::GreaterThan(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l > r)?,
            BexpStep::Eval(Bexp::GreaterEq(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l >= r)?,
            BexpStep::Eval(Bexp::Eq(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l == r)?,
            BexpStep::Eval(Bexp::NotEq(lhs, rhs)) => compare(lhs, rhs).map(|(l, r)| l != r)?,
            BexpStep::Eval(Bexp::Not(inner)) => {
                steps.push(BexpStep::Not);
                steps.push(BexpStep::Eval(&**inner));
                continue;
            }
            BexpStep::Eval(Bexp::And(lhs, rhs)) => {
                steps.extend([BexpStep::And, BexpStep::Eval(&**rhs), BexpStep::Eval(&**lhs)]);
                continue;
            }
            BexpStep::Eval(Bexp::Or(lhs, rhs)) => {
                steps.extend([BexpStep::Or, BexpStep::Eval(&**rhs), BexpStep::Eval(&**lhs)]);
                continue;
            }
            BexpStep::Not => {
                let Some(inner) = values.pop() else {
                    unreachable!("the operand is evaluated before `not`")
                };
                !inner
            }
            BexpStep::And | BexpStep::Or => {
                let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
                    unreachable!("operands are evaluated before their connective")
                };
                match step {
                    BexpStep::And => lhs && rhs,
                    _ => lhs || rhs,
                }
            }
        };

        values.push(value);
    }

    let Some(value) = values.pop() else {
        unreachable!("every expression produces a value")
    };
    Ok(value)
}

/// A tree-walk interpreter for IMP programs, which
/// executes programs by walking the tree, evaluating
/// expressions, and updating the state it was given.
///
/// The values of `print` statements are written to `out`, one per line.
#[derive(Debug)]
pub struct Interpreter<'s, T, W> {
    /// The state being executed against.
    state: &'s mut State<T>,
    /// The output channel of `print` statements.
    out: W,
}

impl<'s, T, W> Interpreter<'s, T, W> {
    /// Constructs a new [`Interpreter`] over `state`, printing to `out`.
    pub fn new(state: &'s mut State<T>, out: W) -> Self {
        Self { state, out }
    }

    /// Returns a reference to the current state.
    pub fn state(&self) -> &State<T> {
        &*self.state
    }

    /// Consumes `self` and returns its output channel.
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<T: ImpInt, W> Evaluator<&Aexp<T>> for Interpreter<'_, T, W> {
    type Output = Result<T, EvalError>;

    fn eval(&mut self, tree: &Aexp<T>) -> Self::Output {
        evaluate_aexp(self.state, tree)
    }
}

impl<T: ImpInt, W> Evaluator<&Bexp<T>> for Interpreter<'_, T, W> {
    type Output = Result<bool, EvalError>;

    fn eval(&mut self, tree: &Bexp<T>) -> Self::Output {
        evaluate_bexp(self.state, tree)
    }
}

impl<T: ImpInt, W: Write> Evaluator<&Cmd<T>> for Interpreter<'_, T, W> {
    type Output = Result<(), EvalError>;

    fn eval(&mut self, tree: &Cmd<T>) -> Self::Output {
        // sequences nest as deep as they are long, so they are unrolled onto
        // an explicit stack instead of being evaluated recursively
        let mut pending = vec![tree];

        while let Some(cmd) = pending.pop() {
            match cmd {
                Cmd::Assign(var, expr) => {
                    let value = evaluate_aexp(self.state, expr)?;
                    self.state.assign(var.as_str(), value);
                }
                Cmd::Seq(first, second) => {
                    pending.push(&**second);
                    pending.push(&**first);
                }
                Cmd::If {
                    cond,
                    true_case,
                    false_case,
                } => {
                    if evaluate_bexp(self.state, cond)? {
                        pending.push(&**true_case);
                    } else if let Some(false_case) = false_case {
                        pending.push(&**false_case);
                    }
                }
                Cmd::While(cond, body) => {
                    while evaluate_bexp(self.state, cond)? {
                        self.eval(&**body)?;
                    }
                }
                Cmd::Print(expr) => {
                    let value = evaluate_aexp(self.state, expr)?;
                    writeln!(self.out, "{value}")?;
                }
            }
        }

        Ok(())
    }
}

impl<T: ImpInt, W: Write> Evaluator<&Ast<T>> for Interpreter<'_, T, W> {
    type Output = Result<(), EvalError>;

    fn eval(&mut self, tree: &Ast<T>) -> Self::Output {
        self.eval(tree.root())
    }
}

/// Executes `ast` against `state`, writing the output of `print` statements
/// to `out`.
///
/// On error, `state` holds every assignment made before the fault.
pub fn run<T, W>(ast: &Ast<T>, state: &mut State<T>, out: W) -> Result<(), EvalError>
where
    T: ImpInt,
    W: Write,
{
    Interpreter::new(state, out).eval(ast)
}
