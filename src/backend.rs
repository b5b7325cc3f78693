//! Execution backends for parsed IMP programs.
//!
//! The only backend is a tree-walk [`interpreter`], which executes an
//! [`Ast`](crate::ast::Ast) directly against a mutable [`State`].

pub mod interpreter;

pub use interpreter::{run, EvalError, Interpreter, State};
