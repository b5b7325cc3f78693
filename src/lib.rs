//! A parser-combinator interpreter for the IMP language.
//!
//! Programs pass through three stages:
//! 1. the [`lexer`] splits source text into [`Token`](lexer::token::Token)s;
//! 2. the [`parser`] matches the tokens against the IMP grammar, which is
//!    written with the small [`combinator`] library in this crate;
//! 3. the [`backend`] interpreter walks the resulting [`Ast`](ast::Ast).
//!
//! ```
//! use impcomb::{ast::Ast, backend::interpreter::{run, State}};
//!
//! let ast: Ast = "n := 5; p := 1; while n > 0 do p := p * n; n := n - 1 end"
//!     .parse()
//!     .unwrap();
//!
//! let mut state = State::default();
//! run(&ast, &mut state, std::io::sink()).unwrap();
//! assert_eq!(state.get("p"), Some(&120));
//! ```

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

extern crate static_assertions as sa;

pub mod ast;
pub mod backend;
pub mod cli;
pub mod combinator;
pub mod int;
pub mod lexer;
pub mod parser;
