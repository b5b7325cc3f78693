//! The IMP grammar, built from the [`combinator`](crate::combinator) engine.
//!
//! Each submodule defines one syntactic category as a family of functions
//! returning [`BoxedParser`]s. Recursive references between (and within) the
//! categories go through [`Lazy`](crate::combinator::Lazy), so building the
//! grammar terminates even though the grammar itself is recursive.

use thiserror::Error;

use crate::{
    ast::Ast,
    combinator::{BoxedParser, Parser},
    int::ImpInt,
    lexer::token::Token,
};

use self::cmd::{stmt_list, Cmd};

pub mod aexp;
pub mod bexp;
pub mod cmd;
mod util;

/// The error returned when a token stream is not an IMP program.
///
/// Trailing tokens after an otherwise complete program are reported in the
/// same way; no position is recorded.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[error("program does not match the IMP grammar")]
pub struct ParseFailure;

/// Returns the top-level [`Parser`], which accepts only complete programs.
pub fn program<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    stmt_list().whole_input().boxed()
}

/// Parses the entirety of `tokens` into an [`Ast`].
pub fn parse<T: ImpInt>(tokens: &[Token<'_>]) -> Result<Ast<T>, ParseFailure> {
    program()
        .parse(tokens, 0)
        .map(|(_, root)| Ast::from(root))
        .map_err(|_| ParseFailure)
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::tree::Tree,
        int::{ImpBigInt, ImpSize},
        lexer::token::Tokens,
        parser::{aexp::Aexp, bexp::Bexp},
    };

    use super::*;

    const FACTORIAL: &str = "n := 5;
p := 1;
while n > 0 do
  p := p * n;
  n := n - 1
end";

    #[test]
    fn parse_factorial() {
        let tokens = Tokens::try_from(FACTORIAL).unwrap();
        let ast = parse::<ImpSize>(&tokens).unwrap();
        dbg!(&ast);

        let Cmd::Seq(init, body) = ast.root() else {
            panic!("expected a sequence at the root, got {ast}")
        };
        assert!(matches!(**init, Cmd::Seq(_, _)));
        assert!(matches!(
            &**body,
            Cmd::While(Bexp::GreaterThan(Aexp::Var(n), Aexp::Int(0)), _) if n == "n"
        ));
    }

    #[test]
    fn trailing_tokens_fail_the_whole_program() {
        let tokens = Tokens::try_from("x := 1 y := 2").unwrap();
        assert_eq!(parse::<ImpSize>(&tokens), Err(ParseFailure));

        // the prefix on its own is fine
        assert!(parse::<ImpSize>(&tokens[..3]).is_ok());
    }

    #[test]
    fn literals_must_fit_the_integer_type() {
        let tokens = Tokens::try_from("x := 99999999999999999999").unwrap();
        assert_eq!(parse::<ImpSize>(&tokens), Err(ParseFailure));

        let ast = parse::<ImpBigInt>(&tokens).unwrap();
        assert_eq!(ast.to_string(), "(assign x 99999999999999999999)");
    }
}
