//! Abstract syntax trees for whole IMP programs.

use std::str::FromStr;

use thiserror::Error;

use crate::{
    int::{ImpInt, ImpSize},
    lexer::{token::Token, tokenize, LexError},
    parser::{self, cmd::Cmd, ParseFailure},
};

use self::tree::{NodeCount, Tree};

pub mod tree;

/// The error type produced when building an [`Ast`] directly from source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AstError {
    /// The source could not be tokenized.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// The tokens did not form a program.
    #[error(transparent)]
    Parse(#[from] ParseFailure),
}

/// An abstract syntax tree for an IMP program.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ast<T = ImpSize> {
    /// The root of this tree.
    root: Cmd<T>,
}

impl<T> From<Cmd<T>> for Ast<T> {
    fn from(root: Cmd<T>) -> Self {
        Self { root }
    }
}

impl<T: ImpInt> TryFrom<&[Token<'_>]> for Ast<T> {
    type Error = ParseFailure;

    fn try_from(tokens: &[Token<'_>]) -> Result<Self, Self::Error> {
        parser::parse(tokens)
    }
}

impl<T: ImpInt> FromStr for Ast<T> {
    type Err = AstError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = tokenize(s)?;
        Ok(Self::try_from(tokens.as_slice())?)
    }
}

impl<T> Tree for Ast<T> {
    type Node = Cmd<T>;

    #[inline(always)]
    fn root(&self) -> &Self::Node {
        &self.root
    }

    #[inline(always)]
    fn map<U, F>(self, op: F) -> U
    where
        F: FnOnce(Self::Node) -> U,
    {
        op(self.root)
    }
}

impl<T> NodeCount for Ast<T> {
    fn count_nodes(&self) -> usize {
        self.root.count_nodes()
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Ast<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::aexp::Aexp;

    use super::*;

    #[test]
    fn test_ast_map_impl() {
        let ast: Ast = "X := 1; Y := 2; Z := 3".parse().unwrap();
        dbg!(ast.clone());

        fn count(node: &Cmd) -> usize {
            // the number of nodes in a tree is 1 + the number of nodes in all subtrees
            1 + match node {
                Cmd::Seq(left, right) => count(left) + count(right),
                Cmd::While(_, inner) => 1 + count(inner),
                Cmd::If {
                    cond: _,
                    true_case,
                    false_case,
                } => 1 + count(true_case) + false_case.as_deref().map_or(0, count),
                Cmd::Assign(_, _) | Cmd::Print(_) => 2,
            }
        }

        assert_eq!(ast.clone().map(|root| count(&root)), 11);
        assert_eq!(ast.count_nodes(), 11);
    }

    #[test]
    fn errors_distinguish_lexing_from_parsing() {
        assert!(matches!(
            "x := 1 @ 2".parse::<Ast>(),
            Err(AstError::Lex(LexError { character: '@', .. }))
        ));
        assert_eq!(
            "x := 1 y := 2".parse::<Ast>(),
            Err(AstError::Parse(ParseFailure))
        );
        assert_eq!("".parse::<Ast>(), Err(AstError::Parse(ParseFailure)));
    }

    #[test]
    fn root_is_the_outermost_command() {
        let ast: Ast = "print 1 + 2".parse().unwrap();
        assert_eq!(ast.root(), &Cmd::Print(Aexp::Int(1) + Aexp::Int(2)));
        assert_eq!(ast.to_string(), "(print (+ 1 2))");
    }
}
