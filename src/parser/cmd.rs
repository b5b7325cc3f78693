//! The _commands_ (i.e. statements) that make up IMP programs.
//!
//! # Grammar
//! A program is a `;`-separated list of statements. Sequencing is a binary
//! [`Cmd::Seq`] node, and like the arithmetic operators it is built from a
//! flat list folded from the left, so `a; b; c` becomes `Seq(Seq(a, b), c)`.
//!
//! ```raw
//! stmt_list ::= stmt (';' stmt)*
//!
//! stmt ::=
//!       ID ':=' aexp
//!     | 'if' bexp 'then' stmt_list ['else' stmt_list] 'end'
//!     | 'while' bexp 'do' stmt_list 'end'
//!     | 'print' aexp
//! ```
//!
//! The statement lists nested inside `if` and `while` refer back to
//! [`stmt_list`], and so are built lazily.

use crate::{
    ast::tree::NodeCount,
    combinator::{BoxedParser, Combiner, Lazy, Parser},
    int::{ImpInt, ImpSize},
};

use super::{
    aexp::{aexp, Aexp},
    bexp::{bexp, Bexp},
    util::{id, keyword},
};

/// An IMP command.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
pub enum Cmd<T = ImpSize> {
    /// A variable assignment command, corresponding to `:=`.
    Assign(String, Aexp<T>),
    /// A (left-to-right) sequence of two IMP commands.
    Seq(Box<Cmd<T>>, Box<Cmd<T>>),
    /// A conditional command, introduced by `if` and terminated by `end`.
    If {
        /// The boolean condition that appears between `if` and `then`.
        cond: Bexp<T>,
        /// The [`Cmd`] to be executed if `cond` evaluates to `true`.
        true_case: Box<Cmd<T>>,
        /// The [`Cmd`] to be executed, if there is one, when `cond` evaluates
        /// to `false`.
        false_case: Option<Box<Cmd<T>>>,
    },
    /// An iteration command, introduced by `while` and `do`, and terminated by
    /// `end`.
    While(Bexp<T>, Box<Cmd<T>>),
    /// An output command, introduced by `print`.
    Print(Aexp<T>),
}

impl<T> std::fmt::Display for Cmd<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assign(var, expr) => write!(f, "(assign {var} {expr})"),
            Self::Seq(first, second) => write!(f, "{first}\n{second}"),
            Self::While(cond, inner) => write!(
                f,
                "(loop (while {cond})\n\t{})",
                inner.to_string().replace('\n', "\n\t")
            ),
            Self::If {
                cond,
                true_case,
                false_case: None,
            } => write!(
                f,
                "(if {cond}\n\t({}))",
                true_case.to_string().replace('\n', "\n\t")
            ),
            Self::If {
                cond,
                true_case,
                false_case: Some(false_case),
            } => write!(
                f,
                "(if {cond}\n\t({})\n\t({}))",
                true_case.to_string().replace('\n', "\n\t"),
                false_case.to_string().replace('\n', "\n\t")
            ),
            Self::Print(expr) => write!(f, "(print {expr})"),
        }
    }
}

impl<T> NodeCount for Cmd<T> {
    fn count_nodes(&self) -> usize {
        1 + match self {
            Cmd::Assign(_, rhs) => 1 + rhs.count_nodes(),
            Cmd::Seq(first, second) => first.count_nodes() + second.count_nodes(),
            Cmd::If {
                cond,
                true_case,
                false_case,
            } => {
                cond.count_nodes()
                    + true_case.count_nodes()
                    + false_case.as_ref().map_or(0, |case| case.count_nodes())
            }
            Cmd::While(cond, body) => cond.count_nodes() + body.count_nodes(),
            Cmd::Print(expr) => expr.count_nodes(),
        }
    }
}

impl<T> Cmd<T> {
    /// Constructs a [`Cmd::Seq`] from its two halves.
    pub fn seq(first: Self, second: Self) -> Self {
        Cmd::Seq(Box::new(first), Box::new(second))
    }

    /// Moves the nested commands of `self` onto `stack`, leaving empty
    /// commands behind.
    fn take_children(&mut self, stack: &mut Vec<Self>) {
        let empty = || Cmd::Print(Aexp::Var(String::new()));

        match self {
            Cmd::Seq(first, second) => {
                stack.push(std::mem::replace(&mut **first, empty()));
                stack.push(std::mem::replace(&mut **second, empty()));
            }
            Cmd::If {
                true_case,
                false_case,
                ..
            } => {
                stack.push(std::mem::replace(&mut **true_case, empty()));
                if let Some(false_case) = false_case {
                    stack.push(std::mem::replace(&mut **false_case, empty()));
                }
            }
            Cmd::While(_, body) => stack.push(std::mem::replace(&mut **body, empty())),
            Cmd::Assign(..) | Cmd::Print(_) => {}
        }
    }
}

// statement lists are left-nested as deep as they are long
impl<T> Drop for Cmd<T> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.take_children(&mut stack);

        while let Some(mut cmd) = stack.pop() {
            cmd.take_children(&mut stack);
        }
    }
}

/// Returns a [`Parser`] for a non-empty, `;`-separated list of [`Cmd`]s.
pub fn stmt_list<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    stmt()
        .separated_by(keyword(";").map(|_| Cmd::seq as Combiner<Cmd<T>>))
        .boxed()
}

/// Returns a [`Parser`] for an individual, non-[`Cmd::Seq`] [`Cmd`].
fn stmt<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    assign_stmt()
        .or(if_stmt())
        .or(while_stmt())
        .or(print_stmt())
        .boxed()
}

/// Returns a [`Parser`] for a [`Cmd::Assign`].
fn assign_stmt<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    id().then(keyword(":="))
        .then(aexp())
        .map(|((name, _), expr)| Cmd::Assign(name, expr))
        .boxed()
}

/// Returns a [`Parser`] for a [`Cmd::If`], with or without an `else` branch.
fn if_stmt<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    keyword("if")
        .then(bexp())
        .then(keyword("then"))
        .then(Lazy::new(stmt_list::<T>))
        .then(keyword("else").then(Lazy::new(stmt_list::<T>)).opt())
        .then(keyword("end"))
        .map(|(((((_, cond), _), true_case), false_case), _)| Cmd::If {
            cond,
            true_case: Box::new(true_case),
            false_case: false_case.map(|(_, case)| Box::new(case)),
        })
        .boxed()
}

/// Returns a [`Parser`] for a [`Cmd::While`].
fn while_stmt<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    keyword("while")
        .then(bexp())
        .then(keyword("do"))
        .then(Lazy::new(stmt_list::<T>))
        .then(keyword("end"))
        .map(|((((_, cond), _), body), _)| Cmd::While(cond, Box::new(body)))
        .boxed()
}

/// Returns a [`Parser`] for a [`Cmd::Print`].
fn print_stmt<T: ImpInt>() -> BoxedParser<Cmd<T>> {
    keyword("print")
        .then(aexp())
        .map(|(_, expr)| Cmd::Print(expr))
        .boxed()
}

#[cfg(test)]
mod tests {
    use crate::{combinator::NoMatch, lexer::token::Tokens};

    use super::*;

    /// Parses the whole of `source` as a [`Cmd`].
    fn parse(source: &str) -> Result<Cmd, NoMatch> {
        let tokens = Tokens::try_from(source).unwrap();
        stmt_list()
            .whole_input()
            .parse(&tokens, 0)
            .map(|(_, program)| program)
    }

    fn assign(name: &str, value: i64) -> Cmd {
        Cmd::Assign(name.into(), Aexp::Int(value))
    }

    #[test]
    fn sequences_fold_from_the_left() {
        let program = parse("x := 0; y := 1; z := 2").unwrap();
        eprintln!("{program}");

        assert_eq!(
            program,
            Cmd::seq(Cmd::seq(assign("x", 0), assign("y", 1)), assign("z", 2))
        );
    }

    #[test]
    fn check_while_parser() {
        let program = parse("y := 3; while x != y do x := y; y := 0 end; z := 4").unwrap();
        eprintln!("{program}");

        assert_eq!(
            program,
            Cmd::seq(
                Cmd::seq(
                    assign("y", 3),
                    Cmd::While(
                        Bexp::NotEq(Aexp::var_from("x"), Aexp::var_from("y")),
                        Box::new(Cmd::seq(
                            Cmd::Assign("x".into(), Aexp::var_from("y")),
                            assign("y", 0)
                        ))
                    )
                ),
                assign("z", 4)
            )
        );
    }

    #[test]
    fn check_if_parser() {
        let program = parse("if x < 13 then a := 1; b := 2 else y := y - 1 end").unwrap();
        eprintln!("{program}");

        assert_eq!(
            program,
            Cmd::If {
                cond: Bexp::LessThan(Aexp::var_from("x"), Aexp::Int(13)),
                true_case: Box::new(Cmd::seq(assign("a", 1), assign("b", 2))),
                false_case: Some(Box::new(Cmd::Assign(
                    "y".into(),
                    Aexp::var_from("y") - Aexp::Int(1)
                ))),
            }
        );

        let program = parse("if x < 13 then a := 1 end").unwrap();
        assert_eq!(
            program,
            Cmd::If {
                cond: Bexp::LessThan(Aexp::var_from("x"), Aexp::Int(13)),
                true_case: Box::new(assign("a", 1)),
                false_case: None,
            }
        );
    }

    #[test]
    fn check_print_parser() {
        assert_eq!(
            parse("print x * 2").unwrap(),
            Cmd::Print(Aexp::var_from("x") * Aexp::Int(2))
        );
    }

    #[test]
    fn statements_must_be_separated() {
        assert!(parse("x := 1").is_ok());
        assert_eq!(parse("x := 1 y := 2"), Err(NoMatch));
        assert_eq!(parse("x := 1;"), Err(NoMatch));
        assert_eq!(parse(";"), Err(NoMatch));
        assert_eq!(parse(""), Err(NoMatch));
    }

    #[test]
    fn blocks_must_be_terminated() {
        assert_eq!(parse("while x < 1 do x := 1"), Err(NoMatch));
        assert_eq!(parse("if x < 1 then x := 1 else x := 2"), Err(NoMatch));
        assert_eq!(parse("if x < 1 then end"), Err(NoMatch));
        assert_eq!(parse("if x then x := 1 end"), Err(NoMatch));
    }

    #[test]
    fn display_and_node_count() {
        let program = parse("n := 2; while n > 0 do print n; n := n - 1 end").unwrap();

        assert_eq!(
            program.to_string(),
            "(assign n 2)\n(loop (while (> n 0))\n\t(print n)\n\t(assign n (- n 1)))"
        );
        // seq(assign(n, 2), while(>(n, 0), seq(print(n), assign(n, -(n, 1)))))
        assert_eq!(program.count_nodes(), 16);
    }

    #[test]
    fn long_statement_lists_parse_and_drop_without_recursion() {
        let source = vec!["x := x + 1"; 100_000].join("; ");
        let program = parse(&source).unwrap();

        let Cmd::Seq(_, last) = &program else {
            panic!("expected a sequence")
        };
        assert_eq!(
            **last,
            Cmd::Assign("x".into(), Aexp::var_from("x") + Aexp::Int(1))
        );
        drop(program);
    }
}
