//! The command-line interface for `impcomb`.
//!
//! Usage (as with any other [`argh`] interface) involves first invoking [`argh::from_env()`], and
//! then processing the resulting data (in this case an instance of [`Cli`]).

#![allow(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context;
use argh::FromArgs;
use nom::{
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1, multispace0, satisfy},
    combinator::{map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, pair, separated_pair},
    IResult, Parser,
};
use nom_supreme::{
    error::ErrorTree,
    final_parser::{final_parser, Location},
    ParserExt,
};

use crate::{
    ast::{tree::NodeCount, Ast, AstError},
    backend::interpreter::{run, State},
    int::{ImpBigInt, ImpInt, ImpSize},
    lexer::tokenize,
};

/// A parser-combinator interpreter for the IMP programming language.
#[derive(Debug, Clone, FromArgs)]
pub struct Cli {
    #[argh(subcommand)]
    cmd: CliSubCommand,
}

impl Cli {
    /// Consumes `self` and processes the given subcommand.
    pub fn handle(self) -> anyhow::Result<()> {
        match self.cmd {
            CliSubCommand::Run(args) => match args.bigint {
                true => args.run::<ImpBigInt>(),
                false => args.run::<ImpSize>(),
            },
            CliSubCommand::Parse(args) => args.parse(),
            CliSubCommand::Lex(args) => args.lex(),
        }
    }
}

/// The set of the distinct subcommands available to be passed to the [`Cli`].
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand)]
enum CliSubCommand {
    Run(Run),
    Parse(Parse),
    Lex(Lex),
}

/// Runs an .imp file using a simple tree-walk interpreter. Variables that are
/// not bound with the --let option start at zero.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "run")]
struct Run {
    /// define a set of variable bindings via a comma-separated list
    /// (e.g. {{ x: 2, y: -1 }}), where the empty set is given by {{}}
    #[argh(option, long = "let", short = 'l')]
    bindings: Option<Bindings>,

    /// use arbitrary-precision integers during execution
    #[argh(switch)]
    bigint: bool,

    /// a path to an .imp file
    #[argh(positional)]
    file: PathBuf,
}

impl Run {
    /// Consumes `self` and executes the given IMP program.
    fn run<T: ImpInt>(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let ast: Ast<T> = source
            .parse()
            .with_context(|| format!("could not parse {}", self.file.display()))?;

        let mut state: State<T> = self
            .bindings
            .map(|bindings| {
                bindings
                    .map
                    .into_iter()
                    .map(|(name, value)| (name, T::from(value)))
                    .collect()
            })
            .unwrap_or_default();

        let stdout = std::io::stdout();
        let result = run(&ast, &mut state, stdout.lock());

        println!(
            "\nExecuted {}, yielding the following final state: {}",
            self.file.display(),
            state
        );
        result.with_context(|| format!("execution of {} halted", self.file.display()))
    }
}

/// Parses an .imp file and prints the resulting syntax tree.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "parse")]
struct Parse {
    /// accept integer literals of any size, as `run --bigint` does
    #[argh(switch)]
    bigint: bool,

    /// a path to an .imp file
    #[argh(positional)]
    file: PathBuf,
}

impl Parse {
    fn parse(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let rendered = match self.bigint {
            true => render::<ImpBigInt>(&source),
            false => render::<ImpSize>(&source),
        }
        .with_context(|| format!("could not parse {}", self.file.display()))?;

        println!("{rendered}");
        Ok(())
    }
}

/// Parses `source` and renders its syntax tree followed by its node count.
fn render<T: ImpInt>(source: &str) -> Result<String, AstError> {
    let ast: Ast<T> = source.parse()?;
    Ok(format!("{ast}\n\n({} nodes)", ast.count_nodes()))
}

/// Tokenizes an .imp file and prints each token on its own line.
#[derive(Debug, Clone, FromArgs)]
#[argh(subcommand, name = "lex")]
struct Lex {
    /// a path to an .imp file
    #[argh(positional)]
    file: PathBuf,
}

impl Lex {
    fn lex(self) -> anyhow::Result<()> {
        let source = read_source(&self.file)?;
        let tokens = tokenize(&source)
            .with_context(|| format!("could not tokenize {}", self.file.display()))?;

        for token in tokens {
            println!("{token}");
        }
        Ok(())
    }
}

fn read_source(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("could not read {}", file.display()))
}

/// A set of name-value pairs that can be optionally provided to the `run`
/// subcommand, giving variables an initial value other than zero.
#[derive(Debug, Clone)]
struct Bindings {
    /// The actual key-value pairs, mapping names to their bound values.
    map: HashMap<String, i64>,
}

type BindingsResult<'a, O> = IResult<&'a str, O, ErrorTree<&'a str>>;

fn name(input: &str) -> BindingsResult<'_, &str> {
    recognize(pair(
        satisfy(|c| c.is_ascii_alphabetic()),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

fn value(input: &str) -> BindingsResult<'_, i64> {
    map_res(recognize(pair(opt(char('-')), digit1)), i64::from_str)(input)
}

fn binding(input: &str) -> BindingsResult<'_, (&str, i64)> {
    separated_pair(
        name.context("expected name"),
        delimited(multispace0, tag(":").context("expected colon"), multispace0),
        value
            .cut()
            .context("expected a signed 64-bit integer"),
    )
    .context("expected name-value binding")
    .parse(input)
}

fn bindings(input: &str) -> BindingsResult<'_, Vec<(&str, i64)>> {
    delimited(
        pair(tag("{"), multispace0),
        separated_list0(delimited(multispace0, tag(","), multispace0), binding),
        pair(multispace0, tag("}").context("expected closing brace")),
    )(input)
}

impl FromStr for Bindings {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        final_parser(bindings)(s)
            .map(|pairs| Bindings {
                map: pairs
                    .into_iter()
                    .map(|(name, value)| (String::from(name), value))
                    .collect(),
            })
            .map_err(|err: ErrorTree<Location>| format!("\nerror trace:\n{err}"))
    }
}
