//! End-to-end tests running complete IMP programs through the public API.

use impcomb::{
    ast::{tree::NodeCount, Ast, AstError},
    backend::interpreter::{run, EvalError, State},
    int::{ImpBigInt, ImpInt, ImpSize},
    lexer::token::Tokens,
    parser::{parse, ParseFailure},
};

const FACTORIAL: &str = include_str!("../demos/factorial.imp");

/// Parses and runs `source` from an empty state, returning the final state
/// and everything the program printed.
fn execute<T: ImpInt>(source: &str) -> Result<(State<T>, String), EvalError> {
    let ast: Ast<T> = source.parse().unwrap();
    let mut state = State::default();
    let mut out = Vec::new();
    run(&ast, &mut state, &mut out)?;
    Ok((state, String::from_utf8(out).unwrap()))
}

#[test]
fn factorial() {
    let (state, out) = execute::<ImpSize>(FACTORIAL).unwrap();
    assert_eq!(state.get("n"), Some(&0));
    assert_eq!(state.get("p"), Some(&120));
    assert_eq!(state.to_string(), "{ n: 0, p: 120 }");
    assert_eq!(out, "120\n");
}

#[test]
fn factorial_with_initial_bindings() {
    // the program overwrites n, so a binding for it is irrelevant
    let ast: Ast = FACTORIAL.parse().unwrap();
    let mut state: State = [("n".to_string(), 10), ("q".to_string(), 7)]
        .into_iter()
        .collect();
    run(&ast, &mut state, std::io::sink()).unwrap();

    assert_eq!(state.get("p"), Some(&120));
    assert_eq!(state.get("q"), Some(&7));
}

#[test]
fn arithmetic_precedence_and_associativity() {
    let (state, _) = execute::<ImpSize>("x := 2 + 3 * 4; y := 1 + 2 + 3; z := 8 - 4 - 2").unwrap();
    assert_eq!(state.get("x"), Some(&14));
    assert_eq!(state.get("y"), Some(&6));
    assert_eq!(state.get("z"), Some(&2));

    let (state, _) = execute::<ImpSize>("x := (2 + 3) * 4; y := 100 / 10 / 5").unwrap();
    assert_eq!(state.get("x"), Some(&20));
    assert_eq!(state.get("y"), Some(&2));
}

#[test]
fn redundant_parentheses_do_not_change_the_tree() {
    let plain: Ast = "x := 1".parse().unwrap();
    let wrapped: Ast = "x := ((1))".parse().unwrap();
    assert_eq!(plain, wrapped);
    assert_eq!(plain.count_nodes(), 3);
}

#[test]
fn unseparated_statements_do_not_parse() {
    let tokens = Tokens::try_from("x := 1 y := 2").unwrap();
    assert_eq!(parse::<ImpSize>(&tokens), Err(ParseFailure));
    assert!(matches!(
        "x := 1 y := 2".parse::<Ast>(),
        Err(AstError::Parse(ParseFailure))
    ));
}

#[test]
fn conditionals_and_comments() {
    let source = "
# classify x
x := 0 - 4;
if x < 0 and not x = -4 then
    sign := 0 - 1
else
    if x == 0 then sign := 0 else sign := 1 end
end;
if x <= 0 or x >= 100 then print x end
";
    // `-4` is not a literal, so the source above does not parse
    assert!(source.parse::<Ast>().is_err());

    let source = source.replace("-4", "0 - 4");
    let (state, out) = execute::<ImpSize>(&source).unwrap();
    assert_eq!(state.get("sign"), Some(&1));
    assert_eq!(out, "-4\n");
}

#[test]
fn division_by_zero_keeps_earlier_effects() {
    let ast: Ast = "a := 10; b := a / 2; c := b / (a - 10); d := 1".parse().unwrap();
    let mut state = State::default();
    let result = run(&ast, &mut state, std::io::sink());

    assert!(matches!(result, Err(EvalError::DivisionByZero)));
    assert_eq!(state.get("a"), Some(&10));
    assert_eq!(state.get("b"), Some(&5));
    assert_eq!(state.get("c"), None);
    assert_eq!(state.get("d"), None);
}

#[test]
fn overflow_depends_on_the_integer_type() {
    let source = "x := 1; i := 0; while i < 70 do x := x * 2; i := i + 1 end; print x";

    let err = execute::<ImpSize>(source).unwrap_err();
    assert!(matches!(err, EvalError::Overflow { op: "*" }));

    let (state, out) = execute::<ImpBigInt>(source).unwrap();
    assert_eq!(out, "1180591620717411303424\n");
    assert_eq!(state.get("i"), Some(&ImpBigInt::from(70)));
}

#[test]
fn display_renders_s_expressions() {
    let ast: Ast = FACTORIAL.parse().unwrap();
    let rendered = ast.to_string();
    eprintln!("{rendered}");

    assert!(rendered.starts_with("(assign n 5)\n(assign p 1)\n(loop (while (> n 0))"));
    assert!(rendered.ends_with("(print p)"));
}

#[test]
fn long_programs_run_without_deep_recursion() {
    const N: usize = 100_000;

    let statements = vec!["x := x + 1"; N].join("; ");
    let (state, _) = execute::<ImpSize>(&statements).unwrap();
    assert_eq!(state.get("x"), Some(&100_000));

    let sum = format!("x := {}", vec!["1"; N].join(" + "));
    let (state, _) = execute::<ImpSize>(&sum).unwrap();
    assert_eq!(state.get("x"), Some(&100_000));

    let disjunction = format!("if {} then y := 1 end", vec!["x < 0"; N].join(" or "));
    let (state, _) = execute::<ImpSize>(&disjunction).unwrap();
    assert_eq!(state.get("y"), None);
}
