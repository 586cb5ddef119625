//! Printing a parsed program and parsing the text again gives back the same
//! tree.

#![allow(clippy::unwrap_used, reason = "Tests can panic")]

use algom::parse;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn assert_round_trip(source: &str) {
    let program = parse(source);
    assert!(program.error().is_none(), "{source} failed to parse: {:?}", program.error());

    let printed = program.to_string();
    let reparsed = parse(&printed);
    assert_eq!(reparsed, program, "{source} printed as {printed}");
}

#[test]
fn statements_survive_printing() {
    for source in ["let a = 3 * (4 + 5);",
                   "let x; x = 2 ^ 3 ^ 2;",
                   "let f(x, y) = x ^ 2 + y; f(1, 2);",
                   "let g() = { let t = 1; t + 1 };",
                   "if (1 > 2) 3 else { 4 };",
                   "let i = 0; while (i < 10) { i = i + 1 };",
                   "[1, 2.5, 3/4]; [[1, 2], [3, 4]];",
                   "(1, \"two\", null) ++ (true, false);",
                   "not true or false and true xor false;",
                   "7 // 2 + 7 mod 2 - 7 rem 2 + 7 % 2;",
                   "5! - (2)!;",
                   "sin(pi) + max(1, 2, 3);",
                   "2i * 3 + Inf;",
                   "let x = 1; x - -3 - - 3;",
                   "(10)-4;",
                   "let x = 2; x -4;",
                   "1 < 2 <= 3 > 0;",
                   "let y = 0; if (y < 1) y = 1; else y = 2;"]
    {
        assert_round_trip(source);
    }
}

#[test]
fn literals_keep_their_form() {
    assert_eq!(parse("2/4;").to_string(), "2/4;");
    assert_eq!(parse("1e3;").to_string(), "1000.0;");
    assert_eq!(parse("0xff;").to_string(), "255;");
    assert_eq!(parse("-(5);").to_string(), "-(5);");
}

/// Arithmetic over a few symbols and literals, every operator spaced and
/// every nested operand parenthesized.
fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![(0_u32..1000).prop_map(|n| n.to_string()),
                           "[abc]",
                           (1_u32..50, 1_u32..50).prop_map(|(n, d)| format!("{n}/{d}")),
                           Just("1.5".to_string())];

    leaf.prop_recursive(4, 32, 2, |inner| {
            let op = prop::sample::select(vec!["+", "-", "*", "/", "^", "//", "mod", "rem", "and",
                                               "or"]);
            prop_oneof![(inner.clone(), op, inner.clone()).prop_map(|(l, op, r)| {
                                                              format!("{l} {op} {r}")
                                                          }),
                        inner.clone().prop_map(|e| format!("({e})")),
                        inner.clone().prop_map(|e| format!("-({e})")),
                        inner.prop_map(|e| format!("({e})!"))]
        })
}

proptest! {
    #[test]
    fn generated_expressions_round_trip(source in expression()) {
        let program = parse(&format!("{source};"));
        prop_assert!(program.error().is_none(), "{} failed: {:?}", source, program.error());
        prop_assert_eq!(parse(&program.to_string()), program);
    }
}
