use std::fs;

use algom::{
    Engine, EngineConfig, Error, Value,
    error::ErrorCategory,
    interpreter::value::{complex::ComplexNumber, rational::Rational},
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_dsl_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = Engine::new().run(&code) {
                panic!("DSL example {} in {:?} failed:\n{}\nError: {}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No DSL examples found in book/src");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```algom") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn run(src: &str) -> Value {
    Engine::new().run(src)
                 .unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"))
}

fn fail(src: &str) -> Error {
    match Engine::new().run(src) {
        Ok(value) => panic!("Script succeeded with {value} but was expected to fail:\n{src}"),
        Err(e) => e,
    }
}

fn rational(numerator: i64, denominator: i64) -> Value {
    Value::from(Rational::new(numerator, denominator).unwrap())
}

#[test]
fn declaration_and_assignment() {
    assert_eq!(run("let x = 5; x = x + 2; x;"), Value::from(7));
    assert_eq!(run("let x; x;"), Value::Null);
    assert_eq!(run("let x = 1; x = x * 10;"), Value::from(10));
}

#[test]
fn undeclared_function_is_reported() {
    let err = fail("f(1,2);");
    assert_eq!(err.category(), ErrorCategory::Resolver);
    assert!(err.to_string().contains("No function named f exists."), "{err}");
}

#[test]
fn undeclared_variable_is_reported() {
    let err = fail("y + 1;");
    assert_eq!(err.category(), ErrorCategory::Resolver);
    assert!(err.to_string().contains("No variable named y exists."), "{err}");
}

#[test]
fn jagged_matrix_is_a_syntax_error() {
    let err = fail("[ [1,2], [3,4,5] ];");
    assert_eq!(err.category(), ErrorCategory::Syntax);
    assert!(err.to_string().contains("No jagged arrays permitted."), "{err}");
}

#[test]
fn errors_are_stable_across_fresh_engines() {
    for src in ["f(1,2);", "1 / 0;", "[ [1], 2 ];", "let x = 1; let x = 2;"] {
        assert_eq!(fail(src), fail(src));
    }
}

#[test]
fn implicit_multiplication() {
    assert_eq!(run("2(3+1);"), Value::from(8));
    assert_eq!(run("let x = 3; 2x;"), run("let x = 3; 2*x;"));
    assert_eq!(run("let x = 1.5; 2x;"), run("let x = 1.5; 2*x;"));
    assert_eq!(run("(1 + 1)(2 + 2);"), Value::from(8));
    assert_eq!(run("let x = 4; x(2);"), Value::from(8));
}

#[test]
fn minus_after_an_operand_subtracts() {
    assert_eq!(run("let x = 10; x-4;"), Value::from(6));
    assert_eq!(run("let x = 10; x - 4;"), Value::from(6));
    assert_eq!(run("(10)-4;"), Value::from(6));
    assert_eq!(run("(10) -4;"), Value::from(6));
    assert_eq!(run("3 - -2;"), Value::from(5));
    assert_eq!(run("let x = 3; -x^2;"), Value::from(-9));
}

#[test]
fn spaced_negative_literal_after_a_symbol_multiplies() {
    assert_eq!(run("let x = 3; x -4;"), Value::from(-12));
    assert_eq!(run("let x = 3; 2x -1;"), Value::from(-6));
    assert_eq!(run("let x = 3; 1 + x -2;"), Value::from(-5));
}

#[test]
fn closures_capture_their_definition_scope() {
    let src = "let f(n) = { let g() = n; g };
               let a = f(5);
               let b = f(7);";
    assert_eq!(run(&format!("{src} a();")), Value::from(5));
    assert_eq!(run(&format!("{src} b();")), Value::from(7));
}

#[test]
fn closures_share_mutable_captures() {
    let src = "let make() = {
                   let count = 0;
                   let inc() = { count = count + 1; count };
                   inc
               };
               let c = make();
               c(); c();
               c();";
    assert_eq!(run(src), Value::from(3));
}

#[test]
fn curried_calls() {
    assert_eq!(run("let add(a) = { let inner(b) = a + b; inner }; add(1)(2);"),
               Value::from(3));
}

#[test]
fn recursion() {
    assert_eq!(run("let fact(n) = if (n <= 1) 1 else n * fact(n - 1); fact(10);"),
               Value::from(3_628_800));
    assert_eq!(run("let fib(n) = if (n < 2) n else fib(n - 1) + fib(n - 2); fib(15);"),
               Value::from(610));
}

#[test]
fn runaway_recursion_hits_the_depth_limit() {
    let err = fail("let f(n) = f(n + 1); f(0);");
    assert_eq!(err.category(), ErrorCategory::Limit);

    let engine = Engine::with_config(EngineConfig { max_call_depth: 10,
                                                    ..EngineConfig::default() });
    let err = engine.run("let down(n) = if (n == 0) 0 else down(n - 1); down(20);")
                    .unwrap_err();
    assert!(err.to_string().contains("Maximum call depth of 10 exceeded."), "{err}");
    assert_eq!(engine.run("let down(n) = if (n == 0) 0 else down(n - 1); down(5);")
                     .unwrap(),
               Value::from(0));
}

#[test]
fn step_budget_stops_infinite_loops() {
    let engine = Engine::with_config(EngineConfig { max_steps: Some(1_000),
                                                    ..EngineConfig::default() });
    let err = engine.run("while (true) 1;").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);
}

#[test]
fn loops_and_blocks() {
    let src = "let i = 0;
               let s = 0;
               while (i < 5) {
                   i = i + 1;
                   s = s + i;
               }
               s;";
    assert_eq!(run(src), Value::from(15));
    assert_eq!(run("let y = { let a = 1; let b = 2; a + b }; y;"), Value::from(3));
    assert_eq!(run("let x = 1; { let x = 2; }; x;"), Value::from(1));
    assert_eq!(run("while (false) 1;"), Value::Null);
}

#[test]
fn conditionals() {
    assert_eq!(run("if (2 < 3) 7 else 11;"), Value::from(7));
    assert_eq!(run("if (2 > 3) 7 else 11;"), Value::from(11));
    assert_eq!(run("if (false) 1;"), Value::Null);
    assert_eq!(run("if (1) 2 else 3;"), Value::from(3));
}

#[test]
fn conditional_branches_can_be_terminated_statements() {
    assert_eq!(run("let y = 0; if (2 > 1) y = 1; else y = 2; y;"), Value::from(1));
    assert_eq!(run("let y = 0; if (2 < 1) y = 1; else y = 2; y;"), Value::from(2));
    assert_eq!(run("let r = 0; if (1 < 2) if (2 < 1) r = 1; else r = 2; r;"), Value::from(2));
    assert_eq!(run("if (true) let a = 5; else let b = 6;"), Value::from(5));
    assert_eq!(run("let i = 0; while (i < 3) i = i + 1; i;"), Value::from(3));
    assert_eq!(fail("if (true) 1; 2; else 3;").category(), ErrorCategory::Syntax);
}

#[test]
fn chained_comparisons() {
    assert_eq!(run("1 < 2 < 3;"), Value::Bool(true));
    assert_eq!(run("1 < 3 < 2;"), Value::Bool(false));
    assert_eq!(run("3 >= 3 > 1;"), Value::Bool(true));
}

#[test]
fn chained_comparisons_evaluate_each_operand_once() {
    let counter = "let n = 0; let f() = { n = n + 1; n };";
    assert_eq!(run(&format!("{counter} 0 < f() < 5; n;")), Value::from(1));
    assert_eq!(run(&format!("{counter} 0 < f() < f() <= 5;")), Value::Bool(true));
    assert_eq!(run(&format!("{counter} 5 < f() < f(); n;")), Value::from(2));
    assert_eq!(fail("1 < 2 < \"a\";").category(), ErrorCategory::Type);
}

#[test]
fn logic() {
    assert_eq!(run("true and false;"), Value::Bool(false));
    assert_eq!(run("true or false;"), Value::Bool(true));
    assert_eq!(run("true xor true;"), Value::Bool(false));
    assert_eq!(run("true xnor true;"), Value::Bool(true));
    assert_eq!(run("true nand false;"), Value::Bool(true));
    assert_eq!(run("false nor false;"), Value::Bool(true));
    assert_eq!(run("not true;"), Value::Bool(false));
    assert_eq!(fail("1 and true;").category(), ErrorCategory::Type);
}

#[test]
fn redeclaration_in_the_same_scope_fails() {
    let err = fail("let x = 1; let x = 2;");
    assert_eq!(err.category(), ErrorCategory::Resolver);
    assert!(err.to_string()
               .contains("Name “x” has been declared in the same scope, redeclaration prohibited."),
            "{err}");
}

#[test]
fn reading_a_local_in_its_own_initializer_fails() {
    let err = fail("{ let x = x; };");
    assert!(matches!(err, Error::Resolve(_)), "{err}");
}

#[test]
fn argument_count_is_checked() {
    let err = fail("let f(a, b) = a + b; f(1);");
    assert_eq!(err.category(), ErrorCategory::Arguments);
    assert!(err.to_string()
               .contains("Function “f” requires 2 arguments, but 1 were passed."),
            "{err}");
    assert_eq!(fail("sqrt(1, 2);").category(), ErrorCategory::Arguments);
}

#[test]
fn calling_a_number_fails() {
    assert_eq!(fail("let x = 3; x();").category(), ErrorCategory::Type);
}

#[test]
fn tuples() {
    assert_eq!(run("(1, 2) ++ 3;").to_string(), "(1, 2, 3)");
    assert_eq!(run("0 ++ (1, 2);").to_string(), "(0, 1, 2)");
    assert_eq!(run("(1, 2) ++ (3, 4);").to_string(), "(1, 2, 3, 4)");
    assert_eq!(run("1 ++ 2;").to_string(), "(1, 2)");

    let err = fail("(1, 2) + 1;");
    assert!(err.to_string().contains("Operator + doesn't work with tuples."), "{err}");
}

#[test]
fn vectors_and_matrices() {
    assert_eq!(run("[1, 2, 3] * 2;").to_string(), "[2, 4, 6]");
    assert_eq!(run("2 * [3, 4];").to_string(), "[6, 8]");
    assert_eq!(run("[4, 5] + [1, 2];").to_string(), "[5, 7]");
    assert_eq!(run("[2, 4] / 2;").to_string(), "[1, 2]");
    assert_eq!(run("[[1, 2], [3, 4]] - [[1, 1], [1, 1]];").to_string(),
               "[[0, 1], [2, 3]]");
    assert_eq!(run("-[1, 2];").to_string(), "[-1, -2]");
    assert_eq!(fail("[1, 2] + [1, 2, 3];").category(), ErrorCategory::Type);
    assert_eq!(fail("[1, 2] ^ 2;").category(), ErrorCategory::Type);
}

#[test]
fn ranges_and_absolute_value() {
    assert_eq!(run("[0:5];").to_string(), "[0, 1, 2, 3, 4]");
    assert_eq!(run("[0:10:3];").to_string(), "[0, 3, 6, 9]");
    assert_eq!(run("|-5|;"), Value::from(5));
    assert_eq!(run("let v = [3, 4]; |v|;"), Value::from(5.0));
}

#[test]
fn ranges_reject_unbounded_input() {
    assert_eq!(fail("[0:Inf];").category(), ErrorCategory::Type);
    assert_eq!(fail("[0:NaN];").category(), ErrorCategory::Type);
    assert_eq!(fail("[0:1:0];").category(), ErrorCategory::Type);
    assert_eq!(fail("[0:10000000];").category(), ErrorCategory::Limit);
}

#[test]
fn range_elements_count_against_the_step_budget() {
    let config = EngineConfig { max_steps: Some(50),
                                ..EngineConfig::default() };

    let err = Engine::with_config(config).run("sum([0:2000]);").unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Limit);
    assert!(err.to_string().contains("budget of 50 steps"), "{err}");

    assert_eq!(Engine::with_config(config).run("sum([0:10]);").unwrap(), Value::from(45));
}

#[test]
fn arithmetic_over_the_tower() {
    assert_eq!(run("7 / 2;"), Value::from(3.5));
    assert_eq!(run("6 / 3;"), Value::from(2));
    assert_eq!(run("1/2 + 1/3;"), rational(5, 6));
    assert_eq!(run("1/2 + 1;"), rational(3, 2));
    assert_eq!(run("1/2 + 0.25;"), Value::from(0.75));
    assert_eq!(run("2^10;"), Value::from(1024));
    assert_eq!(run("-7 // 2;"), Value::from(-4));
    assert_eq!(run("-7 mod 3;"), Value::from(2));
    assert_eq!(run("-7 rem 3;"), Value::from(-1));
    assert_eq!(run("-7 % 3;"), Value::from(-1));
    assert_eq!(run("5!;"), Value::from(120));
    assert_eq!(run("0x1f + 0b11 + 0o7;"), Value::from(41));
    assert_eq!(run("1.5e3;"), Value::from(1500.0));
}

#[test]
fn arithmetic_failures() {
    assert_eq!(fail("1 / 0;").category(), ErrorCategory::Arithmetic);
    assert_eq!(fail("1.0 / 0;").category(), ErrorCategory::Arithmetic);
    assert_eq!(fail("5 mod 0;").category(), ErrorCategory::Arithmetic);
    assert_eq!(fail("9223372036854775807 + 1;").category(), ErrorCategory::Arithmetic);
    assert_eq!(fail("21!;").category(), ErrorCategory::Arithmetic);
    assert_eq!(fail("(1/2)^(1/2);").category(), ErrorCategory::Unimplemented);
}

#[test]
fn rationals_compare_numerator_to_numerator() {
    assert_eq!(run("1/2 < 1;"), Value::Bool(true));
    assert_eq!(run("1/2 > 1;"), Value::Bool(false));
    assert_eq!(run("1/2 >= 1;"), Value::Bool(false));
    assert_eq!(run("3/2 > 1;"), Value::Bool(true));
    assert_eq!(run("1/2 == 2/4;"), Value::Bool(true));
    assert_eq!(run("1/2 == 0.5;"), Value::Bool(true));
}

#[test]
fn complex_numbers() {
    assert_eq!(run("(2 + 3i) * (2 - 3i) == 13;"), Value::Bool(true));
    assert_eq!(run("(2 + 3i) ^ 2 == -5 + 12i;"), Value::Bool(true));
    assert_eq!(run("(4 + 2i) / 2 == 2 + 1i;"), Value::Bool(true));
    assert_eq!(run("sqrt(-4);"), Value::from(ComplexNumber::new(0.0, 2.0)));
    assert_eq!(fail("1i < 2;").category(), ErrorCategory::Type);
}

#[test]
fn strings() {
    assert_eq!(run(r#""ab" + "cd";"#), Value::from("abcd"));
    assert_eq!(run(r#""a" < "b";"#), Value::Bool(true));
    assert_eq!(run(r#""a" == "a";"#), Value::Bool(true));
    assert_eq!(fail(r#""a" * 2;"#).category(), ErrorCategory::Type);
}

#[test]
fn constants_and_natives() {
    assert_eq!(run("pi;"), Value::from(std::f64::consts::PI));
    assert_eq!(run("let pi = 3; pi;"), Value::from(3));
    assert_eq!(run("max(1, 5, 3);"), Value::from(5));
    assert_eq!(run("sum([1, 2, 3], 4);"), Value::from(10));
    assert_eq!(run("avg([2, 4]);"), Value::from(3));
    assert_eq!(run("sqrt(16);"), Value::from(4));
    assert_eq!(run("gcd(12, 18);"), Value::from(6));
    assert_eq!(run("even(4) and odd(3);"), Value::Bool(true));
    assert_eq!(run("sin(0) == 0;"), Value::Bool(true));
    assert_eq!(run("floor(2.7) + ceil(2.2);"), Value::from(5));
}

#[test]
fn natives_can_be_shadowed() {
    assert_eq!(run("let sin(x) = 2x; sin(4);"), Value::from(8));
}

#[test]
fn compile_to_callable() {
    let f = algom::compile_to_callable("x^2 + 1", &["x"]).unwrap();
    assert_eq!(f.arity(), 1);
    assert_eq!(f.call_f64(&[3.0]).unwrap(), 10.0);
    assert_eq!(f.call(&[Value::from(2)]).unwrap(), Value::from(5));
    assert_eq!(f.call(&[]).unwrap_err().category(), ErrorCategory::Arguments);

    let g = algom::compile_to_callable("let y = 2 * x; y + 1", &["x"]).unwrap();
    assert_eq!(g.call_f64(&[4.0]).unwrap(), 9.0);
    assert_eq!(g.call_f64(&[5.0]).unwrap(), 11.0);

    let h = algom::compile_to_callable("a * b", &["a", "b"]).unwrap();
    assert_eq!(h.call_f64(&[1.5, 4.0]).unwrap(), 6.0);

    let engine = Engine::new();
    let apply = engine.run("let apply(f, x, y) = f(x, y);").unwrap();
    let args = [h.to_value(), Value::from(3), Value::from(4)];
    assert_eq!(engine.call(&apply, &args).unwrap(), Value::from(12));

    let err = algom::compile_to_callable("x +", &["x"]).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Syntax);
}

#[test]
fn programs_share_a_host_scope() {
    let engine = Engine::new();
    let scope = engine.global().child();
    engine.evaluate_in(&engine.parse("let total = 0;"), &scope).unwrap();
    for _ in 0..3 {
        engine.evaluate_in(&engine.parse("total = total + 2;"), &scope)
              .unwrap();
    }
    assert_eq!(engine.evaluate_in(&engine.parse("total;"), &scope).unwrap(),
               Value::from(6));

    assert_eq!(fail("total;").category(), ErrorCategory::Resolver);
}
