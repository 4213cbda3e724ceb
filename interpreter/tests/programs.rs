// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{cell::RefCell, rc::Rc};

use lilt_interpreter::{parse_source, Interpreter, Scope};
use rstest::rstest;

/// Runs a program the way the CLI does: a `main();` call is appended and the
/// output sink is captured. Returns the captured stdout and the final value's
/// string form.
fn interpret(source: &str) -> (String, String) {
    let code = format!("{source}\nmain();");

    let (program, diagnostics) = parse_source(&code);
    assert!(diagnostics.is_empty(), "parse diagnostics: {diagnostics:?}");

    let output: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let mut interpreter = Interpreter::new(output.clone());
    let value = interpreter
        .run(&program, &Scope::new())
        .expect("runtime error");

    let stdout = String::from_utf8_lossy(&output.borrow()).into_owned();
    (stdout, value.to_string())
}

#[test]
fn fizzbuzz_counts_down() {
    let (stdout, value) = interpret(include_str!("../../demos/fizzbuzz.lilt"));
    assert_eq!(value, "");

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 100);
    assert_eq!(lines[0], "buzz");
    assert_eq!(lines[1], "fizz");
    assert_eq!(lines[2], "98");
    assert_eq!(lines[10], "fizzbuzz");
    assert_eq!(lines[99], "1");
}

#[test]
fn currying_multiplies_a_range() {
    let (stdout, value) = interpret(include_str!("../../demos/currying.lilt"));
    assert_eq!(value, "");

    let expected: String = (0..=25).map(|x| format!("{} ", x * 4)).collect();
    assert_eq!(stdout, format!("{expected}\n"));
}

#[test]
fn recursive_list_reverse() {
    let (stdout, _) = interpret(include_str!("../../demos/reverse.lilt"));
    assert_eq!(stdout, "1 1 1 2 3 3 6 \n6 3 3 2 1 1 1 \n");
}

#[test]
fn even_odd_counts() {
    let (stdout, _) = interpret(include_str!("../../demos/evenodd.lilt"));
    assert_eq!(stdout, "Evens: 51\nOdds: 50\n");
}

#[test]
fn fibonacci_by_tabulation() {
    let (stdout, _) = interpret(include_str!("../../demos/fib.lilt"));

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "0");
    assert_eq!(lines[1], "1");
    assert_eq!(lines[2], "1");
    assert_eq!(lines[10], "55");
    assert_eq!(lines[50], "12586269025");
}

#[rstest]
#[case("fn main() Int { return 42; }", "42")]
#[case("fn main() String { return \"done\"; }", "done")]
#[case("fn main() { return; }", "")]
fn main_result_is_the_final_value(#[case] source: &str, #[case] expected: &str) {
    let (stdout, value) = interpret(source);
    assert!(stdout.is_empty());
    assert_eq!(value, expected);
}

#[test]
fn binary_search() {
    let source = r#"
        fn search(lst: List, target: Int) Int {
            let index: Int = lst.len() / 2;

            if (lst.len() == 1 && lst[0] != target) {
                return -1;
            } else if (lst[index] == target) {
                return lst[index];
            } else if (lst[index] < target) {
                return search(lst.slice(index, lst.len() - 1), target);
            } else {
                return search(lst.slice(0, index - 1), target);
            }
        }

        fn main() {
            println(search([1], 1));
            println(search([1, 2, 3, 4, 5, 6], 10));
            println(search([1, 2, 3, 4, 5, 6], 5));
            return;
        }
    "#;

    let (stdout, _) = interpret(source);
    assert_eq!(stdout, "1\n-1\n5\n");
}

#[test]
fn missing_main_is_reported_at_the_injected_call() {
    let code = "let x: Int = 1;\nmain();";
    let (program, diagnostics) = parse_source(code);
    assert!(diagnostics.is_empty());

    let mut interpreter = Interpreter::new(Rc::new(RefCell::new(Vec::new())));
    let error = interpreter
        .run(&program, &Scope::new())
        .expect_err("expected a name error");

    assert_eq!(error.to_string(), "[2,1] main is not defined");
}

#[test]
fn failing_programs_produce_no_buffered_output() {
    let source = "fn main() { println(\"before\"); boom(); }";
    let code = format!("{source}\nmain();");

    let (program, diagnostics) = parse_source(&code);
    assert!(diagnostics.is_empty());

    let output: Rc<RefCell<Vec<u8>>> = Rc::new(RefCell::new(Vec::new()));
    let mut interpreter = Interpreter::new(output.clone());
    let error = interpreter
        .run(&program, &Scope::new())
        .expect_err("expected a name error");

    assert_eq!(error.message(), "boom is not defined");

    // The sink holds what was printed before the failure; the CLI simply
    // never flushes it.
    assert_eq!(String::from_utf8_lossy(&output.borrow()), "before\n");
}
