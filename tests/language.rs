use std::{cell::RefCell, collections::VecDeque, fs, rc::Rc};

use rill::{
    error::{Error, ParseError, RuntimeError},
    interpreter::{
        evaluator::core::Interpreter,
        host::HostIo,
        value::core::{Value, ValueKind},
    },
    run_source,
};
use walkdir::WalkDir;

fn eval(src: &str) -> Result<Value, Error> {
    run_source("test.rill", src)
}

fn eval_value(src: &str) -> Value {
    match eval(src) {
        Ok(value) => value,
        Err(e) => panic!("Script failed: {e}\nScript: {src}"),
    }
}

fn eval_number(src: &str) -> f64 {
    match eval_value(src).kind {
        ValueKind::Number(n) => n,
        other => panic!("Expected a number, got {other:?}\nScript: {src}"),
    }
}

fn eval_bool(src: &str) -> bool {
    match eval_value(src).kind {
        ValueKind::Bool(b) => b,
        other => panic!("Expected a bool, got {other:?}\nScript: {src}"),
    }
}

fn eval_string(src: &str) -> String {
    match eval_value(src).kind {
        ValueKind::Str(s) => s.to_string(),
        other => panic!("Expected a string, got {other:?}\nScript: {src}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match eval(src) {
        Err(Error::Runtime(e)) => e,
        Err(Error::Parse(e)) => panic!("Expected a runtime error, got a parse error: {e}"),
        Ok(v) => panic!("Script succeeded with {v} but was expected to fail\nScript: {src}"),
    }
}

fn parse_error(src: &str) -> ParseError {
    match eval(src) {
        Err(Error::Parse(e)) => e,
        Err(Error::Runtime(e)) => panic!("Expected a parse error, got a runtime error: {e}"),
        Ok(v) => panic!("Script succeeded with {v} but was expected to fail\nScript: {src}"),
    }
}

/// Host capabilities that record output and replay canned input lines.
struct TestIo {
    out:   String,
    input: VecDeque<String>,
}

impl TestIo {
    fn new(input: &[&str]) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self { out:   String::new(),
                                    input: input.iter().map(|s| (*s).to_string()).collect(), }))
    }
}

impl HostIo for TestIo {
    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.out.push_str(prompt);
        self.input.pop_front()
    }
}

#[test]
fn numeric_literals_evaluate_to_their_double_value() {
    assert_eq!(eval_number("42"), 42.0);
    assert_eq!(eval_number("3.14"), 3.14);
    assert_eq!(eval_number(".5"), 0.5);
    assert_eq!(eval_number("1e-10"), 1e-10);
    assert_eq!(eval_number("2.5e+3"), 2500.0);
}

#[test]
fn arithmetic_and_precedence() {
    assert_eq!(eval_number("1 + 2 * 3"), 7.0);
    assert_eq!(eval_number("(1 + 2) * 3"), 9.0);
    assert_eq!(eval_number("10 % 4"), 2.0);
    assert_eq!(eval_number("7 - 2 - 1"), 4.0);
    assert_eq!(eval_number("-3 + 1"), -2.0);
    assert_eq!(eval_number("+5"), 5.0);
}

#[test]
fn power_binds_tighter_than_sign_and_associates_right() {
    assert_eq!(eval_number("2 ^ 10"), 1024.0);
    assert_eq!(eval_number("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval_number("-2 ^ 2"), -4.0);
}

#[test]
fn program_value_is_the_last_statement() {
    assert_eq!(eval_number("set x : 10; set y : 20; x + y"), 30.0);
}

#[test]
fn assignment_yields_its_value_and_both_spellings_work() {
    assert_eq!(eval_number("set x : 2"), 2.0);
    assert_eq!(eval_number("x := 5"), 5.0);
    assert_eq!(eval_number("set a := 1; a : a + 1; a"), 2.0);
}

#[test]
fn user_functions_evaluate() {
    assert_eq!(eval_number("fn add(a, b) { a + b }; add(2, 3)"), 5.0);
    assert_eq!(eval_number("fn (x) { x * 2 }(21)"), 42.0);
}

#[test]
fn for_loops_include_both_bounds() {
    assert_eq!(eval_number("set c : 0; for i := 0 to 5 { c := c + 1 }; c"), 6.0);
    assert_eq!(eval_number("set c : 0; for i := 5 to 0 step -1 { c := c + 1 }; c"),
               6.0);
    // Direction mismatch: zero iterations.
    assert_eq!(eval_number("set c : 0; for i := 0 to 5 step -1 { c := c + 1 }; c"),
               0.0);
}

#[test]
fn for_loop_yields_none_and_keeps_the_final_binding() {
    assert!(eval_value("for i := 0 to 5 { i * 2 }").is_none());
    assert_eq!(eval_number("for i := 0 to 5 { }; i"), 5.0);
}

#[test]
fn closure_in_loop_shares_the_binding() {
    // The loop variable is rebound in the enclosing table, not a fresh
    // per-iteration scope, so every closure sees the final value.
    assert_eq!(eval_number("set g : none; for i := 0 to 2 { g := fn () { i } }; g()"),
               2.0);
}

#[test]
fn while_loops_run_until_their_condition_flips() {
    assert_eq!(eval_number("set n : 10; set c : 0; while n > 1 { n := n - 1; c := c + 1 }; c"),
               9.0);
    assert!(eval_value("while false { 1 }").is_none());
}

#[test]
fn division_and_modulo_by_zero_fail() {
    let error = runtime_error("1 / 0");
    assert!(error.to_string().contains("Division by zero"));
    let error = runtime_error("1 % 0");
    assert!(error.to_string().contains("Division by zero"));
}

#[test]
fn division_error_span_covers_the_zero() {
    let error = runtime_error("1 / 0");
    assert_eq!(error.span.start.line, 1);
    assert_eq!(error.span.start.column, 5);
    assert_eq!(error.span.end.column, 6);
}

#[test]
fn zero_power_zero_fails() {
    let error = runtime_error("0 ^ 0");
    assert!(error.to_string().contains("0^0 is undefined"));
    assert_eq!(eval_number("2 ^ 10"), 1024.0);
}

#[test]
fn string_repetition() {
    assert_eq!(eval_string(r#""ab" * 3"#), "ababab");
    runtime_error(r#""ab" * -1"#);
    runtime_error(r#""ab" * 1.5"#);
}

#[test]
fn string_concatenation_renders_any_right_operand() {
    assert_eq!(eval_string(r#""n = " + 3"#), "n = 3");
    assert_eq!(eval_string(r#""b: " + true"#), "b: true");
    assert_eq!(eval_string(r#""x" + none"#), "xnone");
    assert_eq!(eval_string(r#""a" + "b" + "c""#), "abc");
}

#[test]
fn string_ordering_is_lexicographic() {
    assert!(eval_bool(r#""abc" < "abd""#));
    assert!(eval_bool(r#""b" >= "a""#));
    runtime_error(r#""a" < 3"#);
}

#[test]
fn parameter_shadowing_leaves_the_outer_binding_alone() {
    assert_eq!(eval_number("set x : 1; fn f(x) { x := 99 }; f(5); x"), 1.0);
}

#[test]
fn closures_capture_their_defining_scope() {
    assert_eq!(eval_number("fn make_adder(a) { fn add(b) { a + b } }; \
                            set add2 : make_adder(2); add2(40)"),
               42.0);
}

#[test]
fn equality_is_total_across_types() {
    assert!(!eval_bool("none = 0"));
    assert!(!eval_bool(r#""" = false"#));
    assert!(!eval_bool(r#""3" = 3"#));
    assert!(eval_bool("none != 0"));
    assert!(eval_bool("1 = 1"));
    assert!(eval_bool("none = none"));
    assert!(eval_bool(r#""ab" = "ab""#));
}

#[test]
fn if_expressions_yield_branch_values() {
    assert_eq!(eval_number("if true { 1 } else { 2 }"), 1.0);
    assert_eq!(eval_number("if false { 1 } else { 2 }"), 2.0);
    assert!(eval_value("if false { 1 }").is_none());
}

#[test]
fn conditions_must_be_boolean() {
    let error = runtime_error("if 1 { 2 }");
    assert!(error.to_string().contains("Expected a bool"));
    runtime_error("while 1 { }");
    runtime_error(r#"for i := true to 5 { }"#);
}

#[test]
fn logical_and_bitwise_connectives() {
    assert!(!eval_bool("true and false"));
    assert!(eval_bool("true or false"));
    assert!(!eval_bool("true xor true"));
    assert!(eval_bool("not false"));
    assert!(eval_bool("not none"));
    // `not` binds looser than comparison.
    assert!(!eval_bool("not 1 = 1"));
    // Between numbers the connectives act bitwise.
    assert_eq!(eval_number("6 and 3"), 2.0);
    assert_eq!(eval_number("6 or 3"), 7.0);
    assert_eq!(eval_number("6 xor 3"), 5.0);
}

#[test]
fn connectives_do_not_short_circuit() {
    // The right operand is always evaluated, so its failure surfaces even
    // when the left operand already decides the result.
    runtime_error("false and 1 / 0");
    runtime_error("true or 1 / 0");
}

#[test]
fn undefined_operations_are_reported() {
    assert!(runtime_error("true + 1").to_string().contains("is not defined for"));
    runtime_error("none + 1");
    runtime_error(r#"1 + "s""#);
    runtime_error("not 3");
    runtime_error(r#"not "s""#);
}

#[test]
fn unknown_variables_are_reported() {
    let error = runtime_error("foo");
    assert!(error.to_string().contains("'foo' is not defined"));
}

#[test]
fn wrong_arity_names_expected_and_found() {
    let error = runtime_error("fn f(x, y) { x + y }; f(3)");
    assert!(error.to_string().contains("expects 2 argument(s), found 1"));
}

#[test]
fn calling_a_non_function_fails() {
    let error = runtime_error("set x : 3; x(1)");
    assert!(error.to_string().contains("is not callable"));
}

#[test]
fn tracebacks_name_every_frame_most_recent_last() {
    let error = runtime_error("fn boom(d) { 1 / d }; fn outer(x) { boom(x) }; outer(0)");
    let rendered = error.to_string();
    assert!(rendered.contains("Traceback (most recent call last):"));
    assert!(rendered.contains("RuntimeError: Division by zero."));

    let program = rendered.find("in <program>").expect("program frame");
    let outer = rendered.find("in outer").expect("outer frame");
    let boom = rendered.find("in boom").expect("boom frame");
    assert!(program < outer && outer < boom);
}

#[test]
fn escapes_decode_at_lex_time() {
    assert_eq!(eval_string(r#""a\nb""#), "a\nb");
    assert_eq!(eval_string(r#""a\tb""#), "a\tb");
    assert_eq!(eval_string(r#""\u{0041}""#), "A");
    // Any other escaped character stands for itself.
    assert_eq!(eval_string(r#""\q\"\\""#), "q\"\\");
}

#[test]
fn lex_errors_abort_with_a_span() {
    let error = parse_error("set x : \"abc");
    assert!(error.to_string().contains("Unterminated string"));
    let error = parse_error("1 ? 2");
    assert!(error.to_string().contains("Illegal character '?'"));
    assert_eq!(error.span.start.column, 3);
}

#[test]
fn syntax_errors_abort_at_the_first_offense() {
    assert!(parse_error("1 2").to_string().contains("Expected end of input"));
    assert!(parse_error("(1").to_string().contains("')'"));
    assert!(parse_error("if true 1").to_string().contains("'{'"));
    parse_error("set 1 : 2");
    parse_error("fn f( {}");
}

#[test]
fn literal_round_trip() {
    // Rendering a literal value and re-running its rendered form yields an
    // equal value (functions have no literal form and are excluded).
    for src in ["123", "1.5", "-3", "true", "false", "none", r#""a\nb c""#] {
        let first = eval_value(src);
        let second = eval_value(&first.render_literal());
        assert_eq!(first, second, "round-trip failed for {src}");
    }
}

#[test]
fn empty_programs_and_blocks_evaluate_to_none() {
    assert!(eval_value("").is_none());
    assert!(eval_value(";;;").is_none());
    assert!(eval_value("if true { }").is_none());
}

#[test]
fn blocks_do_not_open_scopes() {
    assert_eq!(eval_number("set x : 1; if true { x := 2 }; x"), 2.0);
}

#[test]
fn pi_is_prebound() {
    assert_eq!(eval_number("pi"), std::f64::consts::PI);
}

#[test]
fn print_echoes_through_the_host_sink_and_returns_its_argument() {
    let io = TestIo::new(&[]);
    let mut interpreter = Interpreter::new(io.clone());

    let value = interpreter.run("t.rill", r#"print("hi"); print(42)"#)
                           .expect("script failed");
    assert_eq!(io.borrow().out, "hi\n42\n");
    assert_eq!(value, Value::from(42.0));
}

#[test]
fn prompt_reads_from_the_host_sink() {
    let io = TestIo::new(&["Ada"]);
    let mut interpreter = Interpreter::new(io.clone());

    let value = interpreter.run("t.rill", r#"prompt("name? ")"#)
                           .expect("script failed");
    assert_eq!(value, Value::from("Ada"));
    assert!(io.borrow().out.contains("name? "));

    // The canned input is exhausted now.
    assert!(interpreter.run("t.rill", r#"prompt("again? ")"#).is_err());
}

#[test]
fn globals_persist_across_runs_on_one_interpreter() {
    let io = TestIo::new(&[]);
    let mut interpreter = Interpreter::new(io);

    interpreter.run("a.rill", "set x : 1").expect("first run failed");
    let value = interpreter.run("b.rill", "x + 1").expect("second run failed");
    assert_eq!(value, Value::from(2.0));
}

#[test]
fn demo_scripts_run() {
    let mut count = 0;

    for entry in WalkDir::new("demos").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| {
                                          e.path().extension().is_some_and(|ext| ext == "rill")
                                      })
    {
        let path = entry.path();
        let script =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;
        if let Err(e) = run_source(&path.display().to_string(), &script) {
            panic!("Demo {path:?} failed:\n{e}");
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
