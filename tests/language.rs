use lisp_eval::{read, Interpreter, RuntimeError, Value};
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;

fn run(source: &str) -> Result<Value, RuntimeError> {
    let program = read(source).unwrap_or_else(|err| panic!("failed to read {source:?}: {err}"));
    Interpreter::new().interpret(&program)
}

fn expected_result(content: &str) -> Option<&str> {
    content
        .lines()
        .find_map(|line| line.trim_start().strip_prefix("; expect:"))
        .map(str::trim)
}

#[test]
fn demo_programs_produce_expected_values() {
    let mut count = 0;
    let mut entries: Vec<_> = fs::read_dir(Path::new(env!("CARGO_MANIFEST_DIR")).join("demos"))
        .expect("demos directory")
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "lisp"))
        .collect();
    entries.sort();

    for path in entries {
        let content =
            fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = expected_result(&content)
            .unwrap_or_else(|| panic!("{path:?} has no `; expect:` line"));
        match run(&content) {
            Ok(value) => assert_eq!(value.to_string(), expected, "{path:?}"),
            Err(e) => panic!("{path:?} failed: {e}"),
        }
        count += 1;
    }

    assert!(count > 0, "No demo programs found");
}

#[test]
fn last_expression_wins() {
    assert_eq!(run("1 2 3"), Ok(Value::Number(3.0)));
}

#[test]
fn division_by_zero_is_not_an_error() {
    assert_eq!(run("(/ 1 0)"), Ok(Value::Number(f64::INFINITY)));
}

#[test]
fn failure_aborts_remaining_forms_but_keeps_earlier_bindings() {
    let mut interp = Interpreter::new();
    let program = read("(def a 1) missing (def b 2)").unwrap();
    assert_eq!(
        interp.interpret(&program),
        Err(RuntimeError::UnboundSymbol {
            name: "missing".into()
        })
    );
    assert_eq!(interp.environment().get("a"), Some(Value::Number(1.0)));
    assert_eq!(interp.environment().get("b"), None);
}

#[test]
fn unchosen_branch_has_no_side_effects() {
    let mut interp = Interpreter::new();
    let program = read("(if false (def boom 1) 2)").unwrap();
    assert_eq!(interp.interpret(&program), Ok(Value::Number(2.0)));
    assert!(!interp.environment().contains("boom"));
}

#[test]
fn logical_operators_do_not_short_circuit() {
    let mut interp = Interpreter::new();
    let program = read("(and (def p false) (def q 1)) (or (def r true) (def s 2))").unwrap();
    assert_eq!(interp.interpret(&program), Ok(Value::Bool(true)));
    for name in ["p", "q", "r", "s"] {
        assert!(interp.environment().contains(name), "{name} was not defined");
    }
}

#[test]
fn kind_errors_surface_as_type_mismatch() {
    assert_eq!(
        run("(* true 2)"),
        Err(RuntimeError::TypeMismatch {
            op: "*",
            expected: "number",
            found: "bool",
        })
    );
}
