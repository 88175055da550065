use std::process::{Command, Output};

fn bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lisp-eval"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"))
        .env_remove("RUST_LOG")
        .env_remove("LISP_EVAL_POLICY")
        .env_remove("LISP_EVAL_MAX_DEPTH")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn run_prints_final_value() {
    let output = bin()
        .args(["run", "demos/arithmetic.lisp"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "17");
}

#[test]
fn eval_reads_inline_source() {
    let output = bin()
        .args(["eval", "(def x (def y 5)) (+ x y)"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "10");
}

#[test]
fn runtime_errors_fail_the_process() {
    let output = bin()
        .args(["eval", "(+ ghost 1)"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Unbound symbol `ghost`"));
}

#[test]
fn lenient_flag_swallows_condition_errors() {
    let output = bin()
        .args(["--lenient", "eval", "(if ghost 1 2)"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "2");
}

#[test]
fn policy_can_come_from_the_environment() {
    let output = bin()
        .env("LISP_EVAL_POLICY", "lenient")
        .args(["eval", "(= ghost ghost)"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "true");
}

#[test]
fn syntax_errors_are_reported() {
    let output = bin()
        .args(["eval", "(+ 1 2"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("unclosed `(`"));
}

#[test]
fn rejects_wrong_extension_and_usage() {
    let output = bin()
        .args(["run", "demos/arithmetic.txt"])
        .output()
        .expect("failed to run lisp-eval");
    assert!(!output.status.success());

    let output = bin().output().expect("failed to run lisp-eval");
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Usage"));
}

#[test]
fn deeply_nested_input_fails_cleanly() {
    let depth = 20_000;
    let source = format!("{}1{}", "(+ 1 ".repeat(depth), ")".repeat(depth));
    let output = bin()
        .args(["eval", &source])
        .output()
        .expect("failed to run lisp-eval");
    assert_eq!(output.status.code(), Some(1), "{}", stderr(&output));
    assert!(stderr(&output).contains("expression nested too deeply"));
}
