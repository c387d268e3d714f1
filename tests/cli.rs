use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

fn get_simpl_binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_simpl"))
}

/// Write `source` to a fresh file under the system temp directory
fn program_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("simpl-cli-{}-{}.simpl", name, std::process::id()));
    fs::write(&path, source).expect("Failed to write test program");
    path
}

fn simpl(args: &[&str], name: &str, source: &str) -> Output {
    let path = program_file(name, source);
    let output = get_simpl_binary()
        .args(args)
        .arg(&path)
        .arg("--color")
        .arg("never")
        .output()
        .expect("Failed to execute simpl");
    let _ = fs::remove_file(&path);
    output
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_version_flag() {
    let output = get_simpl_binary()
        .arg("--version")
        .output()
        .expect("Failed to execute simpl");

    assert!(output.status.success(), "Version flag should succeed");
    let stdout = stdout_of(&output);
    assert!(stdout.contains("simpl"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_run_prints_values() {
    let output = simpl(&["run"], "values", "x := 5;\nprint x + 2;\nprint 10 / 4;\n");

    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert_eq!(stdout_of(&output), "7\n2.5\n");
}

#[test]
fn test_run_conditionals() {
    let source = "if (True) print 1;\nif (False) print 2;\na := 10; b := 20; print a == b;\n";
    let output = simpl(&["run"], "conditionals", source);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1\nFalse\n");
}

#[test]
fn test_run_undefined_variable_fails() {
    let output = simpl(&["run"], "undefined", "print x;");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty());
    assert!(stderr_of(&output).contains("error: runtime error: variable 'x' is not defined"));
}

#[test]
fn test_run_syntax_error_runs_nothing() {
    let output = simpl(&["run"], "syntax", "print 1;\nprint 2 +;\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout_of(&output).is_empty(), "Nothing should run after a syntax error");
    assert!(stderr_of(&output).contains("syntax error: expected an identifier, a number or '(', found ';' at 2:10"));
}

#[test]
fn test_run_keeps_output_before_runtime_error() {
    let output = simpl(&["run"], "partial", "print 1;\nprint 2 / 0;\nprint 3;\n");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "1\n");
    assert!(stderr_of(&output).contains("division by zero"));
}

#[test]
fn test_run_legacy_subtraction() {
    let output = simpl(&["run", "--legacy-subtraction"], "legacy", "print 10 - 3;");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "13\n");

    let output = simpl(&["run"], "difference", "print 10 - 3;");
    assert_eq!(stdout_of(&output), "7\n");
}

#[test]
fn test_tokens_lists_kinds() {
    let output = simpl(&["tokens"], "tokens", "if (x != 2) y := .5;");

    assert!(output.status.success());
    let kinds: Vec<String> = stdout_of(&output).lines().map(String::from).collect();
    assert_eq!(
        kinds,
        vec![
            "If", "LeftParen", "Identifier", "NotEquals", "Integer", "RightParen", "Identifier",
            "Assign", "Float", "Semicolon"
        ]
    );
}

#[test]
fn test_tokens_lex_error() {
    let output = simpl(&["tokens"], "lex-error", "x := 3e;");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout_of(&output), "Identifier\nAssign\n");
    assert!(stderr_of(&output).contains("lexical error: malformed exponent"));
}

#[test]
fn test_missing_file() {
    let output = get_simpl_binary()
        .args(["run", "definitely-not-here.simpl", "--color", "never"])
        .output()
        .expect("Failed to execute simpl");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("failed to open definitely-not-here.simpl"));
}

#[test]
fn test_logs_stay_off_stdout() {
    let output = simpl(&["run", "-vvv"], "verbose", "print 1;");

    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "1\n");
}

#[test]
fn test_usage_error_exit_code() {
    let output = get_simpl_binary()
        .arg("frobnicate")
        .output()
        .expect("Failed to execute simpl");

    assert_eq!(output.status.code(), Some(2));
}
