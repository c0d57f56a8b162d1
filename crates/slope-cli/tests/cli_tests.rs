//! Tests for the `slopescript` binary: exit status, stdout, and the
//! `❌` reports on stderr.

use std::path::PathBuf;
use std::process::{Command, Output};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn program_file(name: &str, source: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("slopescript-cli-{}-{name}", std::process::id()));
    std::fs::write(&path, source).unwrap();
    path
}

fn slopescript(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_slopescript"))
        .args(args)
        .output()
        .unwrap()
}

/// Write `source` to a temp file, run the binary on it, then clean up.
fn run_program(name: &str, source: &str, flags: &[&str]) -> Output {
    let path = program_file(name, source);
    let path_text = path.display().to_string();
    let mut args = vec![path_text.as_str()];
    args.extend_from_slice(flags);
    let output = slopescript(&args);
    std::fs::remove_file(&path).unwrap();
    output
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ══════════════════════════════════════════════════════════════════════════════
// Exit status and reports
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn successful_program_exits_zero() {
    let output = run_program("ok.slope", "summit pack x = 5 carve x carve \"done\" lodge", &[]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "5\ndone\n");
    assert!(stderr(&output).is_empty());
}

#[test]
fn runtime_error_reports_on_stderr() {
    let output = run_program("name.slope", "summit\ncarve 1\ncarve y\nlodge", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "1\n");
    assert_eq!(
        stderr(&output).trim_end(),
        "❌ Error: NameError: variable 'y' is not defined (line 3)"
    );
}

#[test]
fn syntax_error_reports_on_stderr() {
    let output = run_program("syntax.slope", "summit carve 1 carve 2", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).starts_with("❌ Error: SyntaxError: "));
}

#[test]
fn missing_file_reports_not_found() {
    let path = std::env::temp_dir().join(format!("slopescript-cli-{}-absent.slope", std::process::id()));
    let path_text = path.display().to_string();
    let output = slopescript(&[&path_text]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output).trim_end(),
        format!("❌ File not found: {path_text}")
    );
}

#[test]
fn json_flag_prints_diagnostic() {
    let output = run_program("json.slope", "summit\ncarve 1 / 0\nlodge", &["--json"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(!err.starts_with('❌'));
    assert!(err.contains("\"category\":\"zero_division\""));
    assert!(err.contains("\"line\":2"));
}

#[test]
fn max_steps_flag_stops_runaway_loop() {
    let output = run_program(
        "loop.slope",
        "summit gondola (powder) carve 1 lodge",
        &["--max-steps", "50"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("1\n"));
    assert!(stderr(&output).starts_with("❌ Error: LimitError: "));
}

#[test]
fn long_operator_chain_fails_cleanly() {
    let terms = vec!["1"; 100_000].join(" + ");
    let output = run_program("chain.slope", &format!("summit carve {terms} lodge"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("❌ Error: SyntaxError: "));
}
