//! Tests that drive the `skiff` binary.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn skiff() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_skiff"));
    command.env_remove("RUST_LOG");
    command
}

fn program_file(dir: &Path, source: &str) -> String {
    let path = dir.join("program.sk");
    fs::write(&path, source).unwrap();
    path.to_string_lossy().into_owned()
}

fn with_stdin(mut command: Command, input: &str) -> Output {
    let mut child = command
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn test_run_program() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(
        dir.path(),
        "\
define fact = Y (\\self.\\n.if (= n 0) 1 (* n (self (- n 1))))
fact 5
map (\\x.* x 2) {1 2 3}
= 1 2
",
    );
    let output = skiff().current_dir(dir.path()).args(["run", &file]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "120\n{2 4 6}\nfalse\n");
}

#[test]
fn test_run_from_stdin() {
    let mut command = skiff();
    command.args(["run", "-"]);
    let output = with_stdin(command, "+ 2 3\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "5\n");
}

#[test]
fn test_run_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(dir.path(), "+ 2 3\n\"hi\"\n");
    let output = skiff().args(["run", &file, "--json"]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));

    let values: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(values[0]["display"], "5");
    assert_eq!(values[0]["value"]["Num"], 5);
    assert_eq!(values[1]["display"], "\"hi\"");
}

#[test]
fn test_direct_strategy() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(dir.path(), "(\\x.\\y.+ x y) 2 3\nnot false\n");
    let output = skiff()
        .args(["--strategy", "lc", "run", &file])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "5\ntrue\n");
}

#[test]
fn test_no_prelude() {
    let dir = tempfile::tempdir().unwrap();
    // `not` is an unknown name here, so its argument is never forced
    let file = program_file(dir.path(), "not true\nnot (/ 1 0)\n");
    let output = skiff()
        .args(["run", &file, "--no-prelude"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "not true\nnot ((/ 1) 0)\n");
}

#[test]
fn test_translate() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(dir.path(), "define id = \\x.x\n\\x.x\n\\x.x x\n\\x.+ x 1\n");
    let output = skiff().args(["translate", &file]).output().unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "I\n(S I) I\n(S +) (K 1)\n");
}

#[test]
fn test_errors_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();

    let file = program_file(dir.path(), "(+ 1 2\n");
    let output = skiff().args(["run", &file]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Error: syntax error"));

    let file = program_file(dir.path(), "/ 1 0\n");
    let output = skiff().args(["run", &file]).output().unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("division by zero"));

    let output = skiff()
        .args(["run", &dir.path().join("missing.sk").to_string_lossy()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read"));
}

#[test]
fn test_unbounded_recursion_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(dir.path(), "Y (\\f.\\n.+ 1 (f n)) 0\n");
    let output = skiff()
        .args(["--stack-size-mb", "1", "run", &file])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_repl() {
    let output = with_stdin(skiff(), "define sq = \\x.* x x\nsq 7\n/ 1 0\n(+ 1\n  2)\n");
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("λ> "));
    assert!(out.contains(".. "));
    assert!(out.contains("defined sq\n"));
    assert!(out.contains("=> 49\n"));
    assert!(out.contains("Error: evaluation error"));
    assert!(out.contains("=> 3\n"));
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = program_file(dir.path(), "= 1 1\n");
    fs::write(dir.path().join("skiff.toml"), "church_booleans = false\n").unwrap();

    let output = skiff()
        .current_dir(dir.path())
        .args(["run", &file])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "K\n");

    let custom = dir.path().join("custom.toml");
    fs::write(&custom, "strategy = \"lc\"\n").unwrap();
    let output = skiff()
        .args(["--config", &custom.to_string_lossy(), "run", &file])
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "true\n");

    fs::write(&custom, "strategy = \"fast\"\n").unwrap();
    let output = skiff()
        .args(["--config", &custom.to_string_lossy(), "run", &file])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid config"));
}
