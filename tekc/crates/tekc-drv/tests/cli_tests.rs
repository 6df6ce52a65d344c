//! CLI tests for the `tekc` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_source(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".tek")
        .tempfile()
        .expect("temp file");
    file.write_all(source.as_bytes()).expect("write source");
    file
}

#[test]
fn clean_source_exits_zero() {
    let file = write_source("function f()\n\treturn 1\n");
    Command::cargo_bin("tekc")
        .unwrap()
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn lint_error_fails_and_prints_the_message() {
    let file = write_source("return\n");
    Command::cargo_bin("tekc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "You can only place return inside a function",
        ))
        .stderr(predicate::str::contains("compilation failed"));
}

#[test]
fn parser_error_names_the_stage() {
    let file = write_source("var = 1\n");
    Command::cargo_bin("tekc")
        .unwrap()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("error[parser]"));
}

#[test]
fn emit_tokens_dumps_the_stream() {
    let file = write_source("var x = 1\n");
    Command::cargo_bin("tekc")
        .unwrap()
        .arg("--emit-tokens")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Var"))
        .stdout(predicate::str::contains("Eof"));
}

#[test]
fn emit_ast_dumps_the_tree() {
    let file = write_source("var x = 1\n");
    Command::cargo_bin("tekc")
        .unwrap()
        .arg("--emit-ast")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("VariableDecl"));
}

#[test]
fn missing_argument_is_a_usage_error() {
    Command::cargo_bin("tekc")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("usage: tekc"));
}

#[test]
fn unreadable_file_is_reported() {
    Command::cargo_bin("tekc")
        .unwrap()
        .arg("definitely-not-here.tek")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
