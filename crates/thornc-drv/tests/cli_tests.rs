//! End-to-end tests driving the built `thornc` binary against temp files.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn write_source(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp source file");
    file.write_all(contents.as_bytes()).expect("write temp source file");
    file
}

#[test]
fn lex_prints_tokens_for_well_formed_source() {
    let file = write_source("x = 1\n");
    Command::cargo_bin("thornc")
        .unwrap()
        .arg("lex")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Identifier"));
}

#[test]
fn parse_prints_ast_for_well_formed_source() {
    let file = write_source("def f(x: int) -> int { return x + 1 }\n");
    Command::cargo_bin("thornc")
        .unwrap()
        .arg("parse")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Function"));
}

#[test]
fn parse_fails_and_reports_diagnostics_for_malformed_source() {
    let file = write_source("def f(x: int -> int { return x }\n");
    Command::cargo_bin("thornc")
        .unwrap()
        .arg("parse")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parser"));
}

#[test]
fn missing_file_is_reported_as_an_error_not_a_panic() {
    Command::cargo_bin("thornc")
        .unwrap()
        .arg("lex")
        .arg("/no/such/file.thorn")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
