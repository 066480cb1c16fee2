//! Integration tests for the `jsonom` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the fmt, stats,
//! and keys subcommands through the actual binary, including stdin/stdout
//! piping, file I/O, and error reporting.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the sample.json fixture.
fn sample_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sample.json")
}

/// Helper: path to the stream.jsonl fixture (three concatenated documents).
fn stream_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/stream.jsonl")
}

/// Helper: a scratch output path unique to one test.
fn temp_output(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("jsonom-test-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

fn jsonom() -> Command {
    Command::cargo_bin("jsonom").unwrap()
}

const SAMPLE_COMPACT: &str = r#"{"name":"Alice","balance":1.50,"account":100000000000000000001,"tags":["admin","ops"],"address":{"zip":"02134","city":"Boston"},"active":true,"manager":null}"#;

// ─────────────────────────────────────────────────────────────────────────────
// fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_stdin_to_stdout() {
    jsonom()
        .arg("fmt")
        .write_stdin(r#"{ "b" : 1.50, "a" : [ 1, 2 ] }"#)
        .assert()
        .success()
        .stdout("{\"b\":1.50,\"a\":[1,2]}\n");
}

#[test]
fn fmt_file_to_stdout_keeps_order_and_literals() {
    jsonom()
        .args(["fmt", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(format!("{SAMPLE_COMPACT}\n"));
}

#[test]
fn fmt_file_to_file() {
    let output = temp_output("fmt.json");
    jsonom()
        .args(["fmt", "-i", sample_json_path(), "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = std::fs::read_to_string(&output).expect("output file must exist");
    assert_eq!(content.trim_end(), SAMPLE_COMPACT);
    let _ = std::fs::remove_file(&output);
}

#[test]
fn fmt_empty_input_produces_empty_output() {
    jsonom()
        .arg("fmt")
        .write_stdin("  \n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn fmt_reads_only_the_first_document() {
    jsonom()
        .args(["fmt", "-i", stream_path()])
        .assert()
        .success()
        .stdout("{\"id\":1,\"type\":\"click\"}\n");
}

#[test]
fn fmt_all_reformats_every_document() {
    jsonom()
        .args(["fmt", "--all", "-i", stream_path()])
        .assert()
        .success()
        .stdout(
            "{\"id\":1,\"type\":\"click\"}\n{\"id\":2,\"type\":\"view\",\"ms\":12.50}\n[1,2]\n",
        );
}

#[test]
fn fmt_is_idempotent() {
    let first = jsonom()
        .args(["fmt", "-i", sample_json_path()])
        .output()
        .unwrap();
    assert!(first.status.success());

    jsonom()
        .arg("fmt")
        .write_stdin(first.stdout.clone())
        .assert()
        .success()
        .stdout(String::from_utf8(first.stdout).unwrap());
}

// ─────────────────────────────────────────────────────────────────────────────
// stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_counts_nodes() {
    jsonom()
        .args(["stats", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Objects:     2"))
        .stdout(predicate::str::contains("Arrays:      1"))
        .stdout(predicate::str::contains("Values:      9"))
        .stdout(predicate::str::contains("Max depth:   2"))
        .stdout(predicate::str::contains("Unique keys: 9"));
}

#[test]
fn stats_counts_repeated_keys_once() {
    jsonom()
        .arg("stats")
        .write_stdin(r#"[{"id":1,"n":"a"},{"id":2,"n":"b"},{"id":3}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("Objects:     3"))
        .stdout(predicate::str::contains("Unique keys: 2"));
}

#[test]
fn stats_on_empty_input() {
    jsonom()
        .arg("stats")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Values:      0"))
        .stdout(predicate::str::contains("Max depth:   0"));
}

// ─────────────────────────────────────────────────────────────────────────────
// keys subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn keys_in_document_order() {
    jsonom()
        .args(["keys", "-i", sample_json_path()])
        .assert()
        .success()
        .stdout("name\nbalance\naccount\ntags\naddress\nactive\nmanager\n");
}

#[test]
fn keys_rejects_non_object_root() {
    jsonom()
        .arg("keys")
        .write_stdin("[1,2]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root value is not an object"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Error handling
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn syntax_error_reports_offset() {
    jsonom()
        .arg("fmt")
        .write_stdin(r#"{"a":1,}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode JSON"))
        .stderr(predicate::str::contains("syntax error at byte 7"));
}

#[test]
fn truncated_input_fails() {
    jsonom()
        .arg("stats")
        .write_stdin(r#"{"a":[1,2"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected end of input"));
}

#[test]
fn missing_input_file() {
    jsonom()
        .args(["fmt", "-i", "/nonexistent/jsonom/input.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

#[test]
fn fmt_all_names_failing_document() {
    jsonom()
        .args(["fmt", "--all"])
        .write_stdin("{} [1 2]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode JSON document 2"));
}

#[test]
fn missing_subcommand_shows_usage() {
    jsonom()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
