//! End-to-end tests for the `formcsv` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn formcsv() -> Command {
    Command::cargo_bin("formcsv").unwrap()
}

#[test]
fn test_parse_from_stdin() {
    formcsv()
        .args(["--quiet", "parse"])
        .write_stdin("a, \"b,c\"\nd")
        .assert()
        .success()
        .stdout("[[\"a\",\"b,c\"],[\"d\"]]\n");
}

#[test]
fn test_parse_file_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.csv");
    let output = dir.path().join("out.json");
    fs::write(&input, "x,,z\n").unwrap();

    formcsv()
        .arg("parse")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stderr(predicate::str::contains("Parsed 1 records, 3 fields"));

    let written = fs::read_to_string(&output).unwrap();
    let value: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(value, serde_json::json!([["x", "", "z"]]));
}

#[test]
fn test_parse_respects_config_limits() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("limits.json");
    fs::write(&config, r#"{"max_records": 1}"#).unwrap();

    formcsv()
        .arg("--config")
        .arg(&config)
        .arg("parse")
        .write_stdin("a\nb\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("more than 1 records"));
}

#[test]
fn test_get_path() {
    formcsv()
        .args(["get", "--path", "fields.tags.1"])
        .write_stdin(r#"{"fields": {"tags": ["red", "green"]}}"#)
        .assert()
        .success()
        .stdout("\"green\"\n");
}

#[test]
fn test_get_missing_path_fails() {
    formcsv()
        .args(["get", "--path", "fields.nope"])
        .write_stdin(r#"{"fields": {}}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No value at path 'fields.nope'"));
}

#[test]
fn test_attachments_below_prefix() {
    let doc = r#"{
        "_attachments": {
            "img/a.png": {"content_type": "image/png"},
            "img/sub/b.png": {"content_type": "image/png"},
            "other/c.txt": {}
        }
    }"#;

    let output = formcsv()
        .args(["attachments", "--prefix", "img"])
        .write_stdin(doc)
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a.png", "sub/b.png"]);
}

#[test]
fn test_invalid_document_reports_json_error() {
    formcsv()
        .args(["get", "--path", "a"])
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Document decoding: JSON parse error"));
}
