//! Integration tests for the `toon` CLI binary, exercised end-to-end via `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;

/// Structural JSON equality that treats numbers by value rather than by `serde_json::Number`'s
/// internal representation — decoding TOON always yields floats, so `1` and `1.0` must compare
/// equal here even though `serde_json` itself would not consider them the same `Number`.
fn json_eq(a: &serde_json::Value, b: &serde_json::Value) -> bool {
    use serde_json::Value as J;
    match (a, b) {
        (J::Number(x), J::Number(y)) => x.as_f64() == y.as_f64(),
        (J::Array(x), J::Array(y)) => x.len() == y.len() && x.iter().zip(y).all(|(i, j)| json_eq(i, j)),
        (J::Object(x), J::Object(y)) => {
            x.len() == y.len() && x.iter().all(|(k, v)| y.get(k).is_some_and(|w| json_eq(v, w)))
        }
        _ => a == b,
    }
}

#[test]
fn encode_stdin_to_stdout() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("encode")
        .write_stdin(r#"{"name":"Alice","age":30}"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("name: Alice"))
        .stdout(predicate::str::contains("age: 30"));
}

#[test]
fn encode_invalid_json_fails() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("encode")
        .write_stdin("not json {{{")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn decode_stdin_to_stdout() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("decode")
        .write_stdin("name: Alice\nage: 30\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stdout(predicate::str::contains("30"));
}

#[test]
fn decode_invalid_toon_fails() {
    // Strict is decode's default, so no flag is needed to trigger the indentation error.
    Command::cargo_bin("toon")
        .unwrap()
        .arg("decode")
        .write_stdin("name: Alice\n  bad: indent\n")
        .assert()
        .failure();
}

#[test]
fn decode_lenient_accepts_shape_deviation_strict_rejects() {
    let input = "[2]: 1,2,3";

    Command::cargo_bin("toon")
        .unwrap()
        .arg("decode")
        .write_stdin(input)
        .assert()
        .failure();

    Command::cargo_bin("toon")
        .unwrap()
        .args(["decode", "--lenient"])
        .write_stdin(input)
        .assert()
        .success();
}

#[test]
fn validate_well_formed_prints_nothing() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("validate")
        .write_stdin("name: Alice\nage: 30\n")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn validate_malformed_fails() {
    // Header declares 2 rows but only one is present — a count mismatch in strict mode.
    Command::cargo_bin("toon")
        .unwrap()
        .arg("validate")
        .write_stdin("[2]{a,b}:\n  1,2\n")
        .assert()
        .failure();
}

#[test]
fn roundtrip_encode_decode_pipeline() {
    let input_json = r#"{"users":[{"id":1,"name":"Alice"},{"id":2,"name":"Bob"}],"total":2}"#;

    let encode_output = Command::cargo_bin("toon")
        .unwrap()
        .arg("encode")
        .write_stdin(input_json)
        .output()
        .expect("encode should run");
    assert!(encode_output.status.success());
    let toon = String::from_utf8(encode_output.stdout).unwrap();

    let decode_output = Command::cargo_bin("toon")
        .unwrap()
        .arg("decode")
        .write_stdin(toon)
        .output()
        .expect("decode should run");
    assert!(decode_output.status.success());
    let result_json = String::from_utf8(decode_output.stdout).unwrap();

    let original: serde_json::Value = serde_json::from_str(input_json).unwrap();
    let roundtripped: serde_json::Value = serde_json::from_str(&result_json).unwrap();
    assert!(
        json_eq(&original, &roundtripped),
        "expected {original} to equal {roundtripped}"
    );
}

#[test]
fn tab_delimiter_option() {
    Command::cargo_bin("toon")
        .unwrap()
        .args(["encode", "--delimiter", "tab"])
        .write_stdin(r#"[{"id":1,"name":"a"},{"id":2,"name":"b"}]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("id\tname"));
}

#[test]
fn help_flag_shows_usage() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn unknown_subcommand_fails() {
    Command::cargo_bin("toon")
        .unwrap()
        .arg("frobnicate")
        .assert()
        .failure();
}
