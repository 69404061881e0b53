//! End-to-end tests for the `rulegate` binary.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

const RULES: &str = r#"{
  "category_csv_field": {
    "isSet": {"rule": "notEmpty", "if": ["has_categories", "1"]}
  },
  "file": {
    "size": {"rule": "maxSize", "when": ["type", "file"]},
    "required": {"rule": "notEmpty"}
  }
}"#;

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn rulegate() -> Command {
    let mut cmd = Command::cargo_bin("rulegate").unwrap();
    cmd.env_remove("RUST_LOG").env_remove("RULEGATE_SETTINGS");
    cmd
}

#[test]
fn prune_prints_active_rules() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);
    let record = write(&dir, "record.json", r#"{"has_categories": "0"}"#);

    let output = rulegate()
        .args(["prune", "--rules"])
        .arg(&rules)
        .arg("--record")
        .arg(&record)
        .output()
        .unwrap();
    assert!(output.status.success());

    let pruned: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(pruned["category_csv_field"], json!({}));
    assert_eq!(pruned["file"]["size"]["rule"], json!("maxSize"));
}

#[test]
fn prune_report_lists_removed_rules() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);

    let output = rulegate()
        .args(["prune", "--report", "--condition-key", "when", "--record", "-", "--rules"])
        .arg(&rules)
        .write_stdin(r#"{"type": "url", "has_categories": "0"}"#)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["removed"], json!([{"field": "file", "rule": "size"}]));
    // With `when` as the key, `if` is just a parameter.
    assert!(report["rules"]["category_csv_field"]["isSet"].is_object());
}

#[test]
fn settings_file_selects_condition_key() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);
    let record = write(&dir, "record.json", r#"{"type": "url"}"#);
    let settings = write(&dir, "settings.toml", "[Upload]\ncondition_key = \"when\"\n");

    rulegate()
        .args(["prune", "--record-type", "Upload", "--rules"])
        .arg(&rules)
        .arg("--record")
        .arg(&record)
        .arg("--settings")
        .arg(&settings)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"size\"").not())
        .stdout(predicate::str::contains("\"isSet\""));
}

#[test]
fn invalid_operator_fails() {
    let dir = TempDir::new().unwrap();
    let rules = write(
        &dir,
        "rules.json",
        r#"{"a": {"x": {"if": ["flag", "1", "roughly"]}}}"#,
    );
    let record = write(&dir, "record.json", r#"{"flag": "1"}"#);

    rulegate()
        .args(["prune", "--rules"])
        .arg(&rules)
        .arg("--record")
        .arg(&record)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid operator `roughly`"));
}

#[test]
fn check_counts_conditional_rules() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);

    rulegate()
        .args(["check", "--rules"])
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 conditional rule(s) across 2 field(s)"));
}

#[test]
fn missing_rules_file_is_reported() {
    rulegate()
        .args(["check", "--rules", "does-not-exist.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load rules"));
}

#[test]
fn condition_key_flag_overrides_settings_file() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);
    let record = write(&dir, "record.json", r#"{"type": "url", "has_categories": "0"}"#);
    let settings = write(&dir, "settings.toml", "[Upload]\ncondition_key = \"when\"\n");

    let output = rulegate()
        .args(["prune", "--report", "--record-type", "Upload", "--condition-key", "if", "--rules"])
        .arg(&rules)
        .arg("--record")
        .arg(&record)
        .arg("--settings")
        .arg(&settings)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        report["removed"],
        json!([{"field": "category_csv_field", "rule": "isSet"}])
    );
}

#[test]
fn unknown_settings_option_fails() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);
    let settings = write(&dir, "settings.toml", "[Upload]\nconditon_key = \"when\"\n");

    rulegate()
        .args(["check", "--rules"])
        .arg(&rules)
        .arg("--settings")
        .arg(&settings)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid settings"));
}

#[test]
fn missing_settings_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let rules = write(&dir, "rules.json", RULES);

    rulegate()
        .args(["check", "--rules"])
        .arg(&rules)
        .args(["--settings", "no-such-settings.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn rules_and_record_cannot_share_stdin() {
    rulegate()
        .args(["prune", "--rules", "-", "--record", "-"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot both read from stdin"));
}
