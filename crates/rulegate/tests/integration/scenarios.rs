//! End-to-end pruning scenarios over JSON rule sets and records.

use pretty_assertions::assert_eq;
use rulegate::prelude::*;
use serde_json::{Value, json};

fn is_kept(condition: Value, record: Value) -> bool {
    let rules: RuleSet = serde_json::from_value(json!({
        "target": {"gated": {"rule": "notEmpty", "if": condition}}
    }))
    .unwrap();
    prune(&rules, &record, &Settings::default())
        .unwrap()
        .contains_rule("target", "gated")
}

#[test]
fn equal_value_keeps_rule() {
    assert!(is_kept(
        json!(["has_categories", "1"]),
        json!({"has_categories": "1"})
    ));
}

#[test]
fn different_value_removes_rule() {
    assert!(!is_kept(
        json!(["has_categories", "1"]),
        json!({"has_categories": "0"})
    ));
}

#[test]
fn absent_path_removes_rule() {
    assert!(!is_kept(json!(["has_categories"]), json!({})));
}

#[test]
fn all_conditions_must_hold() {
    let condition = json!([["type", "file"], ["overwrite_file", "1"]]);
    assert!(is_kept(
        condition.clone(),
        json!({"type": "file", "overwrite_file": "1"})
    ));
    assert!(!is_kept(
        condition,
        json!({"type": "file", "overwrite_file": "0"})
    ));
}

#[test]
fn numeric_runs_compare_numerically() {
    assert!(is_kept(
        json!(["count", "9", "greater-or-equal"]),
        json!({"count": "10"})
    ));
    assert!(is_kept(json!(["count", "10", "less-than"]), json!({"count": "9"})));
}

#[test]
fn nested_path_resolves() {
    assert!(is_kept(
        json!(["data.has_categories", "1"]),
        json!({"data": {"has_categories": "1"}})
    ));
    assert!(!is_kept(
        json!(["data.has_categories", "1"]),
        json!({"has_categories": "1"})
    ));
}

#[test]
fn symbolic_operators_are_accepted() {
    let record = json!({"version": "1.10"});
    assert!(is_kept(json!(["version", "1.9", ">"]), record.clone()));
    assert!(is_kept(json!(["version", "1.10", "=="]), record.clone()));
    assert!(is_kept(json!(["version", "2", "<>"]), record));
}

#[test]
fn upload_form_rules() {
    let rules: RuleSet = serde_json::from_value(json!({
        "category_csv_field": {
            "isSet": {
                "rule": "notEmpty",
                "message": "Category CSV Field must be mapped.",
                "if": ["has_categories", "1"]
            }
        },
        "file": {
            "extension": {"rule": ["extension", ["csv"]], "if": ["type", "file"]},
            "overwrite": {"rule": "boolean", "if": [["type", "file"], ["overwrite_file"]]},
            "required": {"rule": "notEmpty"}
        },
        "url": {
            "valid": {"rule": "url", "if": ["type", "url"]}
        }
    }))
    .unwrap();

    let record = json!({"type": "file", "has_categories": "0", "overwrite_file": ""});
    let report = prune_report(&rules, &record, &Settings::default()).unwrap();

    let expected: RuleSet = serde_json::from_value(json!({
        "category_csv_field": {},
        "file": {
            "extension": {"rule": ["extension", ["csv"]], "if": ["type", "file"]},
            "required": {"rule": "notEmpty"}
        },
        "url": {}
    }))
    .unwrap();
    assert_eq!(report.rules, expected);
    assert_eq!(
        report
            .removed
            .iter()
            .map(|r| format!("{}.{}", r.field, r.rule))
            .collect::<Vec<_>>(),
        vec!["category_csv_field.isSet", "file.overwrite", "url.valid"]
    );
}

#[test]
fn pruning_twice_is_a_no_op() {
    let rules: RuleSet = serde_json::from_value(json!({
        "a": {"x": {"if": ["flag"]}, "y": {"if": ["flag", "2", "<"]}, "z": {}}
    }))
    .unwrap();
    let record = json!({"flag": "1"});
    let settings = Settings::default();

    let once = prune(&rules, &record, &settings).unwrap();
    let twice = prune(&once, &record, &settings).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn misconfigured_operator_fails_the_pass() {
    let rules: RuleSet = serde_json::from_value(json!({
        "a": {"x": {"if": ["flag", "1", "equals-ish"]}}
    }))
    .unwrap();
    let err = prune(&rules, &json!({"flag": "1"}), &Settings::default()).unwrap_err();
    assert_eq!(
        err.condition_error(),
        &ConditionError::InvalidOperator {
            operator: "equals-ish".into()
        }
    );
}
