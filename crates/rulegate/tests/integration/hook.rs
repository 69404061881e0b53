//! Lifecycle hook wired to a registry loaded from configuration.

use rulegate::prelude::*;
use serde_json::json;

#[test]
fn registry_from_config_drives_before_validate() {
    let registry: SettingsRegistry = serde_json::from_value(json!({
        "Upload": {"condition_key": "only_if"}
    }))
    .unwrap();
    let hook = ConditionalValidation::with_registry(registry);

    let rules: RuleSet = serde_json::from_value(json!({
        "file": {
            "size": {"rule": "maxSize", "only_if": ["type", "file"]},
            "name": {"rule": "notEmpty", "if": ["type", "file"]}
        }
    }))
    .unwrap();
    let record = json!({"type": "url"});

    let upload = hook.before_validate("Upload", &rules, &record).unwrap();
    assert!(!upload.contains_rule("file", "size"));
    // `if` is an ordinary parameter for this record type.
    assert!(upload.contains_rule("file", "name"));

    let import = hook.before_validate("Import", &rules, &record).unwrap();
    assert!(import.contains_rule("file", "size"));
    assert!(!import.contains_rule("file", "name"));
}

#[test]
fn check_conditions_before_first_pass() {
    let rules: RuleSet = serde_json::from_value(json!({
        "file": {
            "size": {"if": [["type", "file"], ["size", "0", "gt"]]},
            "name": {"rule": "notEmpty"}
        }
    }))
    .unwrap();
    assert_eq!(check_conditions(&rules, &Settings::default()), Ok(1));
}
