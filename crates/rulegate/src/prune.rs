//! Rule pruning.
//!
//! Before a validation pass, every rule whose conditions do not all hold for
//! the current record is dropped. Rules without a condition entry are always
//! kept, fields are never added or removed, and pruning an already pruned set
//! against the same record changes nothing.
//!
//! Pruning is copy-on-prune: the input [`RuleSet`] is left untouched so the
//! same declarations can be reused across passes.

use serde::Serialize;
use serde_json::Value;

use crate::error::PruneError;
use crate::rules::{FieldRules, RuleSet};
use crate::settings::Settings;

/// A rule removed during a pruning pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedRule {
    /// Field the rule was attached to.
    pub field: String,
    /// Name of the removed rule.
    pub rule: String,
}

/// Result of [`prune_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PruneReport {
    /// The rules that stay active.
    pub rules: RuleSet,
    /// Rules removed, in declaration order.
    pub removed: Vec<RemovedRule>,
}

/// Returns the rules of `rule_set` that are active for `record`.
///
/// # Examples
///
/// ```
/// use rulegate::prune::prune;
/// use rulegate::rules::RuleSet;
/// use rulegate::settings::Settings;
/// use serde_json::json;
///
/// let rules: RuleSet = serde_json::from_value(json!({
///     "category_csv_field": {
///         "isSet": {"rule": "notEmpty", "if": ["has_categories", "1"]}
///     }
/// }))
/// .unwrap();
///
/// let active = prune(&rules, &json!({"has_categories": "0"}), &Settings::default()).unwrap();
/// assert!(!active.contains_rule("category_csv_field", "isSet"));
/// ```
pub fn prune(rule_set: &RuleSet, record: &Value, settings: &Settings) -> Result<RuleSet, PruneError> {
    prune_report(rule_set, record, settings).map(|report| report.rules)
}

/// Like [`prune`], also listing which rules were removed.
pub fn prune_report(
    rule_set: &RuleSet,
    record: &Value,
    settings: &Settings,
) -> Result<PruneReport, PruneError> {
    let key = settings.condition_key.as_str();
    let mut removed = Vec::new();
    let mut rules = RuleSet::new();

    for (field, field_rules) in rule_set {
        let mut kept = FieldRules::with_capacity(field_rules.len());

        for (rule, definition) in field_rules {
            let active = match definition
                .condition(key)
                .map_err(|err| PruneError::condition(field, rule, err))?
            {
                None => true,
                Some(spec) => spec
                    .evaluate(record)
                    .map_err(|err| PruneError::condition(field, rule, err))?,
            };

            if active {
                kept.insert(rule.clone(), definition.clone());
            } else {
                tracing::debug!(field = %field, rule = %rule, "rule removed: conditions not met");
                removed.push(RemovedRule {
                    field: field.clone(),
                    rule: rule.clone(),
                });
            }
        }

        rules.set_field(field.clone(), kept);
    }

    tracing::debug!(
        kept = rules.rule_count(),
        removed = removed.len(),
        condition_key = key,
        "pruned rule set"
    );
    Ok(PruneReport { rules, removed })
}

/// Checks that every condition entry parses and names a known operator,
/// without evaluating anything. Returns the number of conditional rules.
pub fn check_conditions(rule_set: &RuleSet, settings: &Settings) -> Result<usize, PruneError> {
    let key = settings.condition_key.as_str();
    let mut conditional = 0;

    for (field, field_rules) in rule_set {
        for (rule, definition) in field_rules {
            let spec = definition
                .condition(key)
                .map_err(|err| PruneError::condition(field, rule, err))?;
            if let Some(spec) = spec {
                spec.check()
                    .map_err(|err| PruneError::condition(field, rule, err))?;
                conditional += 1;
            }
        }
    }
    Ok(conditional)
}
