//! Rule-set data model.
//!
//! A [`RuleSet`] maps field names to named [`RuleDefinition`]s, preserving
//! declaration order. Both serialize transparently, so a rule set reads and
//! writes as plain JSON:
//!
//! ```json
//! {
//!   "category_csv_field": {
//!     "isSet": {"rule": "notEmpty", "if": ["has_categories", "1"]}
//!   }
//! }
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::condition::ConditionSpec;
use crate::error::ConditionError;

/// Named rules attached to one field.
pub type FieldRules = IndexMap<String, RuleDefinition>;

/// Parameters of one validation rule.
///
/// Everything except the condition entry is opaque to this crate and is
/// handed to the host's validator untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleDefinition {
    params: Map<String, Value>,
}

impl RuleDefinition {
    /// Creates a definition with no parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Attaches a condition under `key`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_condition(self, key: impl Into<String>, condition: ConditionSpec) -> Self {
        self.with_param(key, condition)
    }

    /// Looks up a parameter.
    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// All parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Parses the condition entry stored under `key`.
    ///
    /// Returns `Ok(None)` when there is no entry or the entry is `null`.
    pub fn condition(&self, key: &str) -> Result<Option<ConditionSpec>, ConditionError> {
        match self.params.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(raw) => ConditionSpec::from_value(raw).map(Some),
        }
    }
}

impl From<Map<String, Value>> for RuleDefinition {
    fn from(params: Map<String, Value>) -> Self {
        Self { params }
    }
}

/// Field name → rule name → rule definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: IndexMap<String, FieldRules>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) `rule` on `field`.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        definition: RuleDefinition,
    ) -> Option<RuleDefinition> {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(rule.into(), definition)
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use = "builder methods must be chained or built"]
    pub fn with_rule(
        mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        definition: RuleDefinition,
    ) -> Self {
        self.insert(field, rule, definition);
        self
    }

    /// Replaces every rule of `field`.
    pub fn set_field(&mut self, field: impl Into<String>, rules: FieldRules) -> Option<FieldRules> {
        self.fields.insert(field.into(), rules)
    }

    /// Registers `field` with no rules.
    pub fn insert_field(&mut self, field: impl Into<String>) {
        self.fields.entry(field.into()).or_default();
    }

    /// Rules of `field`.
    pub fn field(&self, field: &str) -> Option<&FieldRules> {
        self.fields.get(field)
    }

    /// Looks up a single rule.
    pub fn rule(&self, field: &str, rule: &str) -> Option<&RuleDefinition> {
        self.fields.get(field)?.get(rule)
    }

    /// Whether `field` carries `rule`.
    pub fn contains_rule(&self, field: &str, rule: &str) -> bool {
        self.rule(field, rule).is_some()
    }

    /// Field names, in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Iterates fields with their rules.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldRules)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Total number of rules across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.values().map(IndexMap::len).sum()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = (&'a String, &'a FieldRules);
    type IntoIter = indexmap::map::Iter<'a, String, FieldRules>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromIterator<(String, FieldRules)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (String, FieldRules)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
