//! Host-facing hook for a validation lifecycle.
//!
//! The host owns one [`ConditionalValidation`], calls
//! [`setup`](ConditionalValidation::setup) for each record type at startup,
//! and [`before_validate`](ConditionalValidation::before_validate) right
//! before running its validators. Only the returned rules should be run.

use serde_json::Value;

use crate::error::PruneError;
use crate::prune::{PruneReport, prune, prune_report};
use crate::rules::RuleSet;
use crate::settings::{Settings, SettingsOverride, SettingsRegistry};

/// Conditional-validation hook bound to a settings registry.
///
/// # Examples
///
/// ```
/// use rulegate::behavior::ConditionalValidation;
/// use rulegate::rules::RuleSet;
/// use rulegate::settings::SettingsOverride;
/// use serde_json::json;
///
/// let mut hook = ConditionalValidation::new();
/// hook.setup("Upload", SettingsOverride::condition_key("when"));
///
/// let rules: RuleSet = serde_json::from_value(json!({
///     "file": {"size": {"rule": "maxSize", "when": ["type", "file"]}}
/// }))
/// .unwrap();
///
/// let active = hook.before_validate("Upload", &rules, &json!({"type": "url"})).unwrap();
/// assert!(!active.contains_rule("file", "size"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionalValidation {
    registry: SettingsRegistry,
}

impl ConditionalValidation {
    /// Creates a hook with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a hook over an existing registry.
    pub fn with_registry(registry: SettingsRegistry) -> Self {
        Self { registry }
    }

    /// Configures `record_type`; see [`SettingsRegistry::configure`].
    pub fn setup(&mut self, record_type: impl Into<String>, options: SettingsOverride) -> &Settings {
        self.registry.configure(record_type, options)
    }

    /// Effective settings of `record_type`.
    pub fn settings(&self, record_type: &str) -> &Settings {
        self.registry.get(record_type)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &SettingsRegistry {
        &self.registry
    }

    /// Rules of `rule_set` that should run for `record`.
    pub fn before_validate(
        &self,
        record_type: &str,
        rule_set: &RuleSet,
        record: &Value,
    ) -> Result<RuleSet, PruneError> {
        let _span = tracing::debug_span!("before_validate", record_type).entered();
        prune(rule_set, record, self.settings(record_type))
    }

    /// Like [`before_validate`](Self::before_validate), also listing removed rules.
    pub fn before_validate_report(
        &self,
        record_type: &str,
        rule_set: &RuleSet,
        record: &Value,
    ) -> Result<PruneReport, PruneError> {
        let _span = tracing::debug_span!("before_validate", record_type).entered();
        prune_report(rule_set, record, self.settings(record_type))
    }
}
