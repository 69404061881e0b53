//! Per-record-type settings.
//!
//! The only option today is the name of the rule parameter that carries
//! conditions (`"if"` unless configured otherwise). The registry is an
//! ordinary value owned by the host and handed to the pruner by reference.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Rule parameter that carries conditions when nothing else is configured.
pub const DEFAULT_CONDITION_KEY: &str = "if";

/// Effective settings for one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Name of the rule parameter holding the condition entry.
    pub condition_key: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            condition_key: DEFAULT_CONDITION_KEY.to_owned(),
        }
    }
}

impl Settings {
    /// Settings with a custom condition key.
    pub fn with_condition_key(key: impl Into<String>) -> Self {
        Self {
            condition_key: key.into(),
        }
    }

    /// Applies every option that is set.
    pub fn merge(&mut self, options: &SettingsOverride) {
        if let Some(key) = &options.condition_key {
            self.condition_key.clone_from(key);
        }
    }
}

/// Partial settings; unset options keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsOverride {
    /// Overrides [`Settings::condition_key`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_key: Option<String>,
}

impl SettingsOverride {
    /// Override only the condition key.
    pub fn condition_key(key: impl Into<String>) -> Self {
        Self {
            condition_key: Some(key.into()),
        }
    }
}

/// Settings keyed by record type.
///
/// Entries are created on first [`configure`](Self::configure) and live as
/// long as the registry. Unknown record types read as the defaults.
///
/// # Examples
///
/// ```
/// use rulegate::settings::{SettingsOverride, SettingsRegistry};
///
/// let mut registry = SettingsRegistry::new();
/// registry.configure("Upload", SettingsOverride::condition_key("when"));
///
/// assert_eq!(registry.get("Upload").condition_key, "when");
/// assert_eq!(registry.get("Import").condition_key, "if");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "HashMap<String, SettingsOverride>")]
pub struct SettingsRegistry {
    by_type: HashMap<String, Settings>,
    defaults: Settings,
}

impl SettingsRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges `options` over the settings of `record_type`, starting from the
    /// defaults on first use, and returns the result.
    pub fn configure(
        &mut self,
        record_type: impl Into<String>,
        options: SettingsOverride,
    ) -> &Settings {
        let record_type = record_type.into();
        let settings = self
            .by_type
            .entry(record_type.clone())
            .or_insert_with(|| self.defaults.clone());
        settings.merge(&options);
        tracing::debug!(
            record_type = %record_type,
            condition_key = %settings.condition_key,
            "configured conditional validation"
        );
        settings
    }

    /// Settings of `record_type`, or the defaults when it was never configured.
    pub fn get(&self, record_type: &str) -> &Settings {
        self.by_type.get(record_type).unwrap_or(&self.defaults)
    }

    /// Whether `record_type` has been configured.
    pub fn contains(&self, record_type: &str) -> bool {
        self.by_type.contains_key(record_type)
    }

    /// Configured record types.
    pub fn record_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    /// Number of configured record types.
    pub fn len(&self) -> usize {
        self.by_type.len()
    }

    /// Whether nothing has been configured.
    pub fn is_empty(&self) -> bool {
        self.by_type.is_empty()
    }
}

impl From<HashMap<String, SettingsOverride>> for SettingsRegistry {
    fn from(options: HashMap<String, SettingsOverride>) -> Self {
        let mut registry = Self::new();
        for (record_type, options) in options {
            registry.configure(record_type, options);
        }
        registry
    }
}
