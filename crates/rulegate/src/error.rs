//! Error types for condition evaluation and rule pruning.
//!
//! A missing path is never an error: the condition is simply false. Errors
//! are reserved for rule definitions that are misconfigured, so they surface
//! at validation time instead of silently keeping or dropping rules.

/// Errors raised while parsing or evaluating a single condition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    /// The operator is not one of the recognized comparison operators.
    #[error("invalid operator `{operator}`")]
    InvalidOperator {
        /// The operator string as written in the rule definition.
        operator: String,
    },

    /// The value at `path` is an array or object and cannot be ordered
    /// against a scalar.
    #[error("cannot compare {found} at `{path}` with a scalar value")]
    IncomparableValues {
        /// Path of the offending value.
        path: String,
        /// JSON type name of the value found.
        found: &'static str,
    },

    /// The condition entry does not have a recognized shape.
    #[error("malformed condition: {reason}")]
    Malformed {
        /// What was wrong with it.
        reason: String,
    },
}

impl ConditionError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors from a pruning pass.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PruneError {
    /// A condition attached to `field`/`rule` could not be evaluated.
    #[error("condition on rule `{rule}` of field `{field}`: {source}")]
    Condition {
        /// Field the rule belongs to.
        field: String,
        /// Name of the rule carrying the condition.
        rule: String,
        /// The underlying condition error.
        #[source]
        source: ConditionError,
    },
}

impl PruneError {
    pub(crate) fn condition(field: &str, rule: &str, source: ConditionError) -> Self {
        Self::Condition {
            field: field.to_owned(),
            rule: rule.to_owned(),
            source,
        }
    }

    /// The condition error behind this pruning failure.
    pub fn condition_error(&self) -> &ConditionError {
        match self {
            Self::Condition { source, .. } => source,
        }
    }
}
