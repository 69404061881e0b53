//! Common imports.
//!
//! ```rust
//! use rulegate::prelude::*;
//! ```

pub use crate::behavior::ConditionalValidation;
pub use crate::compare::{Operator, compare_ordered};
pub use crate::condition::{ConditionSpec, NormalizedCondition, RawCondition, evaluate, normalize};
pub use crate::error::{ConditionError, PruneError};
pub use crate::path::{exists, extract};
pub use crate::prune::{PruneReport, RemovedRule, check_conditions, prune, prune_report};
pub use crate::rules::{FieldRules, RuleDefinition, RuleSet};
pub use crate::settings::{DEFAULT_CONDITION_KEY, Settings, SettingsOverride, SettingsRegistry};
