//! # rulegate
//!
//! Condition-gated pruning of declarative validation rules.
//!
//! Rules attached to record fields may carry an activation condition under a
//! configurable key (`"if"` by default). Before validation runs, [`prune`]
//! drops every rule whose conditions do not all hold for the current record;
//! the host then validates with what is left.
//!
//! ## Quick Start
//!
//! ```rust
//! use rulegate::prelude::*;
//! use serde_json::json;
//!
//! let rules: RuleSet = serde_json::from_value(json!({
//!     "overwrite_target": {
//!         "isSet": {
//!             "rule": "notEmpty",
//!             "if": [["type", "file"], ["overwrite_file", "1"]]
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let record = json!({"type": "file", "overwrite_file": "0"});
//! let active = prune(&rules, &record, &Settings::default()).unwrap();
//! assert!(!active.contains_rule("overwrite_target", "isSet"));
//! ```
//!
//! ## Condition shorthand
//!
//! - `["field"]`: the field exists and is not `""`
//! - `["field", "1"]`: the field exists and equals `"1"`
//! - `["field", "9", "greater-or-equal"]`: the field exists and is `>= "9"`
//! - `[[...], [...]]`: every listed condition holds
//!
//! Values are compared with [ordered segment semantics](compare), so
//! `"10" >= "9"`. Paths may be nested (`"data.has_categories"`).

pub mod behavior;
pub mod compare;
pub mod condition;
pub mod error;
pub mod path;
pub mod prelude;
pub mod prune;
pub mod rules;
pub mod settings;

pub use error::{ConditionError, PruneError};
pub use prune::{check_conditions, prune, prune_report};
