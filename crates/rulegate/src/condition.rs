//! Activation conditions: parsing, normalization and evaluation.
//!
//! A rule definition carries its conditions as JSON shorthand under the
//! configured key:
//!
//! | Shorthand | Meaning |
//! |-----------|---------|
//! | `["has_categories"]` | path exists and is not `""` |
//! | `["has_categories", "1"]` | path exists and equals `"1"` |
//! | `["count", "9", ">="]` | path exists and is `>= "9"` |
//! | `[["type", "file"], ["overwrite_file", "1"]]` | all of the above hold |
//!
//! The single-vs-list shape is decided once by [`ConditionSpec::from_value`];
//! later stages only see the tagged [`ConditionSpec`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compare::{Operator, compare_ordered};
use crate::error::ConditionError;
use crate::path::{extract, type_name};

/// Operator applied when the shorthand carries only a path.
pub const PRESENCE_OPERATOR: &str = "not-equal";

/// Operator applied when the shorthand carries a path and a value.
pub const DEFAULT_OPERATOR: &str = "equal";

// ============================================================================
// RAW CONDITIONS
// ============================================================================

/// A condition exactly as written: one to three tuple elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCondition {
    /// Dot-delimited path into the record.
    pub path: String,
    /// Expected value, already rendered as comparison text.
    pub value: Option<String>,
    /// Operator string, unchecked until evaluation.
    pub operator: Option<String>,
}

impl RawCondition {
    /// `[path]`
    pub fn present(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: None,
            operator: None,
        }
    }

    /// `[path, value]`
    pub fn equals(path: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            value: Some(value.into()),
            operator: None,
        }
    }

    /// `[path, value, operator]`
    pub fn compare(
        path: impl Into<String>,
        value: impl Into<String>,
        operator: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            value: Some(value.into()),
            operator: Some(operator.into()),
        }
    }

    /// Parses one tuple. A `null` value or operator counts as absent.
    pub fn from_value(value: &Value) -> Result<Self, ConditionError> {
        let Value::Array(items) = value else {
            return Err(ConditionError::malformed(format!(
                "expected a condition tuple, found {}",
                type_name(value)
            )));
        };

        let (path, value, operator) = match items.as_slice() {
            [path] => (path, None, None),
            [path, value] => (path, Some(value), None),
            [path, value, operator] => (path, Some(value), Some(operator)),
            [] => return Err(ConditionError::malformed("empty condition tuple")),
            _ => {
                return Err(ConditionError::malformed(format!(
                    "condition tuple has {} elements, at most 3 are allowed",
                    items.len()
                )));
            }
        };

        let path = match path {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => {
                return Err(ConditionError::malformed(format!(
                    "condition path must be a string, found {}",
                    type_name(other)
                )));
            }
        };

        let value = match value.filter(|v| !v.is_null()) {
            None => None,
            Some(v) => Some(
                comparison_text(v)
                    .ok_or_else(|| {
                        ConditionError::malformed(format!(
                            "expected value for `{path}` must be a scalar, found {}",
                            type_name(v)
                        ))
                    })?
                    .into_owned(),
            ),
        };

        let operator = match operator {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => {
                return Err(ConditionError::malformed(format!(
                    "operator for `{path}` must be a string, found {}",
                    type_name(other)
                )));
            }
        };

        Ok(Self {
            path,
            value,
            operator,
        })
    }

    /// Expands the shorthand into a fully populated condition.
    pub fn normalize(&self) -> NormalizedCondition {
        match (&self.value, &self.operator) {
            (None, _) => NormalizedCondition {
                path: self.path.clone(),
                value: String::new(),
                operator: PRESENCE_OPERATOR.to_owned(),
            },
            (Some(value), None) => NormalizedCondition {
                path: self.path.clone(),
                value: value.clone(),
                operator: DEFAULT_OPERATOR.to_owned(),
            },
            (Some(value), Some(operator)) => NormalizedCondition {
                path: self.path.clone(),
                value: value.clone(),
                operator: operator.clone(),
            },
        }
    }

    fn to_value(&self) -> Value {
        let mut items = vec![Value::String(self.path.clone())];
        if let Some(value) = &self.value {
            items.push(Value::String(value.clone()));
            if let Some(operator) = &self.operator {
                items.push(Value::String(operator.clone()));
            }
        }
        Value::Array(items)
    }
}

/// Free-function form of [`RawCondition::normalize`].
pub fn normalize(raw: &RawCondition) -> NormalizedCondition {
    raw.normalize()
}

// ============================================================================
// CONDITION SPEC
// ============================================================================

/// The condition entry of a rule: one tuple or an AND-list of tuples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ConditionSpec {
    /// `[path]`, `[path, value]` or `[path, value, operator]`.
    Single(RawCondition),
    /// `[[...], [...]]`; every entry must hold.
    All(Vec<RawCondition>),
}

impl ConditionSpec {
    /// Parses a condition entry. The shape is taken from the first element:
    /// an array there means a list of tuples.
    ///
    /// # Examples
    ///
    /// ```
    /// use rulegate::condition::ConditionSpec;
    /// use serde_json::json;
    ///
    /// let single = ConditionSpec::from_value(&json!(["has_categories", "1"])).unwrap();
    /// assert_eq!(single.conditions().len(), 1);
    ///
    /// let all = ConditionSpec::from_value(&json!([["type", "file"], ["overwrite_file", "1"]])).unwrap();
    /// assert_eq!(all.conditions().len(), 2);
    /// ```
    pub fn from_value(value: &Value) -> Result<Self, ConditionError> {
        match value {
            Value::Array(items) => match items.first() {
                Some(Value::Array(_)) => items
                    .iter()
                    .map(RawCondition::from_value)
                    .collect::<Result<Vec<_>, _>>()
                    .map(Self::All),
                Some(_) => RawCondition::from_value(value).map(Self::Single),
                None => Err(ConditionError::malformed("empty condition list")),
            },
            other => Err(ConditionError::malformed(format!(
                "expected an array, found {}",
                type_name(other)
            ))),
        }
    }

    /// The raw conditions, in declaration order.
    pub fn conditions(&self) -> &[RawCondition] {
        match self {
            Self::Single(condition) => std::slice::from_ref(condition),
            Self::All(conditions) => conditions,
        }
    }

    /// Normalizes every condition.
    pub fn normalized(&self) -> Vec<NormalizedCondition> {
        self.conditions()
            .iter()
            .map(RawCondition::normalize)
            .collect()
    }

    /// AND-combines all conditions against `record`.
    ///
    /// Every condition is evaluated even after one fails, so a misconfigured
    /// operator later in the list is still reported.
    pub fn evaluate(&self, record: &Value) -> Result<bool, ConditionError> {
        let mut keep = true;
        for condition in self.conditions() {
            keep &= evaluate(record, &condition.normalize())?;
        }
        Ok(keep)
    }

    /// Checks every operator without looking at a record.
    pub fn check(&self) -> Result<(), ConditionError> {
        for condition in self.normalized() {
            condition.operator()?;
        }
        Ok(())
    }
}

impl TryFrom<Value> for ConditionSpec {
    type Error = ConditionError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(&value)
    }
}

impl From<ConditionSpec> for Value {
    fn from(spec: ConditionSpec) -> Self {
        match spec {
            ConditionSpec::Single(condition) => condition.to_value(),
            ConditionSpec::All(conditions) => {
                Value::Array(conditions.iter().map(RawCondition::to_value).collect())
            }
        }
    }
}

// ============================================================================
// NORMALIZED CONDITION & EVALUATION
// ============================================================================

/// A condition with path, expected value and operator all populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedCondition {
    /// Dot-delimited path into the record.
    pub path: String,
    /// Expected value.
    pub value: String,
    /// Operator string; checked when evaluated.
    pub operator: String,
}

impl NormalizedCondition {
    /// Parses the operator.
    pub fn operator(&self) -> Result<Operator, ConditionError> {
        self.operator.parse()
    }
}

/// Evaluates one condition against `record`.
///
/// The operator is checked first so a misconfigured rule fails whether or
/// not the path is present. A missing path makes the condition false.
///
/// # Examples
///
/// ```
/// use rulegate::condition::{evaluate, RawCondition};
/// use serde_json::json;
///
/// let record = json!({"count": "10"});
/// let condition = RawCondition::compare("count", "9", "greater-or-equal").normalize();
/// assert_eq!(evaluate(&record, &condition), Ok(true));
/// ```
pub fn evaluate(record: &Value, condition: &NormalizedCondition) -> Result<bool, ConditionError> {
    let operator = condition.operator()?;

    let Some(found) = extract(record, &condition.path) else {
        tracing::trace!(path = %condition.path, "condition path absent");
        return Ok(false);
    };

    let actual =
        comparison_text(found).ok_or_else(|| ConditionError::IncomparableValues {
            path: condition.path.clone(),
            found: type_name(found),
        })?;

    let result = operator.matches(compare_ordered(&actual, &condition.value));
    tracing::trace!(
        path = %condition.path,
        actual = %actual,
        expected = %condition.value,
        %operator,
        result,
        "condition evaluated"
    );
    Ok(result)
}

/// Renders a scalar as comparison text; `None` for arrays and objects.
///
/// `true` becomes `"1"`, `false` and `null` become `""`, numbers keep their
/// JSON form.
pub fn comparison_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) | Value::Null => Some(Cow::Borrowed("")),
        Value::Array(_) | Value::Object(_) => None,
    }
}
