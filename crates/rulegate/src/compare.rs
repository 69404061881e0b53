//! Ordered, version-style comparison of condition operands.
//!
//! Operands are split into segments: digit runs compare as integers and all
//! other runs compare lexically, so `"2" < "10"` and `"1.9" < "1.10"`.
//! Plain string comparison would order `"10"` before `"2"`, and plain
//! numeric comparison cannot handle values like `"file"` or `"1.0rc1"`.
//!
//! # Rules
//!
//! 1. `.`, `-`, `_` and `+` separate segments and are dropped. A switch
//!    between digit and non-digit characters also starts a new segment.
//! 2. The empty string is less than any non-empty value, including one made
//!    only of separators (`"" < "-"`). Beyond that, a separator-only value
//!    is an empty segment list and falls under rule 4.
//! 3. Numbers compare by value (any length, leading zeros ignored), text
//!    compares byte-wise, and text sorts before numbers.
//! 4. When one value is a prefix of the other, the first extra segment
//!    decides: an extra number makes the longer value greater
//!    (`1.0 < 1.0.1`), extra text makes it smaller (`1.0rc < 1.0`).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConditionError;

// ============================================================================
// SEGMENTS
// ============================================================================

/// One comparable run of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Digit run with leading zeros stripped (`"007"` is stored as `"7"`,
    /// `"0"` as `""`).
    Number(&'a str),
    /// Non-digit run.
    Text(&'a str),
}

impl<'a> Segment<'a> {
    fn from_run(run: &'a str, digits: bool) -> Self {
        if digits {
            Self::Number(run.trim_start_matches('0'))
        } else {
            Self::Text(run)
        }
    }
}

impl Ord for Segment<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), Self::Number(_)) => Ordering::Less,
            (Self::Number(_), Self::Text(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for Segment<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

const fn is_separator(ch: char) -> bool {
    matches!(ch, '.' | '-' | '_' | '+')
}

/// Splits `input` into comparable segments.
///
/// # Examples
///
/// ```
/// use rulegate::compare::{tokenize, Segment};
///
/// assert_eq!(
///     tokenize("1.10rc2"),
///     vec![
///         Segment::Number("1"),
///         Segment::Number("10"),
///         Segment::Text("rc"),
///         Segment::Number("2"),
///     ]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    // (start byte offset, run is digits)
    let mut run: Option<(usize, bool)> = None;

    for (idx, ch) in input.char_indices() {
        if is_separator(ch) {
            if let Some((start, digits)) = run.take() {
                segments.push(Segment::from_run(&input[start..idx], digits));
            }
            continue;
        }

        let digit = ch.is_ascii_digit();
        match run {
            Some((_, digits)) if digits == digit => {}
            Some((start, digits)) => {
                segments.push(Segment::from_run(&input[start..idx], digits));
                run = Some((idx, digit));
            }
            None => run = Some((idx, digit)),
        }
    }

    if let Some((start, digits)) = run {
        segments.push(Segment::from_run(&input[start..], digits));
    }
    segments
}

/// Compares two operands with ordered segment semantics.
///
/// # Examples
///
/// ```
/// use rulegate::compare::compare_ordered;
/// use std::cmp::Ordering;
///
/// assert_eq!(compare_ordered("9", "10"), Ordering::Less);
/// assert_eq!(compare_ordered("007", "7"), Ordering::Equal);
/// assert_eq!(compare_ordered("file", "image"), Ordering::Less);
/// ```
pub fn compare_ordered(left: &str, right: &str) -> Ordering {
    // Emptiness is decided on the raw text: `"-"` has no segments but is not empty.
    match (left.is_empty(), right.is_empty()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        (false, false) => {}
    }

    let left = tokenize(left);
    let right = tokenize(right);

    if let Some(ordering) = left
        .iter()
        .zip(&right)
        .map(|(l, r)| l.cmp(r))
        .find(|ordering| ordering.is_ne())
    {
        return ordering;
    }

    match left.len().cmp(&right.len()) {
        Ordering::Equal => Ordering::Equal,
        Ordering::Greater => extra_segment(left[right.len()]),
        Ordering::Less => extra_segment(right[left.len()]).reverse(),
    }
}

/// Ordering of the longer operand when the shorter one is its prefix.
fn extra_segment(extra: Segment<'_>) -> Ordering {
    match extra {
        Segment::Number(_) => Ordering::Greater,
        Segment::Text(_) => Ordering::Less,
    }
}

// ============================================================================
// OPERATORS
// ============================================================================

/// Relational operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operator {
    /// `equal` (`==`, `=`, `eq`)
    Equal,
    /// `not-equal` (`!=`, `<>`, `ne`)
    NotEqual,
    /// `greater-or-equal` (`>=`, `ge`)
    GreaterOrEqual,
    /// `less-or-equal` (`<=`, `le`)
    LessOrEqual,
    /// `greater-than` (`>`, `gt`)
    GreaterThan,
    /// `less-than` (`<`, `lt`)
    LessThan,
}

impl Operator {
    /// All operators, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Equal,
        Self::NotEqual,
        Self::GreaterOrEqual,
        Self::LessOrEqual,
        Self::GreaterThan,
        Self::LessThan,
    ];

    /// Canonical name used in rule definitions.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::NotEqual => "not-equal",
            Self::GreaterOrEqual => "greater-or-equal",
            Self::LessOrEqual => "less-or-equal",
            Self::GreaterThan => "greater-than",
            Self::LessThan => "less-than",
        }
    }

    /// Whether `ordering` (actual compared to expected) satisfies this operator.
    pub const fn matches(self, ordering: Ordering) -> bool {
        match self {
            Self::Equal => ordering.is_eq(),
            Self::NotEqual => ordering.is_ne(),
            Self::GreaterOrEqual => ordering.is_ge(),
            Self::LessOrEqual => ordering.is_le(),
            Self::GreaterThan => ordering.is_gt(),
            Self::LessThan => ordering.is_lt(),
        }
    }

    /// Applies the operator to two operands using [`compare_ordered`].
    ///
    /// ```
    /// use rulegate::compare::Operator;
    ///
    /// assert!(Operator::GreaterOrEqual.apply("10", "9"));
    /// assert!(!Operator::Equal.apply("0", "1"));
    /// ```
    pub fn apply(self, actual: &str, expected: &str) -> bool {
        self.matches(compare_ordered(actual, expected))
    }
}

impl FromStr for Operator {
    type Err = ConditionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "equal" | "==" | "=" | "eq" => Ok(Self::Equal),
            "not-equal" | "!=" | "<>" | "ne" => Ok(Self::NotEqual),
            "greater-or-equal" | ">=" | "ge" => Ok(Self::GreaterOrEqual),
            "less-or-equal" | "<=" | "le" => Ok(Self::LessOrEqual),
            "greater-than" | ">" | "gt" => Ok(Self::GreaterThan),
            "less-than" | "<" | "lt" => Ok(Self::LessThan),
            other => Err(ConditionError::InvalidOperator {
                operator: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
