//! Validation rule and result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of checks a field rule can perform.
///
/// Which [`Expected`] payload a kind consumes is part of its contract; the
/// evaluator reports a mismatch as a failure instead of guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterOrEqual,
    LessThan,
    LessOrEqual,
    IsEmpty,
    IsNotEmpty,
    MatchesPattern,
    ExactLength,
    MinLength,
    /// Caller-supplied predicate, typically a repository lookup.
    Must,
}

/// A caller-supplied check. Returns `Err` with a human-readable reason when
/// the value is rejected.
pub type CustomPredicate<'v> = Box<dyn Fn(&Value) -> Result<(), String> + 'v>;

/// Expected-value payload attached to a rule.
pub enum Expected<'v> {
    /// No payload (emptiness checks).
    None,
    /// Integer bound for numeric and length checks.
    Int(i64),
    /// Regular-expression source for pattern checks.
    Pattern(String),
    /// Structural value for equality checks.
    Value(Value),
    /// Predicate for `Must` rules.
    Predicate(CustomPredicate<'v>),
}

impl<'v> Expected<'v> {
    pub fn pattern(source: impl Into<String>) -> Self {
        Expected::Pattern(source.into())
    }

    pub fn value(value: impl Into<Value>) -> Self {
        Expected::Value(value.into())
    }

    pub fn predicate<F>(check: F) -> Self
    where
        F: Fn(&Value) -> Result<(), String> + 'v,
    {
        Expected::Predicate(Box::new(check))
    }
}

impl fmt::Debug for Expected<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::None => f.write_str("None"),
            Expected::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Expected::Pattern(p) => f.debug_tuple("Pattern").field(p).finish(),
            Expected::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Expected::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

/// A single declared check: which field, what kind of check, and what to
/// check against.
///
/// Built by the domain validators, consumed by one validation run, then
/// discarded.
#[derive(Debug)]
pub struct FieldRule<'v> {
    pub field: String,
    pub kind: RuleKind,
    pub expected: Expected<'v>,
    /// Static message reported when the check fails. When absent, the
    /// evaluator renders a default naming the field and the condition.
    pub message: Option<String>,
}

/// A rule without its field name, for declaring several checks on one field
/// at once via `Validator::add_rules`.
#[derive(Debug)]
pub struct PartialRule<'v> {
    pub kind: RuleKind,
    pub expected: Expected<'v>,
    pub message: Option<String>,
}

impl<'v> PartialRule<'v> {
    pub fn new(kind: RuleKind, expected: Expected<'v>, message: Option<&str>) -> Self {
        Self {
            kind,
            expected,
            message: message.map(str::to_string),
        }
    }
}

/// Classifies a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The validated input was not a record with named fields.
    InvalidInput,
    /// A declared rule referenced a field the record does not have.
    FieldNotFound,
    /// A rule was evaluated and its condition did not hold.
    Rule(RuleKind),
}

/// A single violated check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub field: String,
    pub kind: FailureKind,
    /// User-facing message, one per failure.
    pub message: String,
    /// Raw lower-level detail (predicate reason, backend error text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostic: Option<String>,
}

/// Aggregated outcome of one validation run.
///
/// Failures appear in rule declaration order; an empty list means the
/// record passed every declared check.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Append one failure, preserving order.
    pub fn push(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Append every failure from another run, preserving order.
    pub fn extend(&mut self, other: ValidationResult) {
        self.failures.extend(other.failures);
    }

    /// One rendered message per failure, in order.
    pub fn messages(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.message.clone()).collect()
    }
}
