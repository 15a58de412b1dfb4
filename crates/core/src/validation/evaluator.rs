//! Rule evaluator: pure pass/fail logic for one value against one rule.
//!
//! Every branch is total. A value the check cannot handle, a payload that
//! does not fit the rule kind, and a pattern that does not compile all
//! produce failures; nothing passes silently and nothing panics.

use regex::Regex;
use serde_json::Value;

use super::rules::{Expected, FailureKind, FieldRule, RuleKind, ValidationFailure};

/// Evaluate one declared rule against the field's current value.
///
/// Returns `None` when the check passes.
pub fn evaluate(value: &Value, rule: &FieldRule<'_>) -> Option<ValidationFailure> {
    match rule.kind {
        RuleKind::Equals => evaluate_equality(value, rule, true),
        RuleKind::NotEquals => evaluate_equality(value, rule, false),
        RuleKind::GreaterThan => evaluate_comparison(value, rule, "greater than", |a, b| a > b),
        RuleKind::GreaterOrEqual => {
            evaluate_comparison(value, rule, "greater than or equal to", |a, b| a >= b)
        }
        RuleKind::LessThan => evaluate_comparison(value, rule, "less than", |a, b| a < b),
        RuleKind::LessOrEqual => {
            evaluate_comparison(value, rule, "less than or equal to", |a, b| a <= b)
        }
        RuleKind::IsEmpty => evaluate_emptiness(value, rule, true),
        RuleKind::IsNotEmpty => evaluate_emptiness(value, rule, false),
        RuleKind::MatchesPattern => evaluate_pattern(value, rule),
        RuleKind::ExactLength => evaluate_exact_length(value, rule),
        RuleKind::MinLength => evaluate_min_length(value, rule),
        RuleKind::Must => evaluate_must(value, rule),
    }
}

fn failure(rule: &FieldRule<'_>, default: String) -> ValidationFailure {
    ValidationFailure {
        field: rule.field.clone(),
        kind: FailureKind::Rule(rule.kind),
        message: rule.message.clone().unwrap_or(default),
        diagnostic: None,
    }
}

/// The field's value has a type the rule kind cannot check.
fn invalid_type(rule: &FieldRule<'_>) -> ValidationFailure {
    ValidationFailure {
        field: rule.field.clone(),
        kind: FailureKind::Rule(rule.kind),
        message: format!("invalid type for {}", rule.field),
        diagnostic: None,
    }
}

/// The rule carries a payload its kind cannot consume.
fn invalid_expected(rule: &FieldRule<'_>) -> ValidationFailure {
    ValidationFailure {
        field: rule.field.clone(),
        kind: FailureKind::Rule(rule.kind),
        message: format!("invalid expected value for {}", rule.field),
        diagnostic: None,
    }
}

fn evaluate_equality(
    value: &Value,
    rule: &FieldRule<'_>,
    want_equal: bool,
) -> Option<ValidationFailure> {
    let expected = match &rule.expected {
        Expected::Value(v) => v,
        _ => return Some(invalid_expected(rule)),
    };
    if (value == expected) == want_equal {
        return None;
    }
    let default = if want_equal {
        format!("{} must equal the expected value", rule.field)
    } else {
        format!("{} must not equal the expected value", rule.field)
    };
    Some(failure(rule, default))
}

fn evaluate_comparison(
    value: &Value,
    rule: &FieldRule<'_>,
    relation: &str,
    compare: impl Fn(i64, i64) -> bool,
) -> Option<ValidationFailure> {
    let expected = match rule.expected {
        Expected::Int(n) => n,
        _ => return Some(invalid_expected(rule)),
    };
    // Both sides must be integers; fractional numbers and strings fail.
    let actual = match value.as_i64() {
        Some(n) => n,
        None => return Some(invalid_type(rule)),
    };
    if compare(actual, expected) {
        None
    } else {
        Some(failure(
            rule,
            format!("{} must be {relation} {expected}", rule.field),
        ))
    }
}

fn evaluate_emptiness(
    value: &Value,
    rule: &FieldRule<'_>,
    want_empty: bool,
) -> Option<ValidationFailure> {
    // Emptiness is a string property; no trimming is applied.
    let s = match value.as_str() {
        Some(s) => s,
        None => return Some(invalid_type(rule)),
    };
    if s.is_empty() == want_empty {
        return None;
    }
    let default = if want_empty {
        format!("{} must be empty", rule.field)
    } else {
        format!("{} must not be empty", rule.field)
    };
    Some(failure(rule, default))
}

fn evaluate_pattern(value: &Value, rule: &FieldRule<'_>) -> Option<ValidationFailure> {
    let pattern = match &rule.expected {
        Expected::Pattern(p) => p,
        _ => return Some(invalid_expected(rule)),
    };
    let s = match value.as_str() {
        Some(s) => s,
        None => return Some(invalid_type(rule)),
    };
    match Regex::new(pattern) {
        Ok(re) if re.is_match(s) => None,
        Ok(_) => Some(failure(
            rule,
            format!("{} does not match the expected pattern", rule.field),
        )),
        Err(e) => Some(ValidationFailure {
            field: rule.field.clone(),
            kind: FailureKind::Rule(rule.kind),
            message: format!("invalid pattern for {}", rule.field),
            diagnostic: Some(e.to_string()),
        }),
    }
}

fn evaluate_exact_length(value: &Value, rule: &FieldRule<'_>) -> Option<ValidationFailure> {
    let expected = match rule.expected {
        Expected::Int(n) => n,
        _ => return Some(invalid_expected(rule)),
    };
    let s = match value.as_str() {
        Some(s) => s,
        None => return Some(invalid_type(rule)),
    };
    // Length counts characters, not bytes.
    if s.chars().count() as i64 == expected {
        None
    } else {
        Some(failure(
            rule,
            format!("{} must be exactly {expected} characters", rule.field),
        ))
    }
}

fn evaluate_min_length(value: &Value, rule: &FieldRule<'_>) -> Option<ValidationFailure> {
    let expected = match rule.expected {
        Expected::Int(n) => n,
        _ => return Some(invalid_expected(rule)),
    };
    let s = match value.as_str() {
        Some(s) => s,
        None => return Some(invalid_type(rule)),
    };
    if s.chars().count() as i64 >= expected {
        None
    } else {
        Some(failure(
            rule,
            format!("{} must be at least {expected} characters", rule.field),
        ))
    }
}

fn evaluate_must(value: &Value, rule: &FieldRule<'_>) -> Option<ValidationFailure> {
    let check = match &rule.expected {
        Expected::Predicate(check) => check,
        _ => return Some(invalid_expected(rule)),
    };
    match check(value) {
        Ok(()) => None,
        // The predicate's own reason goes into the diagnostic; the rule's
        // static message stays the user-facing one.
        Err(reason) => Some(ValidationFailure {
            field: rule.field.clone(),
            kind: FailureKind::Rule(rule.kind),
            message: rule
                .message
                .clone()
                .unwrap_or_else(|| format!("{} is invalid", rule.field)),
            diagnostic: Some(reason),
        }),
    }
}
