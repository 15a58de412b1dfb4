//! Validation engine: an ordered rule list applied to one record.

use serde::Serialize;
use serde_json::Value;

use super::evaluator;
use super::rules::{
    Expected, FailureKind, FieldRule, PartialRule, RuleKind, ValidationFailure, ValidationResult,
};

/// Collects field rules and applies them to any serializable record.
///
/// A validator is built fresh per validation run by the composing domain
/// validator; rules never outlive the run, so predicates may borrow
/// whatever the caller has in scope (typically a repository).
#[derive(Debug, Default)]
pub struct Validator<'v> {
    rules: Vec<FieldRule<'v>>,
}

impl<'v> Validator<'v> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Append one rule for `field`.
    ///
    /// Rules are evaluated in the order they were added; nothing is
    /// deduplicated.
    pub fn add_rule(
        &mut self,
        field: &str,
        kind: RuleKind,
        expected: Expected<'v>,
        message: Option<&str>,
    ) {
        self.rules.push(FieldRule {
            field: field.to_string(),
            kind,
            expected,
            message: message.map(str::to_string),
        });
    }

    /// Append several rules for one field at once, in the given order.
    pub fn add_rules(&mut self, field: &str, rules: Vec<PartialRule<'v>>) {
        for rule in rules {
            self.rules.push(FieldRule {
                field: field.to_string(),
                kind: rule.kind,
                expected: rule.expected,
                message: rule.message,
            });
        }
    }

    /// Run every declared rule against `record`.
    ///
    /// The record is introspected through its `Serialize` impl: the derived
    /// impl is the compile-time field mapping, and each rule resolves its
    /// field by name on the serialized map. A record that does not
    /// serialize to an object yields a single invalid-input failure.
    ///
    /// Evaluation is total. A missing field produces a field-not-found
    /// failure and the run continues; failures never short-circuit later
    /// rules, and the result lists them in declaration order.
    pub fn validate<T: Serialize>(&self, record: &T) -> ValidationResult {
        let data = match serde_json::to_value(record) {
            Ok(Value::Object(map)) => map,
            _ => {
                let mut result = ValidationResult::new();
                result.push(ValidationFailure {
                    field: String::new(),
                    kind: FailureKind::InvalidInput,
                    message: "validation input must be a record with named fields".to_string(),
                    diagnostic: None,
                });
                return result;
            }
        };

        let mut result = ValidationResult::new();
        for rule in &self.rules {
            match data.get(&rule.field) {
                Some(value) => {
                    if let Some(failure) = evaluator::evaluate(value, rule) {
                        result.push(failure);
                    }
                }
                None => result.push(ValidationFailure {
                    field: rule.field.clone(),
                    kind: FailureKind::FieldNotFound,
                    message: format!("{} was not found on the input", rule.field),
                    diagnostic: None,
                }),
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Signup {
        name: String,
        email: String,
        age: i64,
    }

    fn signup(name: &str, email: &str, age: i64) -> Signup {
        Signup {
            name: name.to_string(),
            email: email.to_string(),
            age,
        }
    }

    #[test]
    fn clean_record_produces_empty_result() {
        let mut validator = Validator::new();
        validator.add_rule("name", RuleKind::IsNotEmpty, Expected::None, None);
        validator.add_rule("age", RuleKind::GreaterOrEqual, Expected::Int(18), None);

        let result = validator.validate(&signup("alice", "alice@example.com", 30));
        assert!(result.is_valid());
        assert!(result.failures.is_empty());
    }

    #[test]
    fn three_independent_violations_come_back_in_declaration_order() {
        let mut validator = Validator::new();
        validator.add_rule("name", RuleKind::IsNotEmpty, Expected::None, None);
        validator.add_rule("email", RuleKind::MinLength, Expected::Int(12), None);
        validator.add_rule("age", RuleKind::GreaterOrEqual, Expected::Int(18), None);

        let result = validator.validate(&signup("", "a@b.c", 5));
        assert_eq!(result.failures.len(), 3);
        assert_eq!(result.failures[0].field, "name");
        assert_eq!(result.failures[1].field, "email");
        assert_eq!(result.failures[2].field, "age");
    }

    #[test]
    fn failure_does_not_short_circuit_later_rules() {
        let mut validator = Validator::new();
        validator.add_rule("name", RuleKind::IsNotEmpty, Expected::None, None);
        validator.add_rule("name", RuleKind::MinLength, Expected::Int(3), None);

        let result = validator.validate(&signup("", "x@y.zz", 20));
        // Both rules on the same field report, in order.
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].kind, FailureKind::Rule(RuleKind::IsNotEmpty));
        assert_eq!(result.failures[1].kind, FailureKind::Rule(RuleKind::MinLength));
    }

    #[test]
    fn missing_field_is_reported_and_the_run_continues() {
        let mut validator = Validator::new();
        validator.add_rule("middle_name", RuleKind::IsNotEmpty, Expected::None, None);
        validator.add_rule("age", RuleKind::GreaterOrEqual, Expected::Int(18), None);

        let result = validator.validate(&signup("alice", "alice@example.com", 5));
        assert_eq!(result.failures.len(), 2);
        assert_eq!(result.failures[0].kind, FailureKind::FieldNotFound);
        assert_eq!(result.failures[0].field, "middle_name");
        assert_eq!(result.failures[1].field, "age");
    }

    #[test]
    fn non_record_input_yields_single_invalid_input_failure() {
        let mut validator = Validator::new();
        validator.add_rule("name", RuleKind::IsNotEmpty, Expected::None, None);
        validator.add_rule("age", RuleKind::GreaterOrEqual, Expected::Int(18), None);

        let result = validator.validate(&"just a string");
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].kind, FailureKind::InvalidInput);
    }

    #[test]
    fn add_rules_declares_in_given_order() {
        let mut validator = Validator::new();
        validator.add_rules(
            "name",
            vec![
                PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some("name is empty")),
                PartialRule::new(RuleKind::MinLength, Expected::Int(3), None),
            ],
        );

        let result = validator.validate(&signup("", "x@y.zz", 20));
        assert_eq!(
            result.messages(),
            vec!["name is empty", "name must be at least 3 characters"]
        );
    }

    #[test]
    fn validator_with_no_rules_accepts_any_record() {
        let validator = Validator::new();
        let result = validator.validate(&signup("", "", -1));
        assert!(result.is_valid());
    }

    #[test]
    fn predicate_rules_can_borrow_local_state() {
        let taken = vec!["alice".to_string(), "bob".to_string()];
        let mut validator = Validator::new();
        validator.add_rule(
            "name",
            RuleKind::Must,
            Expected::predicate(|value: &serde_json::Value| {
                let name = value.as_str().unwrap_or_default();
                if taken.iter().any(|t| t == name) {
                    Err(format!("{name} is taken"))
                } else {
                    Ok(())
                }
            }),
            Some("name already exists"),
        );

        let result = validator.validate(&signup("alice", "a@b.cc", 20));
        assert_eq!(result.messages(), vec!["name already exists"]);
        assert_eq!(result.failures[0].diagnostic.as_deref(), Some("alice is taken"));
    }
}
