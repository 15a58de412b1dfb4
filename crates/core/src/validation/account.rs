//! Account validators: registration, update, removal, login.
//!
//! Each operation composes its rule set into a fresh [`Validator`], runs it
//! once, and hands the ordered result back to the calling service. Lookups
//! against the account store happen inside `Must` rules, so a duplicate or
//! missing account surfaces as one more failure instead of an error.

use serde_json::Value;

use super::engine::Validator;
use super::lookup;
use super::rules::{
    Expected, FailureKind, PartialRule, RuleKind, ValidationFailure, ValidationResult,
};
use crate::models::user::{
    AuthRequest, CreateAccountRequest, DeleteAccountRequest, UpdateAccountRequest, User,
};
use crate::repository::Repository;
use crate::types::AccountStatus;

/// Standard email shape: local part, `@`, domain with a dotted TLD.
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Rejects any embedded whitespace.
const NO_WHITESPACE_PATTERN: &str = r"^\S*$";

const EMAIL_MIN_LENGTH: i64 = 12;
const NICKNAME_MIN_LENGTH: i64 = 3;
const PASSWORD_MIN_LENGTH: i64 = 8;

const EMAIL_EMPTY: &str = "email cannot be empty";
const EMAIL_INVALID: &str = "invalid email format";
const EMAIL_TAKEN: &str = "email already exists";
const NICKNAME_EMPTY: &str = "nickname cannot be empty";
const NICKNAME_TAKEN: &str = "nickname already exists";
const PASSWORD_EMPTY: &str = "password cannot be empty";
const PASSWORD_WHITESPACE: &str = "password must not contain spaces";
const STATUS_EMPTY: &str = "status cannot be empty";
const STATUS_UNKNOWN: &str = "invalid account status";
const ACCOUNT_NOT_FOUND: &str = "account not found";
const IDENTIFIER_MISSING: &str = "email or nickname is required";

/// Rules for account registration.
///
/// Email and nickname must be unique across the store; the password gets
/// shape checks only (hashing happens after validation).
pub fn validate_create_account<R>(request: &CreateAccountRequest, accounts: &R) -> ValidationResult
where
    R: Repository<User>,
{
    let mut validator = Validator::new();

    validator.add_rules(
        "email",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(EMAIL_EMPTY)),
            PartialRule::new(RuleKind::MinLength, Expected::Int(EMAIL_MIN_LENGTH), None),
            PartialRule::new(
                RuleKind::MatchesPattern,
                Expected::pattern(EMAIL_PATTERN),
                Some(EMAIL_INVALID),
            ),
            PartialRule::new(
                RuleKind::Must,
                lookup::must_not_exist::<User, _>(accounts, "email", EMAIL_TAKEN),
                Some(EMAIL_TAKEN),
            ),
        ],
    );

    validator.add_rules(
        "nickname",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(NICKNAME_EMPTY)),
            PartialRule::new(RuleKind::MinLength, Expected::Int(NICKNAME_MIN_LENGTH), None),
            PartialRule::new(
                RuleKind::Must,
                lookup::must_not_exist::<User, _>(accounts, "nickname", NICKNAME_TAKEN),
                Some(NICKNAME_TAKEN),
            ),
        ],
    );

    validator.add_rules(
        "password",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(PASSWORD_EMPTY)),
            PartialRule::new(
                RuleKind::MatchesPattern,
                Expected::pattern(NO_WHITESPACE_PATTERN),
                Some(PASSWORD_WHITESPACE),
            ),
            PartialRule::new(RuleKind::MinLength, Expected::Int(PASSWORD_MIN_LENGTH), None),
        ],
    );

    validator.validate(request)
}

/// Rules for an account update.
///
/// The email locates the account and must exist. Rules for the optional
/// fields are declared only when the request supplies them.
pub fn validate_update_account<R>(request: &UpdateAccountRequest, accounts: &R) -> ValidationResult
where
    R: Repository<User>,
{
    let mut validator = Validator::new();

    validator.add_rules(
        "email",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(EMAIL_EMPTY)),
            PartialRule::new(RuleKind::MinLength, Expected::Int(EMAIL_MIN_LENGTH), None),
            PartialRule::new(
                RuleKind::MatchesPattern,
                Expected::pattern(EMAIL_PATTERN),
                Some(EMAIL_INVALID),
            ),
            PartialRule::new(
                RuleKind::Must,
                lookup::must_exist::<User, _>(accounts, "email", ACCOUNT_NOT_FOUND),
                Some(ACCOUNT_NOT_FOUND),
            ),
        ],
    );

    if request.password.is_some() {
        validator.add_rules(
            "password",
            vec![
                PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(PASSWORD_EMPTY)),
                PartialRule::new(
                    RuleKind::MatchesPattern,
                    Expected::pattern(NO_WHITESPACE_PATTERN),
                    Some(PASSWORD_WHITESPACE),
                ),
                PartialRule::new(RuleKind::MinLength, Expected::Int(PASSWORD_MIN_LENGTH), None),
            ],
        );
    }

    if request.status.is_some() {
        validator.add_rules(
            "status",
            vec![
                PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(STATUS_EMPTY)),
                PartialRule::new(RuleKind::Must, status_is_known(), Some(STATUS_UNKNOWN)),
            ],
        );
    }

    validator.validate(request)
}

/// Rules for account removal: the email must be well formed and must
/// belong to an existing account.
pub fn validate_destroy_account<R>(
    request: &DeleteAccountRequest,
    accounts: &R,
) -> ValidationResult
where
    R: Repository<User>,
{
    let mut validator = Validator::new();
    validator.add_rules(
        "email",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(EMAIL_EMPTY)),
            PartialRule::new(RuleKind::MinLength, Expected::Int(EMAIL_MIN_LENGTH), None),
            PartialRule::new(
                RuleKind::MatchesPattern,
                Expected::pattern(EMAIL_PATTERN),
                Some(EMAIL_INVALID),
            ),
            PartialRule::new(
                RuleKind::Must,
                lookup::must_exist::<User, _>(accounts, "email", ACCOUNT_NOT_FOUND),
                Some(ACCOUNT_NOT_FOUND),
            ),
        ],
    );
    validator.validate(request)
}

/// Rules for login: a password plus at least one identifier.
///
/// Identity resolution and password verification belong to the service;
/// this only checks the request shape.
pub fn validate_login(request: &AuthRequest) -> ValidationResult {
    let mut result = ValidationResult::new();

    if request.email.is_empty() && request.nickname.is_empty() {
        result.push(ValidationFailure {
            field: "email".to_string(),
            kind: FailureKind::Rule(RuleKind::IsNotEmpty),
            message: IDENTIFIER_MISSING.to_string(),
            diagnostic: None,
        });
    }

    let mut validator = Validator::new();
    validator.add_rule(
        "password",
        RuleKind::IsNotEmpty,
        Expected::None,
        Some(PASSWORD_EMPTY),
    );
    result.extend(validator.validate(request));

    result
}

/// Membership predicate over the account status set.
fn status_is_known() -> Expected<'static> {
    Expected::predicate(|value: &Value| {
        let s = value
            .as_str()
            .ok_or_else(|| "status must be a string".to_string())?;
        match AccountStatus::parse(s) {
            Some(_) => Ok(()),
            None => Err(format!(
                "unknown status {s:?}, expected one of: {}",
                AccountStatus::ALL.map(|v| v.as_str()).join(", ")
            )),
        }
    })
}
