//! Wallet validators: creation and update.

use super::engine::Validator;
use super::lookup;
use super::rules::{Expected, PartialRule, RuleKind, ValidationResult};
use crate::models::wallet::{CreateWalletRequest, UpdateWalletRequest, Wallet};
use crate::repository::Repository;

/// Wallet names are fixed-width labels.
const NAME_LENGTH: i64 = 5;

const NAME_EMPTY: &str = "wallet name cannot be empty";
const NAME_WRONG_LENGTH: &str = "wallet name must be exactly 5 characters";
const BALANCE_NEGATIVE: &str = "balance cannot be negative";
const USER_ID_INVALID: &str = "invalid user id";
const WALLET_NOT_FOUND: &str = "wallet not found";

/// Rules for wallet creation.
///
/// Name uniqueness per owner is the service's concern; it needs the whole
/// store, not a single-field lookup.
pub fn validate_create_wallet(request: &CreateWalletRequest) -> ValidationResult {
    let mut validator = Validator::new();
    validator.add_rules(
        "name",
        vec![
            PartialRule::new(RuleKind::IsNotEmpty, Expected::None, Some(NAME_EMPTY)),
            PartialRule::new(
                RuleKind::ExactLength,
                Expected::Int(NAME_LENGTH),
                Some(NAME_WRONG_LENGTH),
            ),
        ],
    );
    validator.add_rule(
        "balance",
        RuleKind::GreaterOrEqual,
        Expected::Int(0),
        Some(BALANCE_NEGATIVE),
    );
    validator.add_rule(
        "user_id",
        RuleKind::GreaterOrEqual,
        Expected::Int(0),
        Some(USER_ID_INVALID),
    );
    validator.validate(request)
}

/// Rules for a wallet update.
///
/// The wallet id must belong to a stored wallet; the balance rule is
/// declared only when the request supplies a new balance.
pub fn validate_update_wallet<W>(request: &UpdateWalletRequest, wallets: &W) -> ValidationResult
where
    W: Repository<Wallet>,
{
    let mut validator = Validator::new();
    validator.add_rule(
        "wallet_id",
        RuleKind::Must,
        lookup::must_exist::<Wallet, _>(wallets, "id", WALLET_NOT_FOUND),
        Some(WALLET_NOT_FOUND),
    );
    validator.add_rule("name", RuleKind::IsNotEmpty, Expected::None, Some(NAME_EMPTY));
    if request.balance.is_some() {
        validator.add_rule(
            "balance",
            RuleKind::GreaterOrEqual,
            Expected::Int(0),
            Some(BALANCE_NEGATIVE),
        );
    }
    validator.validate(request)
}
