//! Data validation engine and the domain validators built on it.
//!
//! `rules` defines the rule and result types, `evaluator` holds the pure
//! per-rule logic, and `engine` resolves rules against serializable
//! records. `account` and `wallet` compose per-operation rule sets,
//! borrowing repository lookups through the predicates in `lookup`.

pub mod account;
pub mod engine;
pub mod evaluator;
pub(crate) mod lookup;
pub mod rules;
pub mod wallet;
