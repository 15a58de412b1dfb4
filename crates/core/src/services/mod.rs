//! Domain services orchestrating validation and persistence.
//!
//! Each service owns its repository, validates every request up front, and
//! only then touches stored state. A rejected validation surfaces as
//! [`CoreError::Validation`] carrying one message per violated rule.

pub mod account;
pub mod wallet;

use crate::error::CoreError;
use crate::validation::rules::ValidationResult;

/// Convert a failed validation into the service error space.
fn check(result: ValidationResult) -> Result<(), CoreError> {
    if result.is_valid() {
        return Ok(());
    }
    tracing::debug!(failures = result.failures.len(), "Validation rejected request");
    Err(CoreError::Validation(result.messages()))
}
