//! Repository-backed predicates shared by the domain validators.
//!
//! Both builders wrap `find_by_field` and give the three lookup outcomes a
//! direction: a uniqueness check accepts "not found", an existence check
//! accepts "found", and a backend error rejects in either direction with
//! the backend's message preserved verbatim in the diagnostic.

use serde_json::Value;

use super::rules::Expected;
use crate::repository::{RepoError, Repository};

const CHECK_FAILED: &str = "the check could not be completed";

/// Uniqueness predicate for create flows: the value is accepted only when
/// the lookup comes back `NotFound`.
pub(crate) fn must_not_exist<'r, T, R>(
    repo: &'r R,
    field: &'static str,
    taken_message: &'static str,
) -> Expected<'r>
where
    R: Repository<T>,
{
    Expected::predicate(move |value: &Value| match repo.find_by_field(field, value) {
        Err(RepoError::NotFound) => Ok(()),
        Ok(_) => Err(taken_message.to_string()),
        Err(RepoError::Backend(detail)) => {
            tracing::warn!(field, error = %detail, "Lookup failed during validation");
            Err(format!("{CHECK_FAILED}: {detail}"))
        }
    })
}

/// Existence predicate for update and destroy flows: the value is accepted
/// only when the lookup finds a record.
pub(crate) fn must_exist<'r, T, R>(
    repo: &'r R,
    field: &'static str,
    missing_message: &'static str,
) -> Expected<'r>
where
    R: Repository<T>,
{
    Expected::predicate(move |value: &Value| match repo.find_by_field(field, value) {
        Ok(_) => Ok(()),
        Err(RepoError::NotFound) => Err(missing_message.to_string()),
        Err(RepoError::Backend(detail)) => {
            tracing::warn!(field, error = %detail, "Lookup failed during validation");
            Err(format!("{CHECK_FAILED}: {detail}"))
        }
    })
}
