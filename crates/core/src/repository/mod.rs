//! Persistence ports consumed by the validators and services.
//!
//! The concrete backing store lives outside this crate; everything here
//! talks to it through [`Repository`], and tests substitute the in-memory
//! implementation from [`memory`].

use serde_json::Value;

use crate::models::wallet::{UserWallets, Wallet};
use crate::types::DbId;

pub mod memory;

/// Error contract for repository calls.
///
/// `NotFound` is a distinct signal because validators branch on it:
/// uniqueness checks treat it as acceptance, existence checks as rejection.
/// Everything else arrives as `Backend` with the backend's own message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepoError {
    #[error("Record not found")]
    NotFound,

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Minimal synchronous persistence port for one entity type.
pub trait Repository<T>: Send + Sync {
    /// Persist a new record. The store assigns the id; the returned record
    /// carries it.
    fn create(&self, entity: &T) -> Result<T, RepoError>;

    fn get_by_id(&self, id: DbId) -> Result<T, RepoError>;

    fn get_all(&self) -> Result<Vec<T>, RepoError>;

    /// Replace the stored record with the same id.
    fn update(&self, entity: &T) -> Result<T, RepoError>;

    fn delete(&self, id: DbId) -> Result<(), RepoError>;

    /// Look up the first record whose named field equals `value`.
    ///
    /// This is the only method the validation predicates use.
    fn find_by_field(&self, field: &str, value: &Value) -> Result<T, RepoError>;
}

/// Wallet-specific extension of the port.
pub trait WalletRepository: Repository<Wallet> {
    /// All wallets belonging to the account with this email.
    fn user_wallets(&self, email: &str) -> Result<UserWallets, RepoError>;
}
