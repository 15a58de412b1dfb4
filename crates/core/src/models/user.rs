//! Account entity and its request/response shapes.

use serde::{Deserialize, Serialize};

use crate::types::{AccountStatus, DbId, Timestamp};

/// A stored account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub nickname: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: AccountStatus,
    pub created_at: Timestamp,
    /// PHC-formatted argon2id hash; plaintext is never stored.
    pub password_hash: String,
}

/// Request body for account registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub nickname: String,
    pub email: String,
    pub password: String,
}

/// Request body for an account update.
///
/// The email identifies the account; absent optional fields are left
/// untouched and are skipped during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Lowercase wire form of [`AccountStatus`]; membership is validated
    /// before parsing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Request body for account removal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAccountRequest {
    pub email: String,
}

/// Request body for login.
///
/// Either `email` or `nickname` identifies the account; an empty string
/// means "not supplied".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub nickname: String,
    pub password: String,
}

/// Response body for a created account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccountResponse {
    pub id: DbId,
    pub nickname: String,
    pub email: String,
}

/// Response body for an account update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAccountResponse {
    pub id: DbId,
    pub email: String,
    /// False when the request matched the stored state and nothing was
    /// written.
    pub changed: bool,
}

/// Public account info returned on successful login.
///
/// Token minting happens outside this crate; callers receive the identity
/// to mint for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthenticatedAccount {
    pub id: DbId,
    pub nickname: String,
    pub email: String,
}
