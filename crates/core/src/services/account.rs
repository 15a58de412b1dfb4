//! Account use-cases: registration, update, removal, login.

use chrono::Utc;
use serde_json::Value;

use super::check;
use crate::error::CoreError;
use crate::models::user::{
    AuthRequest, AuthenticatedAccount, CreateAccountRequest, CreateAccountResponse,
    DeleteAccountRequest, UpdateAccountRequest, UpdateAccountResponse, User,
};
use crate::password;
use crate::repository::{RepoError, Repository};
use crate::types::AccountStatus;
use crate::validation::account as account_rules;

/// Entity name used in error reporting.
const ENTITY: &str = "account";

/// Orchestrates account validation and persistence.
pub struct AccountService<R> {
    accounts: R,
}

impl<R> AccountService<R>
where
    R: Repository<User>,
{
    pub fn new(accounts: R) -> Self {
        Self { accounts }
    }

    /// The underlying account store.
    pub fn accounts(&self) -> &R {
        &self.accounts
    }

    /// Register a new account.
    ///
    /// New accounts start out inactive; activation is an update concern.
    pub fn create_account(
        &self,
        request: &CreateAccountRequest,
    ) -> Result<CreateAccountResponse, CoreError> {
        // 1. Validate, including the uniqueness lookups.
        check(account_rules::validate_create_account(request, &self.accounts))?;

        // 2. Hash the password. Plaintext never reaches the store.
        let password_hash = password::hash_password(&request.password)
            .map_err(|e| CoreError::PasswordHash(e.to_string()))?;

        // 3. Persist with the initial lifecycle state.
        let user = User {
            id: 0, // assigned by the store
            nickname: request.nickname.clone(),
            first_name: String::new(),
            last_name: String::new(),
            email: request.email.clone(),
            status: AccountStatus::Inactive,
            created_at: Utc::now(),
            password_hash,
        };
        let created = self
            .accounts
            .create(&user)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = created.id, email = %created.email, "Account created");

        Ok(CreateAccountResponse {
            id: created.id,
            nickname: created.nickname,
            email: created.email,
        })
    }

    /// Apply the supplied fields to the account identified by email.
    ///
    /// When the request matches the stored state, nothing is written and
    /// the response says so.
    pub fn update_account(
        &self,
        request: &UpdateAccountRequest,
    ) -> Result<UpdateAccountResponse, CoreError> {
        // 1. Validate, including the existence lookup.
        check(account_rules::validate_update_account(request, &self.accounts))?;

        // 2. Fetch the stored account.
        let mut user = self
            .accounts
            .find_by_field("email", &Value::String(request.email.clone()))
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        // 3. Apply supplied fields, tracking whether anything changed.
        let mut changed = false;
        if let Some(first_name) = &request.first_name {
            if *first_name != user.first_name {
                user.first_name = first_name.clone();
                changed = true;
            }
        }
        if let Some(last_name) = &request.last_name {
            if *last_name != user.last_name {
                user.last_name = last_name.clone();
                changed = true;
            }
        }
        if let Some(status) = &request.status {
            // Membership was validated; unknown values cannot reach here.
            if let Some(parsed) = AccountStatus::parse(status) {
                if parsed != user.status {
                    user.status = parsed;
                    changed = true;
                }
            }
        }
        if let Some(new_password) = &request.password {
            // The same password re-hashes to a different salt, so sameness
            // is detected by verification rather than hash comparison.
            let same = password::verify_password(new_password, &user.password_hash)
                .map_err(|e| CoreError::PasswordHash(e.to_string()))?;
            if !same {
                user.password_hash = password::hash_password(new_password)
                    .map_err(|e| CoreError::PasswordHash(e.to_string()))?;
                changed = true;
            }
        }

        // 4. Skip the write when nothing changed.
        if !changed {
            tracing::debug!(id = user.id, "Account update was a no-op");
            return Ok(UpdateAccountResponse {
                id: user.id,
                email: user.email,
                changed: false,
            });
        }

        let updated = self
            .accounts
            .update(&user)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = updated.id, "Account updated");

        Ok(UpdateAccountResponse {
            id: updated.id,
            email: updated.email,
            changed: true,
        })
    }

    /// Remove the account identified by email.
    pub fn destroy_account(&self, request: &DeleteAccountRequest) -> Result<(), CoreError> {
        // 1. Validate, including the existence lookup.
        check(account_rules::validate_destroy_account(request, &self.accounts))?;

        // 2. Fetch to resolve the id, then delete.
        let user = self
            .accounts
            .find_by_field("email", &Value::String(request.email.clone()))
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;
        self.accounts
            .delete(user.id)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = user.id, email = %user.email, "Account removed");
        Ok(())
    }

    /// Authenticate by email or nickname plus password.
    pub fn login(&self, request: &AuthRequest) -> Result<AuthenticatedAccount, CoreError> {
        // 1. Shape checks; identity resolution comes after.
        check(account_rules::validate_login(request))?;

        // 2. Resolve the account by email, falling back to nickname.
        let lookup = if request.email.is_empty() {
            self.accounts
                .find_by_field("nickname", &Value::String(request.nickname.clone()))
        } else {
            self.accounts
                .find_by_field("email", &Value::String(request.email.clone()))
        };
        let user = match lookup {
            Ok(user) => user,
            // An unknown identifier and a wrong password report identically.
            Err(RepoError::NotFound) => return Err(CoreError::InvalidCredentials),
            Err(RepoError::Backend(detail)) => return Err(CoreError::Storage(detail)),
        };

        // 3. Suspended accounts cannot authenticate.
        if user.status == AccountStatus::Suspended {
            tracing::debug!(id = user.id, "Login rejected: account suspended");
            return Err(CoreError::AccountSuspended);
        }

        // 4. Verify the password.
        let verified = password::verify_password(&request.password, &user.password_hash)
            .map_err(|e| CoreError::PasswordHash(e.to_string()))?;
        if !verified {
            tracing::debug!(id = user.id, "Login rejected: password mismatch");
            return Err(CoreError::InvalidCredentials);
        }

        tracing::info!(id = user.id, "Login succeeded");
        Ok(AuthenticatedAccount {
            id: user.id,
            nickname: user.nickname,
            email: user.email,
        })
    }
}
