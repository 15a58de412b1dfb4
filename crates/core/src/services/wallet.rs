//! Wallet use-cases: creation, update, removal, per-user views.

use super::check;
use crate::error::CoreError;
use crate::models::wallet::{CreateWalletRequest, UpdateWalletRequest, UserWallets, Wallet};
use crate::repository::WalletRepository;
use crate::types::DbId;
use crate::validation::wallet as wallet_rules;

/// Entity name used in error reporting.
const ENTITY: &str = "wallet";

const NAME_TAKEN: &str = "wallet name already used by this account";
const WALLET_ID_INVALID: &str = "invalid wallet id";

/// Orchestrates wallet validation and persistence.
pub struct WalletService<W> {
    wallets: W,
}

impl<W> WalletService<W>
where
    W: WalletRepository,
{
    pub fn new(wallets: W) -> Self {
        Self { wallets }
    }

    /// The underlying wallet store.
    pub fn wallets(&self) -> &W {
        &self.wallets
    }

    /// Create a wallet. Names must be unique per owning account.
    pub fn create_wallet(&self, request: &CreateWalletRequest) -> Result<Wallet, CoreError> {
        // 1. Shape checks.
        check(wallet_rules::validate_create_wallet(request))?;

        // 2. Per-account name uniqueness needs the whole store; the port
        //    has no compound filter.
        let existing = self
            .wallets
            .get_all()
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;
        if existing
            .iter()
            .any(|w| w.user_id == request.user_id && w.name == request.name)
        {
            return Err(CoreError::Validation(vec![NAME_TAKEN.to_string()]));
        }

        // 3. Persist.
        let wallet = Wallet {
            id: 0, // assigned by the store
            name: request.name.clone(),
            wallet_type: request.wallet_type,
            balance: request.balance,
            user_id: request.user_id,
        };
        let created = self
            .wallets
            .create(&wallet)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = created.id, user_id = created.user_id, "Wallet created");
        Ok(created)
    }

    /// Apply the supplied fields to a wallet.
    ///
    /// When the request matches the stored state, nothing is written and
    /// the stored wallet comes back unchanged.
    pub fn update_wallet(&self, request: &UpdateWalletRequest) -> Result<Wallet, CoreError> {
        // 1. Validate, including the existence lookup.
        check(wallet_rules::validate_update_wallet(request, &self.wallets))?;

        // 2. Fetch the stored wallet.
        let mut wallet = self
            .wallets
            .get_by_id(request.wallet_id)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        // 3. Apply supplied fields, tracking whether anything changed.
        let mut changed = false;
        if request.name != wallet.name {
            // A rename must not collide with the owner's other wallets.
            let existing = self
                .wallets
                .get_all()
                .map_err(|e| CoreError::from_repo(ENTITY, e))?;
            if existing
                .iter()
                .any(|w| w.user_id == wallet.user_id && w.id != wallet.id && w.name == request.name)
            {
                return Err(CoreError::Validation(vec![NAME_TAKEN.to_string()]));
            }
            wallet.name = request.name.clone();
            changed = true;
        }
        if let Some(wallet_type) = request.wallet_type {
            if wallet_type != wallet.wallet_type {
                wallet.wallet_type = wallet_type;
                changed = true;
            }
        }
        if let Some(balance) = request.balance {
            if balance != wallet.balance {
                wallet.balance = balance;
                changed = true;
            }
        }

        // 4. Skip the write when nothing changed.
        if !changed {
            tracing::debug!(id = wallet.id, "Wallet update was a no-op");
            return Ok(wallet);
        }

        let updated = self
            .wallets
            .update(&wallet)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = updated.id, "Wallet updated");
        Ok(updated)
    }

    /// Remove a wallet by id.
    pub fn delete_wallet(&self, id: DbId) -> Result<(), CoreError> {
        if id <= 0 {
            return Err(CoreError::Validation(vec![WALLET_ID_INVALID.to_string()]));
        }

        let wallet = self
            .wallets
            .get_by_id(id)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;
        self.wallets
            .delete(wallet.id)
            .map_err(|e| CoreError::from_repo(ENTITY, e))?;

        tracing::info!(id = wallet.id, "Wallet removed");
        Ok(())
    }

    /// All wallets belonging to the account with this email.
    pub fn user_wallets(&self, email: &str) -> Result<UserWallets, CoreError> {
        self.wallets
            .user_wallets(email)
            .map_err(|e| CoreError::from_repo("account", e))
    }
}
