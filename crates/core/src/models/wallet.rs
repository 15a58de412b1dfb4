//! Wallet entity and its request/response shapes.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, WalletType};

/// A stored wallet.
///
/// Balances are integer amounts in minor units (cents), so numeric rules
/// compare them exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wallet {
    pub id: DbId,
    pub name: String,
    pub wallet_type: WalletType,
    pub balance: i64,
    pub user_id: DbId,
}

/// Request body for wallet creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWalletRequest {
    pub name: String,
    pub wallet_type: WalletType,
    /// Opening balance in minor units.
    pub balance: i64,
    pub user_id: DbId,
}

/// Request body for a wallet update.
///
/// The wallet id identifies the wallet; `name` always carries the desired
/// name (echo the current one to keep it), while absent optional fields are
/// left untouched and are skipped during validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateWalletRequest {
    pub wallet_id: DbId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_type: Option<WalletType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
}

/// A user's wallets resolved by account email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserWallets {
    pub user_id: DbId,
    pub email: String,
    pub wallets: Vec<Wallet>,
}
