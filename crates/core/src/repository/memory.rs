//! In-memory repositories for tests and lightweight embedders.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{RepoError, Repository, WalletRepository};
use crate::models::wallet::{UserWallets, Wallet};
use crate::types::DbId;

const LOCK_POISONED: &str = "record store lock poisoned";

/// Thread-safe in-memory store keyed by id.
///
/// Records are introspected through serde, so any entity whose serialized
/// form is an object with an integer `id` field can be stored. Ids are
/// assigned on create; an id on the incoming entity is overwritten.
///
/// Write counters and failure injection exist for tests that assert on
/// persistence behavior (no-op updates, backend errors during lookups).
pub struct InMemoryRepository<T> {
    records: RwLock<BTreeMap<DbId, T>>,
    next_id: AtomicI64,
    failure: RwLock<Option<String>>,
    created: AtomicUsize,
    updated: AtomicUsize,
    deleted: AtomicUsize,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
            failure: RwLock::new(None),
            created: AtomicUsize::new(0),
            updated: AtomicUsize::new(0),
            deleted: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent call fail with a backend error carrying
    /// `message`, until [`clear_failure`](Self::clear_failure).
    pub fn fail_with(&self, message: &str) {
        if let Ok(mut slot) = self.failure.write() {
            *slot = Some(message.to_string());
        }
    }

    pub fn clear_failure(&self) {
        if let Ok(mut slot) = self.failure.write() {
            *slot = None;
        }
    }

    /// Number of successful `create` calls.
    pub fn created_count(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Number of successful `update` calls.
    pub fn updated_count(&self) -> usize {
        self.updated.load(Ordering::SeqCst)
    }

    /// Number of successful `delete` calls.
    pub fn deleted_count(&self) -> usize {
        self.deleted.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), RepoError> {
        match self.failure.read() {
            Ok(slot) => match slot.as_ref() {
                Some(message) => Err(RepoError::Backend(message.clone())),
                None => Ok(()),
            },
            Err(_) => Err(RepoError::Backend(LOCK_POISONED.to_string())),
        }
    }

    fn read_records(&self) -> Result<RwLockReadGuard<'_, BTreeMap<DbId, T>>, RepoError> {
        self.records
            .read()
            .map_err(|_| RepoError::Backend(LOCK_POISONED.to_string()))
    }

    fn write_records(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<DbId, T>>, RepoError> {
        self.records
            .write()
            .map_err(|_| RepoError::Backend(LOCK_POISONED.to_string()))
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize the entity, overwrite its `id` field, and rebuild it.
fn with_id<T>(entity: &T, id: DbId) -> Result<T, RepoError>
where
    T: Serialize + DeserializeOwned,
{
    let mut data = match serde_json::to_value(entity) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(RepoError::Backend(
                "entity must serialize to an object".to_string(),
            ))
        }
        Err(e) => return Err(RepoError::Backend(e.to_string())),
    };
    data.insert("id".to_string(), Value::from(id));
    serde_json::from_value(Value::Object(data)).map_err(|e| RepoError::Backend(e.to_string()))
}

/// Read the entity's `id` field through its serialized form.
fn entity_id<T: Serialize>(entity: &T) -> Result<DbId, RepoError> {
    let data = serde_json::to_value(entity).map_err(|e| RepoError::Backend(e.to_string()))?;
    data.get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| RepoError::Backend("entity has no integer id field".to_string()))
}

impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn create(&self, entity: &T) -> Result<T, RepoError> {
        self.check_failure()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let stored = with_id(entity, id)?;
        let mut records = self.write_records()?;
        records.insert(id, stored.clone());
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(stored)
    }

    fn get_by_id(&self, id: DbId) -> Result<T, RepoError> {
        self.check_failure()?;
        let records = self.read_records()?;
        records.get(&id).cloned().ok_or(RepoError::NotFound)
    }

    fn get_all(&self) -> Result<Vec<T>, RepoError> {
        self.check_failure()?;
        let records = self.read_records()?;
        Ok(records.values().cloned().collect())
    }

    fn update(&self, entity: &T) -> Result<T, RepoError> {
        self.check_failure()?;
        let id = entity_id(entity)?;
        let mut records = self.write_records()?;
        if !records.contains_key(&id) {
            return Err(RepoError::NotFound);
        }
        records.insert(id, entity.clone());
        self.updated.fetch_add(1, Ordering::SeqCst);
        Ok(entity.clone())
    }

    fn delete(&self, id: DbId) -> Result<(), RepoError> {
        self.check_failure()?;
        let mut records = self.write_records()?;
        match records.remove(&id) {
            Some(_) => {
                self.deleted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            None => Err(RepoError::NotFound),
        }
    }

    fn find_by_field(&self, field: &str, value: &Value) -> Result<T, RepoError> {
        self.check_failure()?;
        let records = self.read_records()?;
        for record in records.values() {
            let data =
                serde_json::to_value(record).map_err(|e| RepoError::Backend(e.to_string()))?;
            if data.get(field) == Some(value) {
                return Ok(record.clone());
            }
        }
        Err(RepoError::NotFound)
    }
}

/// In-memory wallet store with the by-email wallet view.
///
/// Wallets are linked to accounts through an email-to-owner mapping that
/// embedders register as accounts come into existence.
pub struct InMemoryWalletRepository {
    wallets: InMemoryRepository<Wallet>,
    owners: RwLock<BTreeMap<String, DbId>>,
}

impl InMemoryWalletRepository {
    pub fn new() -> Self {
        Self {
            wallets: InMemoryRepository::new(),
            owners: RwLock::new(BTreeMap::new()),
        }
    }

    /// Register the owning account for email resolution.
    pub fn register_owner(&self, email: &str, user_id: DbId) -> Result<(), RepoError> {
        let mut owners = self
            .owners
            .write()
            .map_err(|_| RepoError::Backend(LOCK_POISONED.to_string()))?;
        owners.insert(email.to_string(), user_id);
        Ok(())
    }

    /// The underlying store, for write counters and failure injection.
    pub fn store(&self) -> &InMemoryRepository<Wallet> {
        &self.wallets
    }
}

impl Default for InMemoryWalletRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository<Wallet> for InMemoryWalletRepository {
    fn create(&self, entity: &Wallet) -> Result<Wallet, RepoError> {
        self.wallets.create(entity)
    }

    fn get_by_id(&self, id: DbId) -> Result<Wallet, RepoError> {
        self.wallets.get_by_id(id)
    }

    fn get_all(&self) -> Result<Vec<Wallet>, RepoError> {
        self.wallets.get_all()
    }

    fn update(&self, entity: &Wallet) -> Result<Wallet, RepoError> {
        self.wallets.update(entity)
    }

    fn delete(&self, id: DbId) -> Result<(), RepoError> {
        self.wallets.delete(id)
    }

    fn find_by_field(&self, field: &str, value: &Value) -> Result<Wallet, RepoError> {
        self.wallets.find_by_field(field, value)
    }
}

impl WalletRepository for InMemoryWalletRepository {
    fn user_wallets(&self, email: &str) -> Result<UserWallets, RepoError> {
        let owners = self
            .owners
            .read()
            .map_err(|_| RepoError::Backend(LOCK_POISONED.to_string()))?;
        let user_id = owners.get(email).copied().ok_or(RepoError::NotFound)?;
        let wallets = self
            .wallets
            .get_all()?
            .into_iter()
            .filter(|w| w.user_id == user_id)
            .collect();
        Ok(UserWallets {
            user_id,
            email: email.to_string(),
            wallets,
        })
    }
}
