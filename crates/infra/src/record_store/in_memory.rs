use std::collections::HashMap;
use std::path::Path;
use std::sync::{PoisonError, RwLock};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inquiry_records::{AccountRecord, CustomerRecord};

use super::r#trait::{RecordStore, RecordStoreError};
use crate::gateway::Collections;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DocKey {
    collection: String,
    key: String,
}

/// In-memory record store.
///
/// Intended for tests/dev. Counts `fetch` calls so callers can assert how many
/// lookups an operation performed.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    docs: RwLock<HashMap<DocKey, Vec<u8>>>,
    fetches: AtomicUsize,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw bytes under `key` (overwrites).
    pub fn insert_raw(&self, collection: impl Into<String>, key: impl Into<String>, doc: Vec<u8>) {
        let mut docs = self.docs.write().unwrap_or_else(PoisonError::into_inner);
        docs.insert(
            DocKey {
                collection: collection.into(),
                key: key.into(),
            },
            doc,
        );
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn insert_json<T: Serialize>(
        &self,
        collection: impl Into<String>,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        let doc = serde_json::to_vec(value)?;
        self.insert_raw(collection, key, doc);
        Ok(())
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().unwrap_or_else(PoisonError::into_inner).is_empty()
    }

    /// Build a store pre-populated from a seed, keyed by each record's own identifier.
    pub fn from_seed(seed: &SeedFile, collections: &Collections) -> Result<Self, SeedError> {
        let store = Self::new();
        for account in &seed.accounts {
            store.insert_json(&collections.accounts, account.account_number.as_str(), account)?;
        }
        for customer in &seed.customers {
            store.insert_json(&collections.customers, customer.cif.as_str(), customer)?;
        }
        Ok(store)
    }

    /// Read a JSON seed file and build a store from it.
    pub async fn load_seed_file(path: &Path, collections: &Collections) -> Result<Self, SeedError> {
        let raw = tokio::fs::read(path).await.map_err(|e| SeedError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let seed: SeedFile = serde_json::from_slice(&raw)?;
        let store = Self::from_seed(&seed, collections)?;
        tracing::info!(
            path = %path.display(),
            accounts = seed.accounts.len(),
            customers = seed.customers.len(),
            "seeded in-memory record store"
        );
        Ok(store)
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn fetch(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let docs = self.docs.read().unwrap_or_else(PoisonError::into_inner);

        Ok(docs
            .get(&DocKey {
                collection: collection.to_string(),
                key: key.to_string(),
            })
            .cloned())
    }

    async fn ping(&self) -> Result<(), RecordStoreError> {
        Ok(())
    }
}

/// Dev fixture format: `{"accounts": [...], "customers": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub customers: Vec<CustomerRecord>,
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read seed file {path}: {message}")]
    Io { path: String, message: String },

    #[error("invalid seed document: {0}")]
    Json(#[from] serde_json::Error),
}
