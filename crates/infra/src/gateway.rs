//! Typed record access on top of a [`RecordStore`].
//!
//! The gateway turns raw bytes into records: it resolves which backend
//! collection a record type lives in, bounds every call with a timeout, and
//! reports documents that do not decode as [`RecordStoreError::Decode`]
//! instead of coercing them. It does not validate keys.

use std::time::Duration;

use tracing::instrument;

use inquiry_core::{AccountNumber, OwnerKey};
use inquiry_records::{AccountRecord, CollectionKind, CustomerRecord, Record};

use crate::record_store::{Lookup, RecordStore, RecordStoreError};

/// Default bound for a single store call.
pub const DEFAULT_CALL_TIMEOUT: Duration = Duration::from_secs(5);

/// Backend names of the two collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collections {
    pub accounts: String,
    pub customers: String,
}

impl Collections {
    pub fn name_of(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Accounts => &self.accounts,
            CollectionKind::Customers => &self.customers,
        }
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            accounts: "ddmast".to_string(),
            customers: "cif".to_string(),
        }
    }
}

/// Stateless typed lookups. Cheap to share; holds only the store handle and settings.
#[derive(Debug, Clone)]
pub struct RecordGateway<S> {
    store: S,
    collections: Collections,
    call_timeout: Duration,
}

impl<S> RecordGateway<S>
where
    S: RecordStore,
{
    pub fn new(store: S, collections: Collections, call_timeout: Duration) -> Self {
        Self {
            store,
            collections,
            call_timeout,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch and decode the record of type `R` stored under `key`.
    pub async fn get<R: Record>(&self, key: &R::Id) -> Result<Lookup<R>, RecordStoreError> {
        let collection = self.collections.name_of(R::COLLECTION);
        let key: &str = key.as_ref();

        let fetched = tokio::time::timeout(self.call_timeout, self.store.fetch(collection, key))
            .await
            .map_err(|_| RecordStoreError::Timeout(self.call_timeout))??;

        let Some(doc) = fetched else {
            return Ok(Lookup::NotFound);
        };

        serde_json::from_slice::<R>(&doc)
            .map(Lookup::Found)
            .map_err(|e| RecordStoreError::Decode {
                collection: R::COLLECTION.label().to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })
    }

    #[instrument(skip(self, account_number), fields(account = %account_number))]
    pub async fn get_account(&self, account_number: &AccountNumber) -> Result<Lookup<AccountRecord>, RecordStoreError> {
        self.get::<AccountRecord>(account_number).await
    }

    #[instrument(skip(self, owner_key), fields(cif = %owner_key))]
    pub async fn get_customer(&self, owner_key: &OwnerKey) -> Result<Lookup<CustomerRecord>, RecordStoreError> {
        self.get::<CustomerRecord>(owner_key).await
    }
}
