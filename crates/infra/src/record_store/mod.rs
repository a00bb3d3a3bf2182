//! Point-lookup record store boundary.
//!
//! This module defines the storage-facing abstraction the gateway reads
//! through, plus its backends: an in-memory map for dev/tests and (behind the
//! `redis` feature) a Redis-backed store.

pub mod in_memory;
#[cfg(feature = "redis")]
pub mod redis_kv;
pub mod r#trait;

pub use in_memory::{InMemoryRecordStore, SeedError, SeedFile};
#[cfg(feature = "redis")]
pub use redis_kv::RedisRecordStore;
pub use r#trait::{Lookup, RecordStore, RecordStoreError};

/// Namespace shared by both collections (`bucket:scope:collection:key`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keyspace {
    pub bucket: String,
    pub scope: String,
}

impl Keyspace {
    pub fn new(bucket: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            scope: scope.into(),
        }
    }

    /// Fully-qualified backend key of a record.
    pub fn qualify(&self, collection: &str, key: &str) -> String {
        format!("{}:{}:{}:{}", self.bucket, self.scope, collection, key)
    }
}

impl Default for Keyspace {
    fn default() -> Self {
        Self::new("inquiry_balance", "master")
    }
}
