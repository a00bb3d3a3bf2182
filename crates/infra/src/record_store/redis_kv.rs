//! Redis-backed record store (optional).
//!
//! Each record is a JSON document stored as a plain string value under
//! `bucket:scope:collection:key`, read with a single `GET`. One multiplexed
//! connection is opened at startup and shared by every in-flight inquiry;
//! cloning it only clones a handle to the same pipeline.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tracing::instrument;

use super::Keyspace;
use super::r#trait::{RecordStore, RecordStoreError};

#[derive(Clone)]
pub struct RedisRecordStore {
    conn: MultiplexedConnection,
    keyspace: Keyspace,
}

impl core::fmt::Debug for RedisRecordStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RedisRecordStore")
            .field("keyspace", &self.keyspace)
            .finish_non_exhaustive()
    }
}

impl RedisRecordStore {
    /// Open the shared connection.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://localhost:6379")
    /// * `keyspace` - bucket/scope prefix applied to every key
    pub async fn connect(redis_url: impl AsRef<str>, keyspace: Keyspace) -> Result<Self, RecordStoreError> {
        let client = redis::Client::open(redis_url.as_ref())
            .map_err(|e| RecordStoreError::Unavailable(e.to_string()))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(classify)?;

        Ok(Self { conn, keyspace })
    }
}

#[async_trait]
impl RecordStore for RedisRecordStore {
    #[instrument(skip(self), fields(bucket = %self.keyspace.bucket))]
    async fn fetch(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
        let mut conn = self.conn.clone();
        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(self.keyspace.qualify(collection, key))
            .query_async(&mut conn)
            .await
            .map_err(classify)?;
        Ok(value)
    }

    async fn ping(&self) -> Result<(), RecordStoreError> {
        let mut conn = self.conn.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await.map_err(classify)?;
        Ok(())
    }
}

/// Split transport failures (worth an "unavailable") from command failures.
fn classify(e: redis::RedisError) -> RecordStoreError {
    if e.kind() == redis::ErrorKind::IoError
        || e.is_io_error()
        || e.is_connection_refusal()
        || e.is_connection_dropped()
        || e.is_timeout()
    {
        RecordStoreError::Unavailable(e.to_string())
    } else {
        RecordStoreError::Backend(e.to_string())
    }
}
