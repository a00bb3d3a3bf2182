use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

/// Interval between readiness probes while waiting for a backend to come up.
const READY_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Result of a single-key point lookup.
///
/// Absence is a normal outcome, not an error, so callers branch on the variant
/// instead of inspecting error text.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

/// Failures of the record store and the typed gateway on top of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordStoreError {
    /// The backend could not be reached (connection refused, dropped, not ready).
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The backend was reached but rejected or failed the command.
    #[error("record store command failed: {0}")]
    Backend(String),

    /// The call did not complete within its bound.
    #[error("record store call timed out after {0:?}")]
    Timeout(Duration),

    /// A stored document does not match the expected record shape (schema drift).
    #[error("failed to decode {collection} record '{key}': {message}")]
    Decode {
        collection: String,
        key: String,
        message: String,
    },
}

impl RecordStoreError {
    pub fn is_decode(&self) -> bool {
        matches!(self, RecordStoreError::Decode { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, RecordStoreError::Timeout(_))
    }
}

/// Raw single-key access to a keyspace split into named collections.
///
/// Implementations hold no per-request state and must be safe to share across
/// concurrent inquiries. Decoding is not their concern: they hand back the
/// stored bytes as-is.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch the document stored under `key` in `collection` (`None` when absent).
    async fn fetch(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, RecordStoreError>;

    /// Round-trip to the backend without touching any record.
    async fn ping(&self) -> Result<(), RecordStoreError>;

    /// Block until the backend answers a ping, for at most `timeout`.
    ///
    /// Run once at startup before the first lookup.
    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), RecordStoreError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match tokio::time::timeout(remaining, self.ping()).await {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => {
                    if Instant::now() + READY_POLL_INTERVAL >= deadline {
                        return Err(RecordStoreError::Unavailable(format!(
                            "not ready within {timeout:?}: {e}"
                        )));
                    }
                    tracing::debug!(error = %e, "record store not ready yet");
                    tokio::time::sleep(READY_POLL_INTERVAL).await;
                }
                Err(_) => return Err(RecordStoreError::Timeout(timeout)),
            }
        }
    }
}

#[async_trait]
impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    async fn fetch(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
        (**self).fetch(collection, key).await
    }

    async fn ping(&self) -> Result<(), RecordStoreError> {
        (**self).ping().await
    }

    async fn wait_until_ready(&self, timeout: Duration) -> Result<(), RecordStoreError> {
        (**self).wait_until_ready(timeout).await
    }
}
