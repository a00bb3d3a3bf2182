use std::sync::Arc;

use thiserror::Error;

use inquiry_infra::config::{InquiryConfig, StoreBackend};
use inquiry_infra::record_store::{InMemoryRecordStore, RecordStore, RecordStoreError, SeedError};
use inquiry_infra::{InquiryOrchestrator, RecordGateway};

#[cfg(feature = "redis")]
use inquiry_infra::record_store::RedisRecordStore;

/// Process-wide store handle; built once at startup and shared by every request.
pub type SharedStore = Arc<dyn RecordStore>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to seed in-memory store: {0}")]
    Seed(#[from] SeedError),

    #[error("record store not usable: {0}")]
    Store(#[from] RecordStoreError),
}

/// Everything request handlers need, shared behind an `Arc`.
pub struct AppServices {
    orchestrator: InquiryOrchestrator<SharedStore>,
    backend: StoreBackend,
}

impl AppServices {
    pub fn new(store: SharedStore, backend: StoreBackend, config: &InquiryConfig) -> Self {
        let gateway = RecordGateway::new(store, config.collections.clone(), config.call_timeout);
        Self {
            orchestrator: InquiryOrchestrator::new(gateway),
            backend,
        }
    }

    pub fn orchestrator(&self) -> &InquiryOrchestrator<SharedStore> {
        &self.orchestrator
    }

    pub fn backend(&self) -> StoreBackend {
        self.backend
    }
}

pub async fn build_services(config: &InquiryConfig) -> Result<AppServices, ServiceError> {
    match config.backend {
        StoreBackend::Redis => {
            #[cfg(feature = "redis")]
            {
                return build_redis_services(config).await;
            }
            #[cfg(not(feature = "redis"))]
            {
                tracing::warn!("STORE_BACKEND=redis but redis feature not enabled, falling back to in-memory");
            }
        }
        StoreBackend::Memory => {}
    }

    build_in_memory_services(config).await
}

async fn build_in_memory_services(config: &InquiryConfig) -> Result<AppServices, ServiceError> {
    let store = match &config.seed_file {
        Some(path) => InMemoryRecordStore::load_seed_file(path, &config.collections).await?,
        None => {
            tracing::warn!("SEED_FILE not set; in-memory record store starts empty");
            InMemoryRecordStore::new()
        }
    };

    let store: SharedStore = Arc::new(store);
    store.wait_until_ready(config.ready_timeout).await?;
    Ok(AppServices::new(store, StoreBackend::Memory, config))
}

#[cfg(feature = "redis")]
async fn build_redis_services(config: &InquiryConfig) -> Result<AppServices, ServiceError> {
    let connect = RedisRecordStore::connect(&config.redis_url, config.keyspace.clone());
    let store = tokio::time::timeout(config.ready_timeout, connect)
        .await
        .map_err(|_| RecordStoreError::Timeout(config.ready_timeout))??;

    let store: SharedStore = Arc::new(store);
    store.wait_until_ready(config.ready_timeout).await?;

    tracing::info!(
        bucket = %config.keyspace.bucket,
        scope = %config.keyspace.scope,
        "connected to redis record store"
    );
    Ok(AppServices::new(store, StoreBackend::Redis, config))
}
