//! Configuration loading and representation.
//!
//! Everything is read from environment variables; every variable is optional
//! and falls back to a development default.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::gateway::{Collections, DEFAULT_CALL_TIMEOUT};
use crate::record_store::Keyspace;

/// Default bound for the startup readiness wait.
pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var} ({value:?}): {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Which backend serves record lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Redis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InquiryConfig {
    pub bind_addr: SocketAddr,
    pub backend: StoreBackend,
    pub redis_url: String,
    pub keyspace: Keyspace,
    pub collections: Collections,
    /// Bound applied to every individual store call.
    pub call_timeout: Duration,
    /// Bound for the one-time readiness wait at startup.
    pub ready_timeout: Duration,
    /// JSON fixture loaded into the in-memory backend.
    pub seed_file: Option<PathBuf>,
}

impl Default for InquiryConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            backend: StoreBackend::Memory,
            redis_url: "redis://localhost:6379".to_string(),
            keyspace: Keyspace::default(),
            collections: Collections::default(),
            call_timeout: DEFAULT_CALL_TIMEOUT,
            ready_timeout: DEFAULT_READY_TIMEOUT,
            seed_file: None,
        }
    }
}

impl InquiryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut cfg = Self::default();

        if let Some(v) = get("BIND_ADDR") {
            cfg.bind_addr = v.parse().map_err(|e: std::net::AddrParseError| invalid("BIND_ADDR", &v, e))?;
        }

        if let Some(v) = get("STORE_BACKEND") {
            cfg.backend = match v.to_lowercase().as_str() {
                "memory" => StoreBackend::Memory,
                "redis" => StoreBackend::Redis,
                _ => return Err(invalid("STORE_BACKEND", &v, "expected one of: memory, redis")),
            };
        }

        if let Some(v) = get("REDIS_URL") {
            cfg.redis_url = v;
        }
        if let Some(v) = get("STORE_BUCKET") {
            cfg.keyspace.bucket = v;
        }
        if let Some(v) = get("STORE_SCOPE") {
            cfg.keyspace.scope = v;
        }
        if let Some(v) = get("ACCOUNTS_COLLECTION") {
            cfg.collections.accounts = v;
        }
        if let Some(v) = get("CUSTOMERS_COLLECTION") {
            cfg.collections.customers = v;
        }
        if let Some(v) = get("STORE_TIMEOUT_MS") {
            cfg.call_timeout = parse_millis("STORE_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = get("STORE_READY_TIMEOUT_MS") {
            cfg.ready_timeout = parse_millis("STORE_READY_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = get("SEED_FILE") {
            cfg.seed_file = Some(PathBuf::from(v));
        }

        if cfg.collections.accounts == cfg.collections.customers {
            return Err(invalid(
                "CUSTOMERS_COLLECTION",
                &cfg.collections.customers,
                "must differ from ACCOUNTS_COLLECTION",
            ));
        }

        Ok(cfg)
    }
}

fn parse_millis(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let ms: u64 = value.parse().map_err(|e: std::num::ParseIntError| invalid(var, value, e))?;
    if ms == 0 {
        return Err(invalid(var, value, "must be greater than zero"));
    }
    Ok(Duration::from_millis(ms))
}

fn invalid(var: &'static str, value: &str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
