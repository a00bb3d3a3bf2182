//! JSON log output filtered by `RUST_LOG`.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable.
///
/// HTTP access logs from `tower_http` stay at `info`; the noisy per-connection
/// logs of the Redis client are kept at `warn`.
pub const DEFAULT_DIRECTIVE: &str = "info,tower_http=info,redis=warn";

/// Install the global subscriber with `fallback` as the default filter.
///
/// Returns `false` when a subscriber was already installed.
pub fn init(fallback: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init()
        .is_ok()
}
