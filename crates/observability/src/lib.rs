//! Tracing and logging setup shared by the service binary and tests.

/// Initialize process-wide structured logging.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_DIRECTIVE);
}

/// Subscriber construction (filters, formatting).
pub mod tracing;
