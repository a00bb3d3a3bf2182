//! Collections and the typed-record contract used by the store gateway.

use serde::de::DeserializeOwned;

use inquiry_core::Entity;

/// The two independent collections in the shared keyspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Accounts,
    Customers,
}

impl CollectionKind {
    /// Stable label used in logs and error messages (not the backend collection name).
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKind::Accounts => "accounts",
            CollectionKind::Customers => "customers",
        }
    }
}

impl core::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// A record type that lives in exactly one collection and decodes from its stored JSON document.
pub trait Record: Entity + DeserializeOwned + Send + 'static {
    const COLLECTION: CollectionKind;
}
