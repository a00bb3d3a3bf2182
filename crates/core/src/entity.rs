//! Entity trait: records that are addressed by a store key.

/// A record with a stable identity inside its collection.
///
/// The identifier doubles as the point-lookup key, so it must render as the
/// exact string the backend stores the record under.
pub trait Entity {
    /// Strongly-typed key.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + AsRef<str>;

    /// Returns the key this record is stored under.
    fn id(&self) -> &Self::Id;
}
