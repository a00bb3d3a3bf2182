//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// A value object has no key of its own; it only exists embedded in a record
/// (a customer's postal address, for instance) and two instances with the same
/// attributes are the same value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Address { city: String, country: String }
///
/// impl ValueObject for Address {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
