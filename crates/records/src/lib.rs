//! Stored record shapes for balance inquiries (accounts and their owning customers).
//!
//! This crate only describes what the backend stores. Records are read-only
//! here: they are written by an upstream core-banking feed, never by this service.

pub mod account;
pub mod collection;
pub mod customer;

pub use account::AccountRecord;
pub use collection::{CollectionKind, Record};
pub use customer::{Address, CustomerRecord};
