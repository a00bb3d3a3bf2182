//! Infrastructure layer: record store backends, typed gateway, inquiry orchestration, config.

pub mod config;
pub mod gateway;
pub mod inquiry;
pub mod record_store;

pub use gateway::{Collections, RecordGateway};
pub use inquiry::{CustomerGap, InquiryOrchestrator, InquiryOutcome, OutcomeKind};
pub use record_store::{InMemoryRecordStore, Keyspace, Lookup, RecordStore, RecordStoreError};

#[cfg(test)]
mod integration_tests;
