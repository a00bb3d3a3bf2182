//! Balance inquiry orchestration (account lookup, then owner enrichment).
//!
//! ```text
//! account id
//!   ↓
//! 1. Validate (blank → InvalidInput, no store call)
//!   ↓
//! 2. Account lookup ── NotFound → NotFound
//!   ↓               └─ store/decode failure → Error
//! 3. Customer lookup by the account's `cif`
//!   ├─ Found → Success (account + customer)
//!   └─ anything else → PartialSuccess (account only)
//! ```
//!
//! The account is the resource the caller asked for; the customer is
//! enrichment. A failed enrichment degrades the answer and never fails it,
//! whatever the failure kind. Each stage runs exactly once; there are no
//! retries and no state survives between inquiries.

use tracing::{Instrument, debug, error, info_span, warn};
use uuid::Uuid;

use inquiry_core::AccountNumber;
use inquiry_records::{AccountRecord, CustomerRecord};

use crate::gateway::RecordGateway;
use crate::record_store::{Lookup, RecordStore, RecordStoreError};

/// Outcome classification, independent of the records carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Success,
    PartialSuccess,
    NotFound,
    InvalidInput,
    Error,
}

/// Why the customer half of a partial success is missing.
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerGap {
    /// The account's owner key has no customer record.
    NotFound,
    /// The customer lookup failed (unavailable, timeout, undecodable record).
    Failed(RecordStoreError),
}

/// Result of one inquiry.
///
/// Variants only hold the records they are allowed to carry: a customer never
/// appears without its account, and `NotFound` carries neither.
#[derive(Debug, Clone, PartialEq)]
pub enum InquiryOutcome {
    Success {
        account: AccountRecord,
        customer: CustomerRecord,
    },
    PartialSuccess {
        account: AccountRecord,
        customer_gap: CustomerGap,
    },
    NotFound {
        account_number: AccountNumber,
    },
    InvalidInput {
        reason: String,
    },
    Error {
        cause: RecordStoreError,
    },
}

impl InquiryOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            InquiryOutcome::Success { .. } => OutcomeKind::Success,
            InquiryOutcome::PartialSuccess { .. } => OutcomeKind::PartialSuccess,
            InquiryOutcome::NotFound { .. } => OutcomeKind::NotFound,
            InquiryOutcome::InvalidInput { .. } => OutcomeKind::InvalidInput,
            InquiryOutcome::Error { .. } => OutcomeKind::Error,
        }
    }

    pub fn account(&self) -> Option<&AccountRecord> {
        match self {
            InquiryOutcome::Success { account, .. } | InquiryOutcome::PartialSuccess { account, .. } => {
                Some(account)
            }
            _ => None,
        }
    }

    pub fn customer(&self) -> Option<&CustomerRecord> {
        match self {
            InquiryOutcome::Success { customer, .. } => Some(customer),
            _ => None,
        }
    }

    /// Human-readable summary suitable for a response message.
    pub fn message(&self) -> &'static str {
        match self {
            InquiryOutcome::Success { .. } => "Success",
            InquiryOutcome::PartialSuccess { .. } => "Account found but customer data unavailable",
            InquiryOutcome::NotFound { .. } => "Account not found",
            InquiryOutcome::InvalidInput { .. } => "Account number is required",
            InquiryOutcome::Error { .. } => "Internal server error while retrieving account data",
        }
    }

    /// Diagnostic text for failures (never set for successful outcomes).
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            InquiryOutcome::InvalidInput { reason } => Some(reason.clone()),
            InquiryOutcome::Error { cause } => Some(cause.to_string()),
            _ => None,
        }
    }
}

/// Drives the two-stage lookup through a [`RecordGateway`].
///
/// Holds the shared store handle read-only; any number of inquiries may run
/// against one orchestrator concurrently.
#[derive(Debug, Clone)]
pub struct InquiryOrchestrator<S> {
    gateway: RecordGateway<S>,
}

impl<S> InquiryOrchestrator<S>
where
    S: RecordStore,
{
    pub fn new(gateway: RecordGateway<S>) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &RecordGateway<S> {
        &self.gateway
    }

    /// Resolve `account_id` to its account and, when possible, its owner.
    ///
    /// Never fails: every path ends in a classified [`InquiryOutcome`].
    pub async fn inquire(&self, account_id: &str) -> InquiryOutcome {
        let span = info_span!(
            "inquiry",
            inquiry_id = %Uuid::now_v7(),
            account = %account_id.trim(),
            outcome = tracing::field::Empty,
        );

        async {
            let outcome = self.run(account_id).await;
            tracing::Span::current().record("outcome", tracing::field::debug(outcome.kind()));
            outcome
        }
        .instrument(span)
        .await
    }

    async fn run(&self, account_id: &str) -> InquiryOutcome {
        let account_number = match AccountNumber::parse(account_id) {
            Ok(n) => n,
            Err(e) => {
                debug!("rejected blank account id");
                return InquiryOutcome::InvalidInput { reason: e.to_string() };
            }
        };

        let account = match self.gateway.get_account(&account_number).await {
            Ok(Lookup::Found(account)) => account,
            Ok(Lookup::NotFound) => {
                debug!("account not found");
                return InquiryOutcome::NotFound { account_number };
            }
            Err(cause) => {
                if cause.is_decode() {
                    error!(error = %cause, schema_drift = true, "stored account does not match record shape");
                } else {
                    error!(error = %cause, "account lookup failed");
                }
                return InquiryOutcome::Error { cause };
            }
        };

        let owner_key = account.owner_key().clone();
        if owner_key.as_str().trim().is_empty() {
            warn!("account has no owner key; skipping customer lookup");
            return InquiryOutcome::PartialSuccess {
                account,
                customer_gap: CustomerGap::NotFound,
            };
        }

        match self.gateway.get_customer(&owner_key).await {
            Ok(Lookup::Found(customer)) => InquiryOutcome::Success { account, customer },
            Ok(Lookup::NotFound) => {
                warn!(cif = %owner_key, "customer record missing for account owner");
                InquiryOutcome::PartialSuccess {
                    account,
                    customer_gap: CustomerGap::NotFound,
                }
            }
            Err(cause) => {
                if cause.is_decode() {
                    error!(cif = %owner_key, error = %cause, schema_drift = true, "stored customer does not match record shape");
                } else {
                    warn!(cif = %owner_key, error = %cause, "customer lookup failed; returning account only");
                }
                InquiryOutcome::PartialSuccess {
                    account,
                    customer_gap: CustomerGap::Failed(cause),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::gateway::{Collections, DEFAULT_CALL_TIMEOUT};
    use crate::record_store::InMemoryRecordStore;
    use crate::test_fixtures::{account, customer};

    fn orchestrator<S: RecordStore>(store: S) -> InquiryOrchestrator<S> {
        InquiryOrchestrator::new(RecordGateway::new(store, Collections::default(), DEFAULT_CALL_TIMEOUT))
    }

    fn seeded() -> Arc<InMemoryRecordStore> {
        let store = Arc::new(InMemoryRecordStore::new());
        store.insert_json("ddmast", "ACC001", &account("ACC001", "CIF001")).unwrap();
        store.insert_json("cif", "CIF001", &customer("CIF001")).unwrap();
        store.insert_json("ddmast", "ACC002", &account("ACC002", "CIF999")).unwrap();
        store
    }

    /// Serves accounts from an inner store; every customer lookup fails with `error`.
    struct FailingCustomers {
        inner: Arc<InMemoryRecordStore>,
        error: RecordStoreError,
    }

    #[async_trait]
    impl RecordStore for FailingCustomers {
        async fn fetch(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
            if collection == "cif" {
                return Err(self.error.clone());
            }
            self.inner.fetch(collection, key).await
        }

        async fn ping(&self) -> Result<(), RecordStoreError> {
            Ok(())
        }
    }

    /// Every call fails as if the backend were down.
    struct DownStore {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordStore for DownStore {
        async fn fetch(&self, _c: &str, _k: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(RecordStoreError::Unavailable("connection refused".into()))
        }

        async fn ping(&self) -> Result<(), RecordStoreError> {
            Err(RecordStoreError::Unavailable("connection refused".into()))
        }
    }

    struct SetOnDrop(Arc<AtomicBool>);

    impl Drop for SetOnDrop {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    /// Never answers; flags when its in-flight call is dropped.
    struct HangingStore {
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl RecordStore for HangingStore {
        async fn fetch(&self, _c: &str, _k: &str) -> Result<Option<Vec<u8>>, RecordStoreError> {
            let _guard = SetOnDrop(self.dropped.clone());
            std::future::pending().await
        }

        async fn ping(&self) -> Result<(), RecordStoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn blank_ids_are_rejected_without_store_calls() {
        let store = seeded();
        let o = orchestrator(store.clone());

        for raw in ["", " ", "\t\n"] {
            let outcome = o.inquire(raw).await;
            assert_eq!(outcome.kind(), OutcomeKind::InvalidInput);
            assert!(outcome.account().is_none());
        }
        assert_eq!(store.fetch_count(), 0);
    }

    #[tokio::test]
    async fn both_records_found_is_success() {
        let o = orchestrator(seeded());
        let outcome = o.inquire("ACC001").await;

        assert_eq!(outcome.kind(), OutcomeKind::Success);
        let account = outcome.account().unwrap();
        let customer = outcome.customer().unwrap();
        assert_eq!(account.account_number.as_str(), "ACC001");
        assert_eq!(customer.cif.as_str(), "CIF001");
        assert_eq!(customer.cif, account.cif);
        assert_eq!(outcome.message(), "Success");
    }

    #[tokio::test]
    async fn missing_owner_is_partial_success() {
        let store = seeded();
        let o = orchestrator(store.clone());
        let outcome = o.inquire("ACC002").await;

        assert_eq!(outcome.kind(), OutcomeKind::PartialSuccess);
        assert_eq!(outcome.account().unwrap().cif.as_str(), "CIF999");
        assert!(outcome.customer().is_none());
        assert!(matches!(
            outcome,
            InquiryOutcome::PartialSuccess { customer_gap: CustomerGap::NotFound, .. }
        ));
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn blank_owner_key_skips_customer_lookup() {
        let store = seeded();
        store.insert_json("ddmast", "ACC009", &account("ACC009", "")).unwrap();
        store.insert_json("ddmast", "ACC010", &account("ACC010", "   ")).unwrap();
        let o = orchestrator(store.clone());

        let outcome = o.inquire("ACC009").await;
        assert!(matches!(
            outcome,
            InquiryOutcome::PartialSuccess { customer_gap: CustomerGap::NotFound, .. }
        ));
        assert_eq!(store.fetch_count(), 1);

        let outcome = o.inquire("ACC010").await;
        assert_eq!(outcome.kind(), OutcomeKind::PartialSuccess);
        assert_eq!(store.fetch_count(), 2);
    }

    #[tokio::test]
    async fn missing_account_is_not_found_and_skips_customer_lookup() {
        let store = seeded();
        let o = orchestrator(store.clone());
        let outcome = o.inquire("MISSING").await;

        assert_eq!(outcome.kind(), OutcomeKind::NotFound);
        assert!(outcome.account().is_none());
        assert!(outcome.customer().is_none());
        assert_eq!(store.fetch_count(), 1);
    }

    #[tokio::test]
    async fn account_ids_are_trimmed_before_lookup() {
        let o = orchestrator(seeded());
        assert_eq!(o.inquire("  ACC001 ").await.kind(), OutcomeKind::Success);
    }

    #[tokio::test]
    async fn unavailable_store_on_account_lookup_is_error() {
        let store = DownStore { calls: AtomicUsize::new(0) };
        let o = orchestrator(store);
        let outcome = o.inquire("ACC001").await;

        assert_eq!(outcome.kind(), OutcomeKind::Error);
        assert!(outcome.account().is_none());
        assert!(outcome.diagnostic().unwrap().contains("connection refused"));
        // no retries
        assert_eq!(o.gateway().store().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn undecodable_account_is_error() {
        let store = seeded();
        store.insert_raw("ddmast", "ACC003", b"{\"account_number\":\"ACC003\"}".to_vec());
        let outcome = orchestrator(store).inquire("ACC003").await;

        match outcome {
            InquiryOutcome::Error { cause } => assert!(cause.is_decode()),
            other => panic!("expected Error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn any_customer_failure_degrades_to_partial_success() {
        let failures = [
            RecordStoreError::Unavailable("down".into()),
            RecordStoreError::Timeout(Duration::from_millis(5)),
            RecordStoreError::Decode {
                collection: "customers".into(),
                key: "CIF001".into(),
                message: "missing field `full_name`".into(),
            },
        ];

        for error in failures {
            let store = FailingCustomers {
                inner: seeded(),
                error: error.clone(),
            };
            let outcome = orchestrator(store).inquire("ACC001").await;

            assert_eq!(outcome.kind(), OutcomeKind::PartialSuccess);
            assert!(outcome.customer().is_none());
            assert!(outcome.diagnostic().is_none());
            assert_eq!(
                outcome,
                InquiryOutcome::PartialSuccess {
                    account: account("ACC001", "CIF001"),
                    customer_gap: CustomerGap::Failed(error),
                }
            );
        }
    }

    #[tokio::test]
    async fn repeated_inquiries_are_identical() {
        let o = orchestrator(seeded());
        for id in ["ACC001", "ACC002", "MISSING", ""] {
            assert_eq!(o.inquire(id).await, o.inquire(id).await);
        }
    }

    #[tokio::test]
    async fn dropping_an_inquiry_drops_its_store_call() {
        let dropped = Arc::new(AtomicBool::new(false));
        let o = orchestrator(HangingStore { dropped: dropped.clone() });

        let res = tokio::time::timeout(Duration::from_millis(20), o.inquire("ACC001")).await;

        assert!(res.is_err());
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn concurrent_inquiries_share_one_store() {
        let o = Arc::new(orchestrator(seeded()));
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let o = o.clone();
                tokio::spawn(async move {
                    let id = if i % 2 == 0 { "ACC001" } else { "ACC002" };
                    o.inquire(id).await.kind()
                })
            })
            .collect();

        for (i, h) in handles.into_iter().enumerate() {
            let expected = if i % 2 == 0 { OutcomeKind::Success } else { OutcomeKind::PartialSuccess };
            assert_eq!(h.await.unwrap(), expected);
        }
        assert_eq!(o.gateway().store().fetch_count(), 32);
    }
}
