//! End-to-end inquiries against the dev fixture.
//!
//! Tests: seed file → InMemoryRecordStore → RecordGateway → InquiryOrchestrator

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use crate::gateway::{Collections, DEFAULT_CALL_TIMEOUT, RecordGateway};
    use crate::inquiry::{InquiryOrchestrator, OutcomeKind};
    use crate::record_store::InMemoryRecordStore;

    const SEED: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../fixtures/seed.json");

    async fn setup(collections: Collections) -> (InquiryOrchestrator<Arc<InMemoryRecordStore>>, Arc<InMemoryRecordStore>) {
        let store = Arc::new(
            InMemoryRecordStore::load_seed_file(Path::new(SEED), &collections)
                .await
                .expect("fixture should load"),
        );
        let gateway = RecordGateway::new(store.clone(), collections, DEFAULT_CALL_TIMEOUT);
        (InquiryOrchestrator::new(gateway), store)
    }

    #[tokio::test]
    async fn fixture_scenarios() {
        let (o, store) = setup(Collections::default()).await;

        let ok = o.inquire("ACC001").await;
        assert_eq!(ok.kind(), OutcomeKind::Success);
        assert_eq!(ok.account().unwrap().account_number.as_str(), "ACC001");
        assert_eq!(ok.customer().unwrap().cif.as_str(), "CIF001");

        let partial = o.inquire("ACC002").await;
        assert_eq!(partial.kind(), OutcomeKind::PartialSuccess);
        assert_eq!(partial.account().unwrap().cif.as_str(), "CIF999");
        assert!(partial.customer().is_none());

        assert_eq!(o.inquire("MISSING").await.kind(), OutcomeKind::NotFound);

        let before = store.fetch_count();
        assert_eq!(o.inquire("").await.kind(), OutcomeKind::InvalidInput);
        assert_eq!(store.fetch_count(), before);
    }

    #[tokio::test]
    async fn fixture_honours_custom_collection_names() {
        let collections = Collections {
            accounts: "accounts_v2".to_string(),
            customers: "customers_v2".to_string(),
        };
        let (o, _store) = setup(collections).await;

        assert_eq!(o.inquire("ACC001").await.kind(), OutcomeKind::Success);
    }

    #[tokio::test]
    async fn every_fixture_account_resolves() {
        let (o, _store) = setup(Collections::default()).await;
        let raw = std::fs::read_to_string(SEED).unwrap();
        let seed: crate::record_store::SeedFile = serde_json::from_str(&raw).unwrap();

        for account in &seed.accounts {
            let outcome = o.inquire(account.account_number.as_str()).await;
            assert!(
                matches!(outcome.kind(), OutcomeKind::Success | OutcomeKind::PartialSuccess),
                "{} resolved to {:?}",
                account.account_number,
                outcome.kind()
            );
            assert_eq!(outcome.account(), Some(account));
        }
    }
}
