use std::collections::HashSet;
use std::sync::Arc;

use axum::response::Response;
use serde_json::{json, Value};

use crate::offers::domain::{OfferId, OfferTerm, StoredOffer};
use crate::offers::store::{InMemoryOfferStore, OfferQuery, OfferStore, StoreError, UpsertOutcome};
use crate::offers::{offer_router, EvaluationConfig, OfferService};

pub(super) const SBI_PERCENT_ID: &str = "FPO250619134128USHPF";
pub(super) const SBI_FLAT_ID: &str = "FPO250619134128EXTRA";
pub(super) const HDFC_FLAT_ID: &str = "FPO250701120000HDFC";

pub(super) fn offer_entry(id: &str, providers: &[&str], text: &str) -> Value {
    json!({
        "provider": providers,
        "logo": "https://img.example.com/bank.png",
        "offerText": { "text": "Bank Offer" },
        "offerDescription": {
            "id": id,
            "text": text,
            "tncText": "T&C apply"
        }
    })
}

pub(super) fn offer_list_item(offers: Vec<Value>) -> Value {
    json!({
        "type": "OFFER_LIST",
        "data": { "offers": { "offerList": offers } }
    })
}

pub(super) fn payload(items: Vec<Value>) -> Value {
    json!({ "items": items })
}

pub(super) fn sbi_percent_offer() -> Value {
    offer_entry(
        SBI_PERCENT_ID,
        &["SBI"],
        "10% off up to ₹750 on SBI Credit Card Transactions, Min Order Value ₹4,990",
    )
}

pub(super) fn sbi_flat_offer() -> Value {
    offer_entry(
        SBI_FLAT_ID,
        &["SBI"],
        "Extra ₹500 off on SBI Credit Card EMI Transactions on orders of ₹24,990 and above",
    )
}

pub(super) fn hdfc_flat_offer() -> Value {
    offer_entry(
        HDFC_FLAT_ID,
        &["HDFC"],
        "Extra ₹2,500 off on HDFC Bank Credit Card EMI Transactions",
    )
}

/// Feed with a non-offer widget, the two SBI offers and the HDFC offer.
pub(super) fn sample_payload() -> Value {
    payload(vec![
        json!({ "type": "PRODUCT_SUMMARY", "data": { "title": "Phone" } }),
        offer_list_item(vec![sbi_percent_offer(), sbi_flat_offer()]),
        offer_list_item(vec![hdfc_flat_offer()]),
    ])
}

pub(super) fn build_service() -> (OfferService<InMemoryOfferStore>, Arc<InMemoryOfferStore>) {
    build_service_with(EvaluationConfig::default())
}

pub(super) fn build_service_with(
    config: EvaluationConfig,
) -> (OfferService<InMemoryOfferStore>, Arc<InMemoryOfferStore>) {
    let store = Arc::new(InMemoryOfferStore::default());
    let service = OfferService::new(store.clone(), config);
    (service, store)
}

pub(super) fn seeded_service() -> (OfferService<InMemoryOfferStore>, Arc<InMemoryOfferStore>) {
    let (service, store) = build_service();
    service
        .ingest(&sample_payload())
        .expect("sample payload ingests");
    (service, store)
}

pub(super) fn offer_router_with_service(service: OfferService<InMemoryOfferStore>) -> axum::Router {
    offer_router(Arc::new(service))
}

/// Store whose engine is down for every call.
pub(super) struct UnavailableStore;

impl OfferStore for UnavailableStore {
    fn upsert(&self, _offer: OfferTerm) -> Result<UpsertOutcome, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn find(&self, _query: &OfferQuery) -> Result<Vec<OfferTerm>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &OfferId) -> Result<Option<StoredOffer>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

/// In-memory store that rejects writes for selected offer ids.
#[derive(Default)]
pub(super) struct RejectingStore {
    pub(super) inner: InMemoryOfferStore,
    pub(super) rejected: HashSet<String>,
}

impl RejectingStore {
    pub(super) fn rejecting(ids: &[&str]) -> Self {
        Self {
            inner: InMemoryOfferStore::default(),
            rejected: ids.iter().map(|id| id.to_string()).collect(),
        }
    }
}

impl OfferStore for RejectingStore {
    fn upsert(&self, offer: OfferTerm) -> Result<UpsertOutcome, StoreError> {
        if self.rejected.contains(&offer.offer_id.0) {
            return Err(StoreError::WriteFailed(format!(
                "constraint violation on {}",
                offer.offer_id
            )));
        }
        self.inner.upsert(offer)
    }

    fn find(&self, query: &OfferQuery) -> Result<Vec<OfferTerm>, StoreError> {
        self.inner.find(query)
    }

    fn fetch(&self, id: &OfferId) -> Result<Option<StoredOffer>, StoreError> {
        self.inner.fetch(id)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
