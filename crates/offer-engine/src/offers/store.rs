use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use super::domain::{NameMatching, OfferId, OfferTerm, PaymentInstrument, StoredOffer};

/// Result of an upsert, distinguishing first-time creations from replacements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

impl UpsertOutcome {
    pub fn created(&self) -> bool {
        matches!(self, UpsertOutcome::Created)
    }
}

/// Bank and instrument filter used by the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    pub bank: String,
    pub instrument: PaymentInstrument,
    pub matching: NameMatching,
}

impl OfferQuery {
    pub fn matches(&self, offer: &OfferTerm) -> bool {
        offer.payment_instrument == self.instrument
            && self.matching.matches(&offer.bank, &self.bank)
    }
}

/// Storage abstraction so ingestion and evaluation can run against any engine.
///
/// `upsert` must replace the term fields and the bank/instrument associations of an
/// existing offer wholesale, atomically with respect to other upserts of the same id.
pub trait OfferStore: Send + Sync {
    fn upsert(&self, offer: OfferTerm) -> Result<UpsertOutcome, StoreError>;
    fn find(&self, query: &OfferQuery) -> Result<Vec<OfferTerm>, StoreError>;
    fn fetch(&self, id: &OfferId) -> Result<Option<StoredOffer>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("offer store unavailable: {0}")]
    Unavailable(String),
    #[error("offer store rejected write: {0}")]
    WriteFailed(String),
}

/// Process-local store keyed by offer id.
#[derive(Default, Clone)]
pub struct InMemoryOfferStore {
    offers: Arc<Mutex<BTreeMap<OfferId, StoredOffer>>>,
}

impl InMemoryOfferStore {
    fn guard(&self) -> Result<MutexGuard<'_, BTreeMap<OfferId, StoredOffer>>, StoreError> {
        self.offers
            .lock()
            .map_err(|_| StoreError::Unavailable("offer store lock poisoned".to_string()))
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.guard()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.guard()?.is_empty())
    }
}

impl OfferStore for InMemoryOfferStore {
    fn upsert(&self, offer: OfferTerm) -> Result<UpsertOutcome, StoreError> {
        let now = Utc::now();
        let mut guard = self.guard()?;
        match guard.get_mut(&offer.offer_id) {
            Some(existing) => {
                existing.offer = offer;
                existing.updated_at = now;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                guard.insert(
                    offer.offer_id.clone(),
                    StoredOffer {
                        offer,
                        created_at: now,
                        updated_at: now,
                    },
                );
                Ok(UpsertOutcome::Created)
            }
        }
    }

    fn find(&self, query: &OfferQuery) -> Result<Vec<OfferTerm>, StoreError> {
        let guard = self.guard()?;
        Ok(guard
            .values()
            .filter(|stored| query.matches(&stored.offer))
            .map(|stored| stored.offer.clone())
            .collect())
    }

    fn fetch(&self, id: &OfferId) -> Result<Option<StoredOffer>, StoreError> {
        let guard = self.guard()?;
        Ok(guard.get(id).cloned())
    }
}
