use std::sync::Arc;

use serde_json::Value;

use super::domain::{OfferId, StoredOffer};
use super::evaluation::{DiscountEvaluator, DiscountQuote, EvaluationConfig, EvaluationError};
use super::ingestion::{IngestionError, IngestionSummary, OfferIngestor};
use super::store::{OfferStore, StoreError};

/// Service composing feed ingestion and discount evaluation over one store.
pub struct OfferService<S> {
    store: Arc<S>,
    ingestor: OfferIngestor<S>,
    evaluator: DiscountEvaluator<S>,
}

impl<S> OfferService<S>
where
    S: OfferStore + 'static,
{
    pub fn new(store: Arc<S>, config: EvaluationConfig) -> Self {
        Self {
            ingestor: OfferIngestor::new(store.clone()),
            evaluator: DiscountEvaluator::new(store.clone(), config),
            store,
        }
    }

    pub fn ingestor(&self) -> &OfferIngestor<S> {
        &self.ingestor
    }

    pub fn evaluator(&self) -> &DiscountEvaluator<S> {
        &self.evaluator
    }

    /// Ingest a feed payload and report identified vs. created counts.
    pub fn ingest(&self, payload: &Value) -> Result<IngestionSummary, OfferServiceError> {
        Ok(self.ingestor.ingest(payload)?)
    }

    /// Highest single discount for the purchase context.
    pub fn highest_discount(
        &self,
        amount_to_pay: f64,
        bank_name: &str,
        payment_instrument: &str,
    ) -> Result<DiscountQuote, OfferServiceError> {
        Ok(self
            .evaluator
            .quote(amount_to_pay, bank_name, payment_instrument)?)
    }

    /// Fetch a stored offer for API responses.
    pub fn get(&self, offer_id: &OfferId) -> Result<StoredOffer, OfferServiceError> {
        self.store
            .fetch(offer_id)?
            .ok_or_else(|| OfferServiceError::NotFound(offer_id.clone()))
    }
}

/// Error raised by the offer service.
#[derive(Debug, thiserror::Error)]
pub enum OfferServiceError {
    #[error(transparent)]
    Ingestion(#[from] IngestionError),
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("offer {0} not found")]
    NotFound(OfferId),
}
