use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::extractor;
use super::feed::{self, FeedOffer};
use super::normalizer;
use super::store::{OfferStore, StoreError, UpsertOutcome};

/// Drives extraction, normalization and upsert for every offer in a feed payload.
pub struct OfferIngestor<S> {
    store: Arc<S>,
}

impl<S> OfferIngestor<S>
where
    S: OfferStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> Result<IngestionSummary, IngestionError> {
        let file = std::fs::File::open(path)?;
        self.ingest_reader(std::io::BufReader::new(file))
    }

    pub fn ingest_reader<R: Read>(&self, reader: R) -> Result<IngestionSummary, IngestionError> {
        let payload: Value = serde_json::from_reader(reader)?;
        self.ingest(&payload)
    }

    /// Ingest every `OFFER_LIST` section of `payload`.
    ///
    /// A payload without a top-level `items` array is rejected before anything is
    /// written. Past that point offers are independent: one that fails to decode or
    /// store is reported in [`IngestionSummary::failures`] and the rest proceed.
    pub fn ingest(&self, payload: &Value) -> Result<IngestionSummary, IngestionError> {
        let items = feed::feed_items(payload).ok_or(IngestionError::InvalidStructure)?;
        let mut summary = IngestionSummary::default();

        for item in items.iter().filter(|item| feed::is_offer_list(item)) {
            for entry in feed::offer_entries(item) {
                summary.offers_identified += 1;
                match self.ingest_entry(entry) {
                    Ok(outcome) => {
                        if outcome.created() {
                            summary.new_offers_created += 1;
                        }
                    }
                    Err(failure) => {
                        warn!(offer_id = ?failure.offer_id, reason = %failure.reason, "offer skipped");
                        summary.failures.push(failure);
                    }
                }
            }
        }

        info!(
            identified = summary.offers_identified,
            created = summary.new_offers_created,
            failed = summary.failures.len(),
            "feed ingested"
        );
        Ok(summary)
    }

    /// Extract, normalize and upsert a single decoded offer.
    pub fn ingest_offer(&self, offer: &FeedOffer) -> Result<UpsertOutcome, StoreError> {
        let terms = extractor::extract(&offer.offer_description.text);
        let normalized = normalizer::normalize(offer, terms);
        debug!(
            offer_id = %normalized.offer_id,
            bank = %normalized.bank,
            instrument = %normalized.payment_instrument,
            "upserting offer"
        );
        self.store.upsert(normalized)
    }

    fn ingest_entry(&self, entry: &Value) -> Result<UpsertOutcome, OfferFailure> {
        let offer = FeedOffer::deserialize(entry).map_err(|err| OfferFailure {
            offer_id: feed::raw_offer_id(entry),
            reason: format!("malformed offer entry: {err}"),
        })?;

        self.ingest_offer(&offer).map_err(|err| OfferFailure {
            offer_id: Some(offer.offer_description.id.clone()),
            reason: err.to_string(),
        })
    }
}

/// Aggregate counts reported for one feed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSummary {
    pub offers_identified: usize,
    pub new_offers_created: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<OfferFailure>,
}

/// One offer that could not be ingested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<String>,
    pub reason: String,
}

/// Error rejecting a whole payload.
#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("invalid feed structure: missing top-level items list")]
    InvalidStructure,
    #[error("feed payload is not valid JSON: {0}")]
    MalformedPayload(#[from] serde_json::Error),
    #[error("failed to read feed: {0}")]
    Io(#[from] std::io::Error),
}
