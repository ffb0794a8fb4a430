//! Bank offer ingestion and best-discount evaluation.
//!
//! Feed payloads flow through [`OfferIngestor`]: each offer's copy is run through the
//! pattern [`extractor`], merged with its feed metadata by the [`normalizer`] and upserted
//! into an [`OfferStore`]. [`DiscountEvaluator`] reads the same store back to find the
//! single largest discount a purchase qualifies for.

pub mod domain;
pub mod evaluation;
pub mod extractor;
pub mod feed;
pub mod ingestion;
pub mod normalizer;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    DiscountType, ExtractedTerms, NameMatching, OfferId, OfferTerm, PaymentInstrument,
    StoredOffer,
};
pub use evaluation::{
    DiscountEvaluator, DiscountQuote, EvaluationConfig, EvaluationError, UncappedPercentage,
};
pub use feed::{FeedOffer, OfferDescription, OfferText, OFFER_LIST_TYPE};
pub use ingestion::{IngestionError, IngestionSummary, OfferFailure, OfferIngestor};
pub use router::{offer_router, DiscountParams, DiscountResponse};
pub use service::{OfferService, OfferServiceError};
pub use store::{InMemoryOfferStore, OfferQuery, OfferStore, StoreError, UpsertOutcome};
