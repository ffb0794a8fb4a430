mod config;
pub(crate) mod rules;

pub use config::{EvaluationConfig, UncappedPercentage};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{OfferId, PaymentInstrument};
use super::store::{OfferQuery, OfferStore, StoreError};

/// Read-only evaluator picking the single largest discount for a purchase.
pub struct DiscountEvaluator<S> {
    store: Arc<S>,
    config: EvaluationConfig,
}

impl<S> DiscountEvaluator<S>
where
    S: OfferStore + 'static,
{
    pub fn new(store: Arc<S>, config: EvaluationConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    /// Largest discount any matching offer grants on `amount_to_pay`; 0 when none qualifies.
    pub fn best_discount(
        &self,
        amount_to_pay: f64,
        bank_name: &str,
        payment_instrument: &str,
    ) -> Result<f64, EvaluationError> {
        self.quote(amount_to_pay, bank_name, payment_instrument)
            .map(|quote| quote.highest_discount_amount)
    }

    /// Same as [`best_discount`](Self::best_discount), also reporting the winning offer.
    pub fn quote(
        &self,
        amount_to_pay: f64,
        bank_name: &str,
        payment_instrument: &str,
    ) -> Result<DiscountQuote, EvaluationError> {
        if !amount_to_pay.is_finite() || amount_to_pay < 0.0 {
            return Err(EvaluationError::InvalidQueryInput(format!(
                "amountToPay must be a non-negative number, got {amount_to_pay}"
            )));
        }

        let matching = self.config.name_matching;
        let Some(instrument) = PaymentInstrument::from_code(payment_instrument, matching) else {
            debug!(payment_instrument, "unknown payment instrument matches no offer");
            return Ok(DiscountQuote::default());
        };

        let candidates = self.store.find(&OfferQuery {
            bank: bank_name.to_string(),
            instrument,
            matching,
        })?;

        let mut quote = DiscountQuote {
            candidates_considered: candidates.len(),
            ..DiscountQuote::default()
        };
        for offer in &candidates {
            let Some(discount) = rules::applied_discount(offer, amount_to_pay, &self.config)
            else {
                continue;
            };
            if discount > quote.highest_discount_amount {
                quote.highest_discount_amount = discount;
                quote.offer_id = Some(offer.offer_id.clone());
            }
        }

        debug!(
            amount_to_pay,
            bank_name,
            %instrument,
            candidates = quote.candidates_considered,
            discount = quote.highest_discount_amount,
            "evaluated offers"
        );
        Ok(quote)
    }
}

/// Evaluation output; `offer_id` names the winning offer when the discount is positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountQuote {
    pub highest_discount_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_id: Option<OfferId>,
    pub candidates_considered: usize,
}

/// Error raised while evaluating a purchase.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error("invalid query input: {0}")]
    InvalidQueryInput(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
