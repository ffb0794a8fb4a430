use super::domain::{ExtractedTerms, OfferId, OfferTerm};
use super::extractor::infer_payment_instrument;
use super::feed::FeedOffer;

/// Bank recorded for offers whose feed entry lists no provider.
pub const UNKNOWN_BANK: &str = "Unknown";

/// Merge feed metadata and extracted terms into the canonical offer record.
pub fn normalize(offer: &FeedOffer, terms: ExtractedTerms) -> OfferTerm {
    let description = &offer.offer_description;
    let bank = offer
        .provider
        .first()
        .filter(|provider| !provider.trim().is_empty())
        .map_or(UNKNOWN_BANK, String::as_str)
        .to_string();

    OfferTerm {
        offer_id: OfferId(description.id.clone()),
        description: description.text.clone(),
        bank,
        payment_instrument: infer_payment_instrument(&description.text),
        discount_type: terms.discount_type,
        discount_value: non_negative(terms.discount_value),
        max_discount_amount: non_negative(terms.max_discount_amount),
        min_transaction_amount: non_negative(terms.min_transaction_amount),
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
