use super::super::domain::{DiscountType, OfferTerm};
use super::config::{EvaluationConfig, UncappedPercentage};

/// Discount granted by `offer` on a purchase of `amount`, or `None` when the
/// purchase is below the offer's minimum spend.
pub(crate) fn applied_discount(
    offer: &OfferTerm,
    amount: f64,
    config: &EvaluationConfig,
) -> Option<f64> {
    if amount < offer.min_transaction_amount {
        return None;
    }

    let discount = match offer.discount_type {
        DiscountType::Percentage if offer.discount_value > 0.0 => {
            let raw = amount * offer.discount_value / 100.0;
            match config.uncapped_percentage {
                UncappedPercentage::Unbounded if offer.max_discount_amount == 0.0 => raw,
                _ => raw.min(offer.max_discount_amount),
            }
        }
        // flat offers carry their amount in the cap
        _ => offer.max_discount_amount,
    };

    Some(discount.max(0.0))
}
