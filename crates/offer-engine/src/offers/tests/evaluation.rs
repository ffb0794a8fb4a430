use super::common::*;
use crate::offers::domain::{DiscountType, NameMatching, OfferId, OfferTerm, PaymentInstrument};
use crate::offers::evaluation::rules::applied_discount;
use crate::offers::{
    DiscountEvaluator, EvaluationConfig, EvaluationError, StoreError, UncappedPercentage,
};
use std::sync::Arc;

fn term(discount_type: DiscountType, value: f64, cap: f64, minimum: f64) -> OfferTerm {
    OfferTerm {
        offer_id: OfferId("rule-test".to_string()),
        description: String::new(),
        bank: "SBI".to_string(),
        payment_instrument: PaymentInstrument::CreditCard,
        discount_type,
        discount_value: value,
        max_discount_amount: cap,
        min_transaction_amount: minimum,
    }
}

#[test]
fn hdfc_flat_offer_applies_in_full() {
    let (service, _) = seeded_service();

    let discount = service
        .evaluator()
        .best_discount(10000.0, "HDFC", "CREDIT_CARD")
        .expect("evaluation succeeds");

    assert!(discount >= 2500.0, "got {discount}");
}

#[test]
fn percentage_offer_stays_under_cap() {
    let (service, _) = seeded_service();

    let quote = service
        .highest_discount(5000.0, "SBI", "CREDIT_CARD")
        .expect("evaluation succeeds");

    assert_eq!(quote.highest_discount_amount, 500.0);
    assert_eq!(quote.offer_id, Some(OfferId(SBI_PERCENT_ID.to_string())));
    assert_eq!(quote.candidates_considered, 2);
}

#[test]
fn capped_percentage_beats_smaller_flat_offer() {
    let (service, _) = seeded_service();

    let quote = service
        .highest_discount(30000.0, "SBI", "CREDIT_CARD")
        .expect("evaluation succeeds");

    assert_eq!(quote.highest_discount_amount, 750.0);
    assert_eq!(quote.offer_id, Some(OfferId(SBI_PERCENT_ID.to_string())));
}

#[test]
fn amount_below_every_minimum_yields_zero() {
    let (service, _) = seeded_service();

    let quote = service
        .highest_discount(3000.0, "SBI", "CREDIT_CARD")
        .expect("evaluation succeeds");

    assert_eq!(quote.highest_discount_amount, 0.0);
    assert!(quote.offer_id.is_none());
}

#[test]
fn minimum_spend_is_inclusive() {
    let (service, _) = seeded_service();

    let discount = service
        .evaluator()
        .best_discount(4990.0, "SBI", "CREDIT_CARD")
        .expect("evaluation succeeds");

    assert_eq!(discount, 499.0);
}

#[test]
fn unmatched_bank_or_instrument_yields_zero() {
    let (service, _) = seeded_service();
    let evaluator = service.evaluator();

    for (bank, instrument) in [
        ("AXIS", "CREDIT_CARD"),
        ("SBI", "DEBIT_CARD"),
        ("sbi", "CREDIT_CARD"),
        ("SBI", "credit_card"),
        ("SBI", "CARD_ON_DELIVERY"),
    ] {
        let discount = evaluator
            .best_discount(50000.0, bank, instrument)
            .expect("evaluation succeeds");
        assert_eq!(discount, 0.0, "{bank}/{instrument}");
    }
}

#[test]
fn case_insensitive_matching_is_configurable() {
    let (service, _) = build_service_with(EvaluationConfig {
        name_matching: NameMatching::CaseInsensitive,
        ..EvaluationConfig::default()
    });
    service.ingest(&sample_payload()).expect("ingest");

    let discount = service
        .evaluator()
        .best_discount(5000.0, "sbi", "credit_card")
        .expect("evaluation succeeds");

    assert_eq!(discount, 500.0);
}

#[test]
fn discount_is_monotonic_in_amount_past_minimum() {
    let (service, _) = seeded_service();
    let evaluator = service.evaluator();

    let mut previous = 0.0;
    for amount in (4990..=40000).step_by(1370) {
        let discount = evaluator
            .best_discount(amount as f64, "SBI", "CREDIT_CARD")
            .expect("evaluation succeeds");
        assert!(
            discount >= previous,
            "discount fell from {previous} to {discount} at {amount}"
        );
        previous = discount;
    }
    assert_eq!(previous, 750.0);
}

#[test]
fn rejects_invalid_amounts_before_querying_store() {
    let evaluator = DiscountEvaluator::new(Arc::new(UnavailableStore), EvaluationConfig::default());

    for amount in [f64::NAN, f64::INFINITY, -1.0] {
        match evaluator.best_discount(amount, "SBI", "CREDIT_CARD") {
            Err(EvaluationError::InvalidQueryInput(_)) => {}
            other => panic!("expected invalid query input for {amount}, got {other:?}"),
        }
    }
}

#[test]
fn store_failures_propagate_instead_of_zero() {
    let evaluator = DiscountEvaluator::new(Arc::new(UnavailableStore), EvaluationConfig::default());

    match evaluator.best_discount(5000.0, "SBI", "CREDIT_CARD") {
        Err(EvaluationError::Store(StoreError::Unavailable(_))) => {}
        other => panic!("expected store error, got {other:?}"),
    }
}

#[test]
fn uncapped_percentage_grants_nothing_by_default() {
    let offer = term(DiscountType::Percentage, 10.0, 0.0, 0.0);

    let capped = applied_discount(&offer, 5000.0, &EvaluationConfig::default());
    let unbounded = applied_discount(
        &offer,
        5000.0,
        &EvaluationConfig {
            uncapped_percentage: UncappedPercentage::Unbounded,
            ..EvaluationConfig::default()
        },
    );

    assert_eq!(capped, Some(0.0));
    assert_eq!(unbounded, Some(500.0));
}

#[test]
fn zero_percentage_falls_back_to_cap() {
    let offer = term(DiscountType::Percentage, 0.0, 150.0, 0.0);

    let discount = applied_discount(&offer, 5000.0, &EvaluationConfig::default());

    assert_eq!(discount, Some(150.0));
}

#[test]
fn below_minimum_is_ineligible() {
    let offer = term(DiscountType::Flat, 200.0, 200.0, 1000.0);

    assert_eq!(
        applied_discount(&offer, 999.99, &EvaluationConfig::default()),
        None
    );
    assert_eq!(
        applied_discount(&offer, 1000.0, &EvaluationConfig::default()),
        Some(200.0)
    );
}

#[test]
fn percentage_discount_is_not_rounded() {
    let offer = term(DiscountType::Percentage, 12.5, 1000.0, 0.0);

    let discount = applied_discount(&offer, 99.99, &EvaluationConfig::default())
        .expect("eligible without minimum spend");

    assert!((discount - 12.49875).abs() < 1e-9, "got {discount}");
}
