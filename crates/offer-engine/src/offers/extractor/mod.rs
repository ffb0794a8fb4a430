//! Pattern-based extraction of discount terms from offer copy.
//!
//! Matching is best effort: text that fits none of the known phrasings yields the
//! zero-value flat terms, which never produce a positive discount downstream.

mod instrument;
mod patterns;

use super::domain::ExtractedTerms;

pub use instrument::infer_payment_instrument;

/// Extract discount type, value, cap and minimum spend from one offer description.
pub fn extract(text: &str) -> ExtractedTerms {
    let cleaned = clean_text(text);
    let table = patterns::rule_table();
    let mut terms = ExtractedTerms::default();

    for group in [&table.discount, &table.cap, &table.minimum_spend] {
        for rule in group.iter() {
            if rule.apply(&mut terms, &cleaned) {
                break;
            }
        }
    }

    terms
}

fn clean_text(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}', '\u{200c}', '\u{200d}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
