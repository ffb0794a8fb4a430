use std::sync::OnceLock;

use regex::Regex;

use super::super::domain::{DiscountType, ExtractedTerms};

/// Writes a captured amount into the terms being built.
type FieldSetter = fn(&mut ExtractedTerms, f64);

pub(crate) struct PatternRule {
    regex: Regex,
    setter: FieldSetter,
}

impl PatternRule {
    /// First amount that parses across all matches of the rule, with thousands
    /// separators removed.
    pub(crate) fn capture(&self, text: &str) -> Option<f64> {
        self.regex.captures_iter(text).find_map(|captures| {
            let raw = captures.iter().skip(1).flatten().next()?.as_str();
            parse_amount(raw)
        })
    }

    pub(crate) fn apply(&self, terms: &mut ExtractedTerms, text: &str) -> bool {
        match self.capture(text) {
            Some(amount) => {
                (self.setter)(terms, amount);
                true
            }
            None => false,
        }
    }
}

/// Ordered rule groups; each group stops at its first matching rule.
pub(crate) struct RuleTable {
    pub(crate) discount: Vec<PatternRule>,
    pub(crate) cap: Vec<PatternRule>,
    pub(crate) minimum_spend: Vec<PatternRule>,
}

static RULE_TABLE: OnceLock<RuleTable> = OnceLock::new();

pub(crate) fn rule_table() -> &'static RuleTable {
    RULE_TABLE.get_or_init(|| RuleTable {
        discount: compile(&[
            (
                r"(?i)(\d+(?:\.\d+)?)%\s+off|(\d+(?:\.\d+)?)%\s+cashback",
                set_percentage as FieldSetter,
            ),
            (
                r"(?i)Flat\s+₹([\d,]+)|Get\s+₹([\d,]+)\s+cashback|Save\s+₹([\d,]+)|Extra\s+₹([\d,]+)\s+off",
                set_flat as FieldSetter,
            ),
        ]),
        cap: compile(&[(r"(?i)up\s+to\s+₹([\d,]+)", set_cap as FieldSetter)]),
        minimum_spend: compile(&[(
            r"(?i)Min\s+Order\s+Value\s+₹([\d,]+)|orders\s+of\s+₹([\d,]+)\s+and\s+above",
            set_minimum_spend as FieldSetter,
        )]),
    })
}

fn compile(rules: &[(&'static str, FieldSetter)]) -> Vec<PatternRule> {
    rules
        .iter()
        .filter_map(|(pattern, setter)| match Regex::new(pattern) {
            Ok(regex) => Some(PatternRule {
                regex,
                setter: *setter,
            }),
            Err(err) => {
                tracing::error!(%pattern, error = %err, "skipping offer pattern that does not compile");
                None
            }
        })
        .collect()
}

fn set_percentage(terms: &mut ExtractedTerms, value: f64) {
    terms.discount_type = DiscountType::Percentage;
    terms.discount_value = value;
}

fn set_flat(terms: &mut ExtractedTerms, value: f64) {
    terms.discount_type = DiscountType::Flat;
    terms.discount_value = value;
    terms.max_discount_amount = value;
}

fn set_cap(terms: &mut ExtractedTerms, value: f64) {
    terms.max_discount_amount = value;
}

fn set_minimum_spend(terms: &mut ExtractedTerms, value: f64) {
    terms.min_transaction_amount = value;
}

pub(crate) fn parse_amount(raw: &str) -> Option<f64> {
    let digits = raw.replace(',', "");
    digits
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}
