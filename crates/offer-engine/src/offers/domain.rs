use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for feed offers; stable across re-ingestion of the same entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfferId(pub String);

impl fmt::Display for OfferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How the shopper pays, as inferred from the offer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentInstrument {
    CreditCard,
    DebitCard,
    Emi,
    Upi,
    Wallet,
    Other,
}

impl PaymentInstrument {
    pub const ALL: [PaymentInstrument; 6] = [
        PaymentInstrument::CreditCard,
        PaymentInstrument::DebitCard,
        PaymentInstrument::Emi,
        PaymentInstrument::Upi,
        PaymentInstrument::Wallet,
        PaymentInstrument::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PaymentInstrument::CreditCard => "CREDIT_CARD",
            PaymentInstrument::DebitCard => "DEBIT_CARD",
            PaymentInstrument::Emi => "EMI",
            PaymentInstrument::Upi => "UPI",
            PaymentInstrument::Wallet => "WALLET",
            PaymentInstrument::Other => "OTHER",
        }
    }

    /// Resolve a caller supplied code such as `CREDIT_CARD`.
    pub fn from_code(raw: &str, matching: NameMatching) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|instrument| matching.matches(instrument.code(), raw))
    }
}

impl fmt::Display for PaymentInstrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountType {
    Percentage,
    Flat,
}

/// Comparison rule applied to bank names and instrument codes at query time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameMatching {
    #[default]
    Exact,
    CaseInsensitive,
}

impl NameMatching {
    pub fn matches(&self, stored: &str, requested: &str) -> bool {
        match self {
            NameMatching::Exact => stored == requested,
            NameMatching::CaseInsensitive => stored.eq_ignore_ascii_case(requested),
        }
    }
}

/// Discount terms pulled out of free-form offer text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedTerms {
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: f64,
    pub min_transaction_amount: f64,
}

impl Default for ExtractedTerms {
    fn default() -> Self {
        Self {
            discount_type: DiscountType::Flat,
            discount_value: 0.0,
            max_discount_amount: 0.0,
            min_transaction_amount: 0.0,
        }
    }
}

/// Canonical record of one promotional discount rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferTerm {
    pub offer_id: OfferId,
    pub description: String,
    pub bank: String,
    pub payment_instrument: PaymentInstrument,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount_amount: f64,
    pub min_transaction_amount: f64,
}

impl OfferTerm {
    pub fn terms(&self) -> ExtractedTerms {
        ExtractedTerms {
            discount_type: self.discount_type,
            discount_value: self.discount_value,
            max_discount_amount: self.max_discount_amount,
            min_transaction_amount: self.min_transaction_amount,
        }
    }
}

/// Store-side view of an offer with its bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOffer {
    #[serde(flatten)]
    pub offer: OfferTerm,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
