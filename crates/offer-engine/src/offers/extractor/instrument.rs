use super::super::domain::PaymentInstrument;

const INSTRUMENT_KEYWORDS: &[(&str, PaymentInstrument)] = &[
    ("credit card", PaymentInstrument::CreditCard),
    ("debit card", PaymentInstrument::DebitCard),
    ("emi", PaymentInstrument::Emi),
    ("upi", PaymentInstrument::Upi),
    ("wallet", PaymentInstrument::Wallet),
];

pub fn infer_payment_instrument(text: &str) -> PaymentInstrument {
    let lower = text.to_lowercase();
    INSTRUMENT_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, instrument)| *instrument)
        .unwrap_or(PaymentInstrument::Other)
}
