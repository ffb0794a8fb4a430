use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type marker of feed items carrying offers.
pub const OFFER_LIST_TYPE: &str = "OFFER_LIST";

/// One entry of an `OFFER_LIST` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedOffer {
    #[serde(default)]
    pub provider: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_text: Option<OfferText>,
    pub offer_description: OfferDescription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDescription {
    pub id: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tnc_text: Option<String>,
}

/// Top-level item list, or `None` when the payload has no recognizable one.
pub(crate) fn feed_items(payload: &Value) -> Option<&Vec<Value>> {
    payload.get("items").and_then(Value::as_array)
}

pub(crate) fn is_offer_list(item: &Value) -> bool {
    item.get("type").and_then(Value::as_str) == Some(OFFER_LIST_TYPE)
}

/// Raw offer entries of an `OFFER_LIST` item; an absent list reads as empty.
pub(crate) fn offer_entries(item: &Value) -> &[Value] {
    item.pointer("/data/offers/offerList")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Best-effort identifier of a raw entry, for failure reports on entries that do not decode.
pub(crate) fn raw_offer_id(entry: &Value) -> Option<String> {
    entry
        .pointer("/offerDescription/id")
        .and_then(Value::as_str)
        .map(str::to_string)
}
