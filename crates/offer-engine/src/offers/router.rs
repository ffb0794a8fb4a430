use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::domain::OfferId;
use super::evaluation::EvaluationError;
use super::ingestion::IngestionError;
use super::service::{OfferService, OfferServiceError};
use super::store::{OfferStore, StoreError};

/// Router builder exposing feed ingestion and discount lookup.
pub fn offer_router<S>(service: Arc<OfferService<S>>) -> Router
where
    S: OfferStore + 'static,
{
    Router::new()
        .route("/offer", post(ingest_handler::<S>))
        .route("/offer/:offer_id", get(offer_handler::<S>))
        .route("/highest-discount", get(highest_discount_handler::<S>))
        .with_state(service)
}

/// Raw query string of `/highest-discount`; validated before the store is touched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountParams {
    pub amount_to_pay: Option<String>,
    pub bank_name: Option<String>,
    pub payment_instrument: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountResponse {
    pub highest_discount_amount: f64,
}

pub(crate) async fn ingest_handler<S>(
    State(service): State<Arc<OfferService<S>>>,
    axum::Json(payload): axum::Json<Value>,
) -> Response
where
    S: OfferStore + 'static,
{
    match service.ingest(&payload) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn highest_discount_handler<S>(
    State(service): State<Arc<OfferService<S>>>,
    Query(params): Query<DiscountParams>,
) -> Response
where
    S: OfferStore + 'static,
{
    let (amount, bank, instrument) = match validate_params(params) {
        Ok(validated) => validated,
        Err(err) => return error_response(err.into()),
    };

    match service.highest_discount(amount, &bank, &instrument) {
        Ok(quote) => {
            let body = DiscountResponse {
                highest_discount_amount: quote.highest_discount_amount,
            };
            (StatusCode::OK, axum::Json(body)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn offer_handler<S>(
    State(service): State<Arc<OfferService<S>>>,
    Path(offer_id): Path<String>,
) -> Response
where
    S: OfferStore + 'static,
{
    match service.get(&OfferId(offer_id)) {
        Ok(stored) => (StatusCode::OK, axum::Json(stored)).into_response(),
        Err(err) => error_response(err),
    }
}

fn validate_params(params: DiscountParams) -> Result<(f64, String, String), EvaluationError> {
    let DiscountParams {
        amount_to_pay,
        bank_name,
        payment_instrument,
    } = params;

    let amount_raw = required("amountToPay", amount_to_pay)?;
    let bank = required("bankName", bank_name)?;
    let instrument = required("paymentInstrument", payment_instrument)?;

    let amount = amount_raw.trim().parse::<f64>().map_err(|_| {
        EvaluationError::InvalidQueryInput(format!("amountToPay '{amount_raw}' is not a number"))
    })?;

    Ok((amount, bank, instrument))
}

fn required(name: &str, value: Option<String>) -> Result<String, EvaluationError> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| {
            EvaluationError::InvalidQueryInput(format!("missing required query parameter {name}"))
        })
}

fn error_status(err: &OfferServiceError) -> StatusCode {
    match err {
        OfferServiceError::Ingestion(IngestionError::InvalidStructure)
        | OfferServiceError::Ingestion(IngestionError::MalformedPayload(_))
        | OfferServiceError::Evaluation(EvaluationError::InvalidQueryInput(_)) => {
            StatusCode::BAD_REQUEST
        }
        OfferServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        OfferServiceError::Store(StoreError::Unavailable(_))
        | OfferServiceError::Evaluation(EvaluationError::Store(StoreError::Unavailable(_))) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(err: OfferServiceError) -> Response {
    let status = error_status(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "offer request failed");
    }
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
