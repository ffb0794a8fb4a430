use metrics_exporter_prometheus::PrometheusHandle;
use offer_engine::offers::{EvaluationConfig, InMemoryOfferStore, OfferService};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

pub(crate) type OfferEngineService = OfferService<InMemoryOfferStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Offer service backed by a fresh process-local store.
pub(crate) fn build_offer_service(config: EvaluationConfig) -> OfferEngineService {
    OfferService::new(Arc::new(InMemoryOfferStore::default()), config)
}
