use crate::cli::ServeArgs;
use crate::commands::ingest_feeds;
use crate::infra::{build_offer_service, AppState};
use crate::routes::with_offer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use offer_engine::config::AppConfig;
use offer_engine::error::AppError;
use offer_engine::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let offer_service = Arc::new(build_offer_service(config.evaluation));
    let seeded = ingest_feeds(&offer_service, &args.seed)?;
    if !seeded.is_empty() {
        let offers: usize = seeded
            .iter()
            .map(|report| report.summary.new_offers_created)
            .sum();
        info!(feeds = seeded.len(), offers, "offer store seeded");
    }

    let app = with_offer_routes(offer_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        uncapped_percentage = ?config.evaluation.uncapped_percentage,
        name_matching = ?config.evaluation.name_matching,
        "offer engine ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
