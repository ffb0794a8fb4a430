use crate::infra::{build_offer_service, OfferEngineService};
use clap::Args;
use offer_engine::config::AppConfig;
use offer_engine::error::AppError;
use offer_engine::offers::{DiscountResponse, IngestionSummary};
use offer_engine::telemetry;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub(crate) struct IngestArgs {
    /// Feed files (JSON) to ingest, in order
    #[arg(required = true, value_name = "FEED")]
    pub(crate) feeds: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Purchase amount in rupees
    #[arg(long)]
    pub(crate) amount: f64,
    /// Bank name as it appears in the feed provider list
    #[arg(long)]
    pub(crate) bank: String,
    /// Payment instrument code, e.g. CREDIT_CARD
    #[arg(long)]
    pub(crate) instrument: String,
    /// Feed files (JSON) loaded before quoting
    #[arg(value_name = "FEED")]
    pub(crate) feeds: Vec<PathBuf>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedReport {
    pub(crate) feed: String,
    #[serde(flatten)]
    pub(crate) summary: IngestionSummary,
}

/// Ingest each feed into `service`, stopping at the first unreadable file.
pub(crate) fn ingest_feeds(
    service: &OfferEngineService,
    feeds: &[PathBuf],
) -> Result<Vec<FeedReport>, AppError> {
    feeds
        .iter()
        .map(|path| ingest_feed(service, path))
        .collect()
}

fn ingest_feed(service: &OfferEngineService, path: &Path) -> Result<FeedReport, AppError> {
    let summary = service.ingestor().ingest_path(path)?;
    info!(
        feed = %path.display(),
        identified = summary.offers_identified,
        created = summary.new_offers_created,
        "feed loaded"
    );
    Ok(FeedReport {
        feed: path.display().to_string(),
        summary,
    })
}

pub(crate) fn run_ingest(args: IngestArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let service = build_offer_service(config.evaluation);
    let reports = ingest_feeds(&service, &args.feeds)?;
    print_json(&reports)
}

pub(crate) fn run_quote(args: QuoteArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let QuoteArgs {
        amount,
        bank,
        instrument,
        feeds,
    } = args;

    let service = build_offer_service(config.evaluation);
    ingest_feeds(&service, &feeds)?;

    let highest_discount_amount = service
        .evaluator()
        .best_discount(amount, &bank, &instrument)?;
    print_json(&DiscountResponse {
        highest_discount_amount,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered =
        serde_json::to_string_pretty(value).map_err(|err| AppError::Io(err.into()))?;
    println!("{rendered}");
    Ok(())
}
