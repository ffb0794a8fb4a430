use crate::commands::{run_ingest, run_quote, IngestArgs, QuoteArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use offer_engine::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Offer Engine",
    about = "Ingest bank offer feeds and quote the best applicable discount",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Ingest feed files and print a summary per file
    Ingest(IngestArgs),
    /// Ingest feed files, then print the highest discount for a purchase
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Feed files loaded into the offer store before the server accepts traffic
    #[arg(long = "seed", value_name = "FEED")]
    pub(crate) seed: Vec<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Ingest(args) => run_ingest(args),
        Command::Quote(args) => run_quote(args),
    }
}
