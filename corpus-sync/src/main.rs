//! Corpus Sync Main Entry Point
//!
//! This is the main binary for the corpus sync CLI. It moves JSON corpora
//! between files on disk and a search index in bounded bulk batches.

use std::env;
use std::process;

use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use corpus_sync::{commands, Cli, CliError, Command, Dependencies};

/// Initialize tracing/logging.
///
/// Logs go to stderr: stdout is reserved for command output such as exported
/// documents. `LOG_FORMAT=json` switches to JSON lines for structured
/// collection.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("corpus_sync=info,corpus_sync_repository=info"));

    let json_logs = env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    info!(
        service_name = "corpus-sync",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

/// Dispatch the parsed command against initialized dependencies.
async fn run(cli: Cli) -> Result<(), CliError> {
    let deps = Dependencies::new(&cli.url, cli.batch_size).await?;
    let service = &deps.service;

    match cli.command {
        Command::Import {
            index,
            file,
            doc_type,
        } => commands::import(service, &index, &doc_type, &file).await,
        Command::Export { index, doc_type } => commands::export(service, &index, &doc_type).await,
        Command::Count { index, doc_type } => commands::count(service, &index, &doc_type).await,
        Command::Exists { index } => commands::exists(service, &index).await,
        Command::DeleteIndex { index } => commands::delete_index(service, &index).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Load environment variables from .env file
    dotenv().ok();

    let cli = Cli::parse();

    init_tracing();

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => {
            // The single fail-fast boundary: connectivity, not-found, and
            // missing-input failures are reported and terminate here.
            // Nothing below main ever exits the process.
            error!(error = %err, "corpus-sync failed");
            process::exit(1);
        }
        Err(err) => {
            error!(error = %err, "corpus-sync failed");
            Err(err)
        }
    }
}
