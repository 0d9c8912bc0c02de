//! Alt Friend bulk runner
//!
//! Generates alt text for every image lacking it by driving a running
//! Alt Friend server one image at a time. Ctrl+C stops after the current image.

#![allow(missing_docs)]

use alt_friend::core::bulk::{
    BulkJob, BulkObserver, BulkRunner, BulkState, BulkStats, HttpBulkBackend, LogEntry, Progress,
};
use alt_friend::core::types::ImageRef;
use alt_friend::server::builder::load_config;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "alt-friend-bulk",
    version,
    about = "Generate alt text for every image that lacks it"
)]
struct Cli {
    /// Base URL of the Alt Friend server
    #[arg(long, env = "ALT_FRIEND_URL", default_value = "http://127.0.0.1:8080")]
    server: String,

    /// Shared request nonce, when the server requires one
    #[arg(long, env = "ALT_FRIEND_NONCE")]
    nonce: Option<String>,

    /// Bearer token of a user holding the upload_files capability
    #[arg(long, env = "ALT_FRIEND_TOKEN")]
    token: Option<String>,

    /// Configuration file supplying `bulk.delay_ms`
    #[arg(short, long, env = "ALT_FRIEND_CONFIG")]
    config: Option<PathBuf>,

    /// Pause after each image, in milliseconds; overrides the configuration
    #[arg(long)]
    delay_ms: Option<u64>,
}

async fn item_delay(cli: &Cli) -> anyhow::Result<Duration> {
    if let Some(ms) = cli.delay_ms {
        return Ok(Duration::from_millis(ms));
    }
    let config = load_config(cli.config.as_deref())
        .await
        .context("failed to load configuration")?;
    Ok(config.bulk().delay())
}

/// Prints log lines and progress to the terminal
struct ConsoleObserver;

impl BulkObserver for ConsoleObserver {
    fn on_log(&self, entry: &LogEntry) {
        println!("{}", entry);
    }

    fn on_progress(&self, progress: Progress, stats: BulkStats) {
        println!(
            "  [{}/{} {:.0}%] success: {} failed: {} skipped: {}",
            progress.processed,
            progress.total,
            progress.percentage,
            stats.success,
            stats.failed,
            stats.skipped
        );
    }

    fn on_item_started(&self, image: &ImageRef, position: usize, total: usize) {
        println!("  [{}/{}] {} (ID: {})", position, total, image.display_title(), image.id);
    }
}

async fn run(cli: Cli) -> anyhow::Result<(BulkState, BulkStats)> {
    let delay = item_delay(&cli).await?;
    let mut backend = HttpBulkBackend::new(&cli.server).context("invalid server URL")?;
    if let Some(nonce) = cli.nonce {
        backend = backend.with_nonce(nonce);
    }
    if let Some(token) = cli.token {
        backend = backend.with_token(token);
    }

    let runner = BulkRunner::new(backend).with_delay(delay);
    let mut job = BulkJob::new();

    let stop = job.stop_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stop.request_stop();
            println!(
                "{}",
                LogEntry::info("Stop requested. Will stop after current image completes.")
            );
        }
        // A second Ctrl+C abandons the in-flight request
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let state = runner
        .run(&mut job, &ConsoleObserver)
        .await
        .context("bulk run failed")?;
    Ok((state, job.stats()))
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .init();

    match run(Cli::parse()).await {
        Ok((BulkState::Completed, stats)) if stats.failed == 0 => ExitCode::SUCCESS,
        Ok((BulkState::Stopped, _)) => ExitCode::from(130),
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
