//! Alt Friend - alt text generation service
//!
//! HTTP service generating image alt text through a vision API

#![allow(missing_docs)]

use alt_friend::server;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "alt-friend", version, about = "Alt text generation service")]
struct Cli {
    /// Configuration file
    #[arg(short, long, env = "ALT_FRIEND_CONFIG")]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[actix_web::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match server::builder::run_server(cli.config.as_deref()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display keeps multi-line bind errors readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
