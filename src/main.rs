//! Sentiment gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http (axum) ──▶ FailSafeClient ──▶ CircuitBreaker
//!                                          │                  │
//!                                          │   admitted       │ rejected
//!                                          ▼                  ▼
//!                                   remote inference    FallbackEngine
//!                                      service          (lexicon | minimal)
//!                                          │                  │
//!     Client Response                      ▼                  ▼
//!     ◀────────────────────────── PredictionResult / BatchResult
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use sentiment_failsafe::config::{self, ServiceConfig};
use sentiment_failsafe::lifecycle::startup;
use sentiment_failsafe::observability::logging;

#[derive(Parser)]
#[command(name = "sentiment-gateway")]
#[command(about = "Fail-safe sentiment analysis gateway", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "SENTIMENT_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sentiment-gateway: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "sentiment-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        inference_url = %config.inference.base_url,
        failure_threshold = config.circuit_breaker.failure_threshold,
        open_timeout_secs = config.circuit_breaker.open_timeout_secs,
        "Configuration loaded"
    );

    match startup::run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Gateway failed");
            ExitCode::FAILURE
        }
    }
}

fn load(args: &Args) -> Result<ServiceConfig, config::ConfigError> {
    match &args.config {
        Some(path) => config::load_config(path),
        None => config::parse_config(""),
    }
}
