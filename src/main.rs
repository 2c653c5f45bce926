// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use medreviews_batch::app_config::{Config, LogLevel};
use medreviews_batch::fetcher::{build_http_client, PageFetcher};
use medreviews_batch::orchestrator::BatchOrchestrator;
use medreviews_batch::providers::openai::OpenAI;
use medreviews_batch::server::{build_router, AppState};

/// CLI wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// medreviews-batch - bounded batch page-heading extraction and translation
///
/// Serves POST /extract_h1 and POST /translate_batch with per-batch count,
/// time, byte and token caps.
#[derive(Parser, Debug)]
#[command(name = "medreviews-batch")]
#[command(version = "1.0.0")]
#[command(about = "Batch page-heading extraction and translation service")]
struct CommandLineOptions {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Address to bind the HTTP server to (overrides config)
    #[arg(short, long)]
    bind: Option<String>,

    /// Model name to use for translation (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let options = CommandLineOptions::parse();

    let mut config = Config::from_file(&options.config_path)?;
    if let Some(bind) = options.bind {
        config.bind_address = bind;
    }
    if let Some(model) = options.model {
        config.provider.model = model;
    }
    if let Some(log_level) = options.log_level {
        config.log_level = log_level.into();
    }

    env_logger::Builder::new()
        .filter_level(config.log_level.to_level_filter())
        .init();

    config.validate()?;

    let client = build_http_client(
        config.batch.connect_timeout(),
        config.batch.read_timeout(),
    );
    let fetcher = PageFetcher::new(client, config.batch.max_body_bytes);
    let provider = Arc::new(OpenAI::new(
        config.provider.api_key.clone(),
        config.provider.endpoint.clone(),
        config.provider.model.clone(),
        config.provider.timeout(),
    ));
    let orchestrator = BatchOrchestrator::new(&config, fetcher, provider);
    let state = Arc::new(AppState { orchestrator });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Listening on {} with model {}", config.bind_address, config.provider.model);

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
