//! LegalAssista CLI entry point.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use assista_core::config::LoggingConfig;

mod commands;
mod context;
mod navigator;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            output::print_error(&format!("Failed to load configuration: {e}"));
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::debug!(config = %cli.config, "Configuration loaded");

    if let Err(e) = cli.execute(config).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Initialize tracing. Logs go to stderr so command output stays parseable.
fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
