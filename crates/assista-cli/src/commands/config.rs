//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use assista_core::config::AppConfig;
use assista_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration, including the route table
    Validate,
}

/// Execute config commands
pub fn execute(
    args: &ConfigArgs,
    config: &AppConfig,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Json => output::print_json(config),
            OutputFormat::Table => {
                output::print_kv("API base URL", &config.api.base_url());
                output::print_kv("Login URL", &config.api.login_url());
                output::print_kv("Timeout", &format!("{}s", config.api.timeout_seconds));
                let encodings: Vec<&str> =
                    config.api.encodings.iter().map(|e| e.as_str()).collect();
                output::print_kv("Login encodings", &encodings.join(", "));
                output::print_kv("Storage", &config.storage.backend.to_string());
                output::print_kv("Storage path", &config.storage.path);
                output::print_kv("Login path", &config.routes.login);
                output::print_kv("Views", &config.routes.views.len().to_string());
                output::print_kv("Log level", &config.logging.level);
            }
        },
        ConfigCommand::Validate => {
            assista_auth::RouteTable::from_config(&config.routes)?;
            output::print_success(&format!("Configuration '{config_path}' is valid"));
        }
    }
    Ok(())
}
