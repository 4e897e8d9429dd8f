//! CLI command definitions and dispatch.

pub mod access;
pub mod config;
pub mod login;
pub mod logout;
pub mod routes;
pub mod whoami;

use clap::{Parser, Subcommand};

use assista_core::config::AppConfig;
use assista_core::error::AppError;

use crate::context::AppContext;
use crate::output::OutputFormat;

/// LegalAssista: sign in and check what each screen allows
#[derive(Debug, Parser)]
#[command(name = "assista", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml", env = "ASSISTA_CONFIG")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    Login(login::LoginArgs),
    /// Clear the stored session
    Logout,
    /// Show the stored session
    Whoami(whoami::WhoamiArgs),
    /// Decide whether the stored session may open a view
    Access(access::AccessArgs),
    /// List the route table
    Routes,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let context = || AppContext::new(&config);
        match &self.command {
            Commands::Login(args) => login::execute(args, &context()?, self.format).await,
            Commands::Logout => logout::execute(&context()?, self.format),
            Commands::Whoami(args) => whoami::execute(args, &context()?, self.format).await,
            Commands::Access(args) => access::execute(args, &context()?, self.format),
            Commands::Routes => routes::execute(&context()?, self.format),
            Commands::Config(args) => config::execute(args, &config, &self.config, self.format),
        }
    }
}

/// Helper: load configuration from file and environment
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
