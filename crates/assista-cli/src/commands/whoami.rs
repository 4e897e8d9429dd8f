//! `assista whoami`

use clap::Args;
use serde_json::json;

use assista_auth::{SessionLookup, UserNotice};
use assista_core::error::AppError;

use super::login::SessionRow;
use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for the whoami command
#[derive(Debug, Args)]
pub struct WhoamiArgs {
    /// Also fetch the profile from the server with the stored token
    #[arg(long)]
    pub remote: bool,
}

/// Execute the whoami command
pub async fn execute(
    args: &WhoamiArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    match ctx.manager.current()? {
        SessionLookup::Present(session) => {
            let row = SessionRow::from_session(&session);
            output::print_record(&row, format);
            if format.is_table() {
                output::print_kv("Home", ctx.access.home_for(&session));
            }
        }
        SessionLookup::Absent => match format {
            OutputFormat::Table => output::print_warning("Not signed in"),
            OutputFormat::Json => output::print_json(&json!({ "session": null })),
        },
        SessionLookup::Corrupted(kind) => match format {
            OutputFormat::Table => output::print_warning(&UserNotice::SessionCorrupted.to_string()),
            OutputFormat::Json => {
                output::print_json(&json!({ "session": null, "corrupted": kind.to_string() }))
            }
        },
    }

    if args.remote {
        let response = ctx.api.profile().await?;
        if !response.is_success() {
            return Err(AppError::external_service(format!(
                "Profile request failed with HTTP {}",
                response.status
            )));
        }
        output::print_json(&response.body);
    }
    Ok(())
}
