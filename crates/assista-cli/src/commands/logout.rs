//! `assista logout`

use serde_json::json;

use assista_core::error::AppError;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Execute the logout command
pub fn execute(ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let login = ctx.manager.logout()?;
    match format {
        OutputFormat::Table => {
            output::print_success("Signed out");
            output::print_kv("Next", &login);
        }
        OutputFormat::Json => output::print_json(&json!({ "signed_out": true, "next": login })),
    }
    Ok(())
}
