//! `assista login`

use std::io::BufRead;

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use assista_auth::{LoginSuccess, UserNotice};
use assista_core::error::AppError;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email or username (prompted if omitted)
    #[arg(short, long)]
    pub identifier: Option<String>,

    /// Read the password from the first line of stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Session display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct SessionRow {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub restored: bool,
    pub since: String,
}

impl SessionRow {
    pub(crate) fn from_session(session: &assista_entity::Session) -> Self {
        Self {
            user_id: session.user.id.clone(),
            email: session.user.email.clone(),
            name: session.user.label().to_string(),
            role: session
                .role()
                .map_or_else(|| "-".to_string(), |r| r.to_string()),
            restored: session.restored_from_storage,
            since: session
                .authenticated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
        }
    }
}

#[derive(Serialize)]
struct LoginOutput<'a> {
    #[serde(flatten)]
    session: &'a SessionRow,
    landing: &'a str,
}

/// Execute the login command
pub async fn execute(
    args: &LoginArgs,
    ctx: &AppContext,
    format: OutputFormat,
) -> Result<(), AppError> {
    let identifier = match &args.identifier {
        Some(identifier) => identifier.clone(),
        None => dialoguer::Input::new()
            .with_prompt("Email")
            .interact_text()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let password = if args.password_stdin {
        read_password_line(std::io::stdin().lock())?
    } else {
        dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?
    };

    let LoginSuccess { session, landing } = match ctx.manager.login(&identifier, &password).await {
        Ok(success) => success,
        Err(err) => {
            if let Some(notice) = UserNotice::for_login_error(&err) {
                output::print_error(&notice.to_string());
            }
            if err.is_retryable() {
                output::print_warning("Please try again in a moment.");
            }
            return Err(err.into());
        }
    };

    let row = SessionRow::from_session(&session);
    match format {
        OutputFormat::Table => {
            output::print_success(&format!("Signed in as {} ({})", row.name, row.role));
            output::print_kv("Landing", &landing);
        }
        OutputFormat::Json => output::print_json(&LoginOutput {
            session: &row,
            landing: &landing,
        }),
    }
    Ok(())
}

fn read_password_line(mut input: impl BufRead) -> Result<String, AppError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        return Err(AppError::validation("No password received on stdin"));
    }
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_line_keeps_inner_whitespace() {
        let password = read_password_line(" s3cret pw \n".as_bytes()).unwrap();
        assert_eq!(password, " s3cret pw ");
    }

    #[test]
    fn test_empty_stdin_rejected() {
        assert!(read_password_line("".as_bytes()).is_err());
        assert!(read_password_line("\r\n".as_bytes()).is_err());
    }
}
