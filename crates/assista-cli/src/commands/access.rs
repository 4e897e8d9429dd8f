//! `assista access <view>`

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use assista_auth::{Decision, GuardError, UserNotice};
use assista_core::error::AppError;

use crate::context::AppContext;
use crate::output::{self, OutputFormat};

/// Arguments for the access command
#[derive(Debug, Args)]
pub struct AccessArgs {
    /// View name from the route table (see `assista routes`)
    pub view: String,
}

/// Decision display row
#[derive(Debug, Serialize, Tabled)]
struct DecisionRow {
    view: String,
    decision: String,
    target: String,
    reason: String,
    return_to: String,
}

impl DecisionRow {
    fn new(view: &str, decision: &Decision) -> Self {
        let (kind, target, reason, return_to) = match decision {
            Decision::Render => ("render", String::new(), String::new(), String::new()),
            Decision::Redirect(redirect) => (
                "redirect",
                redirect.target.clone(),
                redirect.reason.to_string(),
                redirect.return_to.clone().unwrap_or_default(),
            ),
            Decision::Error(err) => ("error", String::new(), err.to_string(), String::new()),
        };
        Self {
            view: view.to_string(),
            decision: kind.to_string(),
            target,
            reason,
            return_to,
        }
    }
}

/// Execute the access command
pub fn execute(args: &AccessArgs, ctx: &AppContext, format: OutputFormat) -> Result<(), AppError> {
    let decision = ctx.access.enter(&args.view)?;

    output::print_record(&DecisionRow::new(&args.view, &decision), format);
    if format.is_table() {
        if let Some((path, _)) = ctx.navigator.last() {
            output::print_kv("Navigated to", &path);
        }
        if let Some(notice) = UserNotice::for_decision(&decision) {
            output::print_warning(&notice.to_string());
        }
    }

    match decision {
        Decision::Render | Decision::Redirect(_) => Ok(()),
        Decision::Error(GuardError::MissingRole) => Err(AppError::authorization(
            "The stored session has no recognizable role",
        )),
        Decision::Error(GuardError::UnknownView(view)) => {
            Err(AppError::not_found(format!("Unknown view '{view}'")))
        }
    }
}

#[cfg(test)]
mod tests {
    use assista_auth::{Redirect, RedirectReason};

    use super::*;

    #[test]
    fn test_row_for_login_redirect() {
        let decision = Decision::Redirect(Redirect::to_login(
            "/login",
            RedirectReason::Unauthenticated,
            "/chat",
        ));
        let row = DecisionRow::new("chat", &decision);
        assert_eq!(row.decision, "redirect");
        assert_eq!(row.target, "/login");
        assert_eq!(row.reason, "unauthenticated");
        assert_eq!(row.return_to, "/chat");
    }

    #[test]
    fn test_row_for_render() {
        let row = DecisionRow::new("chat", &Decision::Render);
        assert_eq!(row.decision, "render");
        assert!(row.target.is_empty());
    }
}
