//! Guard outcomes.

use std::fmt;

use thiserror::Error;

/// Why a view transition was redirected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RedirectReason {
    /// No session stored.
    Unauthenticated,
    /// A partial or unreadable session was found and cleared.
    CorruptedSession,
    /// The session's role may not render the view.
    RoleMismatch,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::CorruptedSession => "corrupted_session",
            Self::RoleMismatch => "role_mismatch",
        }
    }
}

impl fmt::Display for RedirectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A redirect the host must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub target: String,
    pub reason: RedirectReason,
    /// Always `true`: a guarded view never stays in history.
    pub replace: bool,
    /// For login redirects, the path the user asked for, so the host can
    /// return there after authenticating.
    pub return_to: Option<String>,
}

impl Redirect {
    pub fn to_login(login: &str, reason: RedirectReason, requested: &str) -> Self {
        Self {
            target: login.to_string(),
            reason,
            replace: true,
            return_to: Some(requested.to_string()),
        }
    }

    pub fn to_home(home: &str) -> Self {
        Self {
            target: home.to_string(),
            reason: RedirectReason::RoleMismatch,
            replace: true,
            return_to: None,
        }
    }
}

/// A view that cannot be rendered and has nowhere sensible to redirect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    /// The session has no recognizable role.
    #[error("session has no recognizable role")]
    MissingRole,
    /// The view is not in the route table.
    #[error("unknown view: {0}")]
    UnknownView(String),
}

/// What the host should do with a view transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Render,
    Redirect(Redirect),
    Error(GuardError),
}

impl Decision {
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }

    pub fn redirect(&self) -> Option<&Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }
}
