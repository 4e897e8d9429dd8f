//! User-facing text for login failures and guard outcomes.

use std::fmt;

use crate::error::LoginError;
use crate::guard::{Decision, GuardError, RedirectReason};

/// A message the host shows the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNotice {
    /// Server message for a rejected login, shown as is.
    CredentialsRejected(String),
    MissingCredentials,
    ServiceUnavailable,
    SessionNotSaved,
    SessionCorrupted,
    MissingRole,
    UnknownView(String),
}

impl UserNotice {
    /// Notice for a failed login. A superseded login is silent.
    pub fn for_login_error(err: &LoginError) -> Option<Self> {
        match err {
            LoginError::InvalidInput(_) => Some(Self::MissingCredentials),
            LoginError::CredentialsRejected { message, .. } => {
                Some(Self::CredentialsRejected(message.clone()))
            }
            LoginError::NegotiationExhausted { .. } => Some(Self::ServiceUnavailable),
            LoginError::Persistence(_) => Some(Self::SessionNotSaved),
            LoginError::Superseded { .. } => None,
        }
    }

    /// Notice accompanying a guard decision. Plain login redirects and role
    /// mismatches need none.
    pub fn for_decision(decision: &Decision) -> Option<Self> {
        match decision {
            Decision::Render => None,
            Decision::Redirect(redirect) => match redirect.reason {
                RedirectReason::CorruptedSession => Some(Self::SessionCorrupted),
                RedirectReason::Unauthenticated | RedirectReason::RoleMismatch => None,
            },
            Decision::Error(GuardError::MissingRole) => Some(Self::MissingRole),
            Decision::Error(GuardError::UnknownView(view)) => Some(Self::UnknownView(view.clone())),
        }
    }
}

impl fmt::Display for UserNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CredentialsRejected(message) => f.write_str(message),
            Self::MissingCredentials => f.write_str("Please enter your email and password."),
            Self::ServiceUnavailable => f.write_str(
                "Cannot reach the authentication service. Please try again later.",
            ),
            Self::SessionNotSaved => {
                f.write_str("You were signed in, but the session could not be saved.")
            }
            Self::SessionCorrupted => {
                f.write_str("Your session was invalid and has been reset. Please sign in again.")
            }
            Self::MissingRole => f.write_str(
                "Your account has no assigned role. Please contact an administrator.",
            ),
            Self::UnknownView(view) => write!(f, "The page '{view}' does not exist."),
        }
    }
}
