//! Login error taxonomy.

use std::fmt;

use thiserror::Error;

use assista_core::error::{AppError, ErrorKind};
use assista_core::types::{LoginEncoding, TransportError};

/// Why a single negotiation attempt was not usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureCause {
    /// No response arrived (timeout, DNS, refused connection).
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered with a non-success status other than 401.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
    /// The body was not a JSON object.
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    /// No non-empty `accessToken` / `access_token` / `token`.
    #[error("response carried no access token")]
    MissingToken,
    /// No `user` object.
    #[error("response carried no user object")]
    MissingUser,
    /// A user object whose role could not be inferred.
    #[error("user object carried no recognizable role")]
    MissingRole,
}

/// One failed attempt, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptFailure {
    pub encoding: LoginEncoding,
    pub cause: FailureCause,
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.encoding, self.cause)
    }
}

/// Outcome of a login call that did not produce a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// Identifier or secret was empty; nothing was sent.
    #[error("invalid login input: {0}")]
    InvalidInput(String),

    /// The server explicitly rejected the credentials. Definitive.
    #[error("credentials rejected: {message}")]
    CredentialsRejected {
        /// Server-provided message, shown to the user as is.
        message: String,
        /// Encoding of the attempt that was rejected.
        encoding: LoginEncoding,
    },

    /// Every encoding failed structurally and none was a rejection.
    #[error("authentication service unavailable ({})", summarize(.attempts))]
    NegotiationExhausted { attempts: Vec<AttemptFailure> },

    /// A newer login call was issued before this one finished.
    #[error("login attempt #{seq} superseded by #{latest}")]
    Superseded { seq: u64, latest: u64 },

    /// The session could not be persisted.
    #[error("failed to persist session: {0}")]
    Persistence(String),
}

impl LoginError {
    /// Whether the user should simply try again later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::NegotiationExhausted { .. } | Self::Persistence(_))
    }
}

fn summarize(attempts: &[AttemptFailure]) -> String {
    if attempts.is_empty() {
        return "no attempts made".to_string();
    }
    attempts
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<LoginError> for AppError {
    fn from(err: LoginError) -> Self {
        let kind = match &err {
            LoginError::InvalidInput(_) => ErrorKind::Validation,
            LoginError::CredentialsRejected { .. } => ErrorKind::Authentication,
            LoginError::NegotiationExhausted { .. } => ErrorKind::ExternalService,
            LoginError::Superseded { .. } => ErrorKind::Conflict,
            LoginError::Persistence(_) => ErrorKind::Storage,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_message_lists_attempts() {
        let err = LoginError::NegotiationExhausted {
            attempts: vec![
                AttemptFailure {
                    encoding: LoginEncoding::Form,
                    cause: FailureCause::HttpStatus(422),
                },
                AttemptFailure {
                    encoding: LoginEncoding::Json,
                    cause: TransportError::Timeout.into(),
                },
            ],
        };
        let text = err.to_string();
        assert!(text.contains("form: unexpected HTTP status 422"));
        assert!(text.contains("json: request timed out"));
    }

    #[test]
    fn test_app_error_kinds() {
        let rejected = LoginError::CredentialsRejected {
            message: "Incorrect email or password".to_string(),
            encoding: LoginEncoding::Json,
        };
        assert_eq!(AppError::from(rejected).kind, ErrorKind::Authentication);

        let exhausted = LoginError::NegotiationExhausted { attempts: vec![] };
        assert!(exhausted.is_retryable());
        assert_eq!(AppError::from(exhausted).kind, ErrorKind::ExternalService);
    }
}
