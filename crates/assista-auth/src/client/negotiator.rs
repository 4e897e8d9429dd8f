//! Login negotiation across request encodings.
//!
//! The backend's accepted login encoding varies by deployment. The client
//! tries each configured encoding in order and keeps the first response
//! that yields a usable session. A 401 is definitive and ends the loop;
//! anything else that fails is recorded and the next encoding is tried.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use assista_core::config::ApiConfig;
use assista_core::traits::transport::LoginTransport;
use assista_core::types::{Credentials, LoginEncoding};
use assista_entity::session::Session;

use super::fence::{LoginFence, LoginTicket};
use super::response::{parse_success, rejection_message};
use crate::error::{AttemptFailure, FailureCause, LoginError};

/// Result of one `authenticate` call, tagged with its fence ticket.
#[derive(Debug)]
pub struct LoginAttempt {
    pub ticket: LoginTicket,
    pub result: Result<Session, LoginError>,
}

/// Negotiates the login call. Never touches session storage.
#[derive(Debug)]
pub struct AuthClient {
    transport: Arc<dyn LoginTransport>,
    encodings: Vec<LoginEncoding>,
    fence: LoginFence,
}

impl AuthClient {
    /// Create a client trying `encodings` in order. An empty list falls back
    /// to [`LoginEncoding::DEFAULT_ORDER`].
    pub fn new(transport: Arc<dyn LoginTransport>, encodings: Vec<LoginEncoding>) -> Self {
        let encodings = if encodings.is_empty() {
            LoginEncoding::DEFAULT_ORDER.to_vec()
        } else {
            encodings
        };
        Self {
            transport,
            encodings,
            fence: LoginFence::new(),
        }
    }

    pub fn from_config(transport: Arc<dyn LoginTransport>, config: &ApiConfig) -> Self {
        Self::new(transport, config.encodings.clone())
    }

    pub fn encodings(&self) -> &[LoginEncoding] {
        &self.encodings
    }

    pub fn fence(&self) -> &LoginFence {
        &self.fence
    }

    /// Issue a ticket and negotiate. The caller compares the ticket against
    /// [`LoginFence::is_latest`] before acting on the result.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> LoginAttempt {
        let ticket = self.fence.issue();
        let credentials = Credentials::new(identifier.trim(), secret);
        let result = self.negotiate(ticket, &credentials).await;
        LoginAttempt { ticket, result }
    }

    async fn negotiate(
        &self,
        ticket: LoginTicket,
        credentials: &Credentials,
    ) -> Result<Session, LoginError> {
        if !credentials.is_complete() {
            return Err(LoginError::InvalidInput(
                "identifier and password are required".to_string(),
            ));
        }

        let seq = ticket.seq;
        let mut attempts = Vec::with_capacity(self.encodings.len());

        for &encoding in &self.encodings {
            debug!(seq, encoding = %encoding, "Attempting login");

            let cause = match self.transport.submit(encoding, credentials).await {
                Err(err) => FailureCause::Transport(err),
                Ok(response) if response.is_unauthorized() => {
                    let message = rejection_message(&response.body);
                    warn!(seq, encoding = %encoding, status = response.status, "Credentials rejected");
                    return Err(LoginError::CredentialsRejected { message, encoding });
                }
                Ok(response) if !response.is_success() => FailureCause::HttpStatus(response.status),
                Ok(response) => match parse_success(&response.body) {
                    Ok((token, user)) => {
                        info!(
                            seq,
                            encoding = %encoding,
                            user_id = %user.id,
                            role = ?user.role,
                            "Login succeeded"
                        );
                        return Ok(Session::fresh(token, user));
                    }
                    Err(cause) => cause,
                },
            };

            warn!(seq, encoding = %encoding, cause = %cause, "Login attempt failed, trying next encoding");
            attempts.push(AttemptFailure { encoding, cause });
        }

        error!(seq, attempts = attempts.len(), "All login encodings failed");
        Err(LoginError::NegotiationExhausted { attempts })
    }
}
