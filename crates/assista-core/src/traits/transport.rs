//! HTTP collaborator used by the login negotiator.

use async_trait::async_trait;

use crate::types::{Credentials, LoginEncoding, TransportError, TransportResponse};

/// Sends one login attempt with a given body encoding.
///
/// Implementations know the login URL from configuration; the negotiator
/// only picks the encoding. Any HTTP status is returned as a
/// [`TransportResponse`]; `Err` is reserved for failures where no response
/// arrived at all.
#[async_trait]
pub trait LoginTransport: Send + Sync + std::fmt::Debug {
    async fn submit(
        &self,
        encoding: LoginEncoding,
        credentials: &Credentials,
    ) -> Result<TransportResponse, TransportError>;
}
