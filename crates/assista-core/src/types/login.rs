//! Login wire types shared by the negotiator and the HTTP transport.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

/// The identifier/secret pair submitted on login.
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    identifier: String,
    secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Whether both halves are non-empty after trimming the identifier.
    pub fn is_complete(&self) -> bool {
        !self.identifier.trim().is_empty() && !self.secret.is_empty()
    }

    /// Field pairs for form and multipart bodies.
    pub fn form_fields(&self, identifier_field: &str) -> Vec<(String, String)> {
        vec![
            (identifier_field.to_string(), self.identifier.clone()),
            ("password".to_string(), self.secret.clone()),
        ]
    }

    /// JSON body. The identifier is always sent as `email` as well, which is
    /// what JSON-only deployments read.
    pub fn json_body(&self, identifier_field: &str) -> Value {
        let mut body = Map::new();
        body.insert(
            identifier_field.to_string(),
            Value::String(self.identifier.clone()),
        );
        body.insert("email".to_string(), Value::String(self.identifier.clone()));
        body.insert("password".to_string(), Value::String(self.secret.clone()));
        Value::Object(body)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Raw response handed back by a transport: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, undecoded.
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// An explicit authentication rejection.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

/// A failure below HTTP: nothing usable came back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,
    /// The endpoint could not be reached (DNS, refused, TLS).
    #[error("connection failed: {0}")]
    Connect(String),
    /// The request could not be built or sent.
    #[error("request failed: {0}")]
    Request(String),
}
