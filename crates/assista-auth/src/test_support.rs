//! In-memory transports for unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use assista_core::traits::transport::LoginTransport;
use assista_core::types::{Credentials, LoginEncoding, TransportError, TransportResponse};

/// Answers each encoding with a fixed reply and records the call order.
/// Encodings without a reply get a 404.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    replies: HashMap<LoginEncoding, Result<TransportResponse, TransportError>>,
    calls: Mutex<Vec<LoginEncoding>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(mut self, encoding: LoginEncoding, status: u16, body: &str) -> Self {
        self.replies
            .insert(encoding, Ok(TransportResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(mut self, encoding: LoginEncoding, error: TransportError) -> Self {
        self.replies.insert(encoding, Err(error));
        self
    }

    pub(crate) fn calls(&self) -> Vec<LoginEncoding> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginTransport for ScriptedTransport {
    async fn submit(
        &self,
        encoding: LoginEncoding,
        _credentials: &Credentials,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(encoding);
        self.replies
            .get(&encoding)
            .cloned()
            .unwrap_or_else(|| Ok(TransportResponse::new(404, "")))
    }
}

/// Each call waits for the next queued channel to deliver its response, so
/// a test controls the order in which concurrent logins complete.
#[derive(Debug, Default)]
pub(crate) struct GatedTransport {
    gates: Mutex<VecDeque<oneshot::Receiver<TransportResponse>>>,
}

impl GatedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a gate for the next call and return its sender.
    pub(crate) fn gate(&self) -> oneshot::Sender<TransportResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().push_back(rx);
        tx
    }
}

#[async_trait]
impl LoginTransport for GatedTransport {
    async fn submit(
        &self,
        _encoding: LoginEncoding,
        _credentials: &Credentials,
    ) -> Result<TransportResponse, TransportError> {
        let gate = self.gates.lock().unwrap().pop_front();
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| TransportError::Request("gate dropped".to_string())),
            None => Err(TransportError::Connect("no gate queued".to_string())),
        }
    }
}

pub(crate) fn success_body(token: &str, role: &str) -> String {
    format!(
        r#"{{"access_token":"{token}","token_type":"bearer","user":{{"id":1,"email":"ana@example.com","nombre":"Ana","role":"{role}"}}}}"#
    )
}
