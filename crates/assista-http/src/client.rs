//! API requests carrying the stored bearer token.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use assista_auth::session::{SessionLookup, SessionStore};
use assista_core::config::ApiConfig;
use assista_core::error::{AppError, ErrorKind};
use assista_core::result::AppResult;

use crate::transport::{build_http_client, transport_error};

/// Status and decoded body of an API call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// `Value::Null` for an empty body; a JSON string for a non-JSON body.
    pub body: Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP client rooted at `base_url + prefix`.
///
/// Every request reads the session store; a stored session adds an
/// `Authorization: Bearer` header, no session sends the request without
/// one.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    store: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, store: Arc<SessionStore>) -> AppResult<Self> {
        Ok(Self::with_client(build_http_client(config)?, config, store))
    }

    pub fn with_client(
        http: reqwest::Client,
        config: &ApiConfig,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            http,
            config: config.clone(),
            store,
        }
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Start a request to `path` (relative to the API prefix).
    pub fn request(&self, method: Method, path: &str) -> AppResult<RequestBuilder> {
        let url = self.config.endpoint(path);
        let builder = self.http.request(method.clone(), &url);

        match self.store.get()? {
            SessionLookup::Present(session) => {
                debug!(%method, %url, authorized = true, "API request");
                Ok(builder.header(AUTHORIZATION, session.bearer()))
            }
            SessionLookup::Corrupted(kind) => {
                warn!(%method, %url, corruption = %kind, "Stored session was corrupted, sending request without credentials");
                Ok(builder)
            }
            SessionLookup::Absent => {
                debug!(%method, %url, authorized = false, "API request");
                Ok(builder)
            }
        }
    }

    pub async fn get(&self, path: &str) -> AppResult<ApiResponse> {
        self.send(self.request(Method::GET, path)?).await
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> AppResult<ApiResponse> {
        self.send(self.request(Method::POST, path)?.json(body)).await
    }

    /// The current user's profile from the configured profile path.
    pub async fn profile(&self) -> AppResult<ApiResponse> {
        self.get(&self.config.profile_path).await
    }

    async fn send(&self, builder: RequestBuilder) -> AppResult<ApiResponse> {
        let response = builder.send().await.map_err(|e| {
            let cause = transport_error(e);
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("API request failed: {cause}"),
                cause,
            )
        })?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            let cause = transport_error(e);
            AppError::external_service(format!("Failed to read API response: {cause}"))
        })?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };
        Ok(ApiResponse { status, body })
    }
}
