//! Login transport over reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::Form;
use tracing::debug;

use assista_core::config::ApiConfig;
use assista_core::error::{AppError, ErrorKind};
use assista_core::result::AppResult;
use assista_core::traits::transport::LoginTransport;
use assista_core::types::{Credentials, LoginEncoding, TransportError, TransportResponse};

/// Posts credentials to the configured login URL.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    login_url: String,
    identifier_field: String,
}

impl ReqwestTransport {
    pub fn new(config: &ApiConfig) -> AppResult<Self> {
        let http = build_http_client(config)?;
        Ok(Self::with_client(http, config))
    }

    /// Reuse an existing client, e.g. the one shared with [`ApiClient`](crate::ApiClient).
    pub fn with_client(http: reqwest::Client, config: &ApiConfig) -> Self {
        Self {
            http,
            login_url: config.login_url(),
            identifier_field: config.identifier_field.clone(),
        }
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait]
impl LoginTransport for ReqwestTransport {
    async fn submit(
        &self,
        encoding: LoginEncoding,
        credentials: &Credentials,
    ) -> Result<TransportResponse, TransportError> {
        let request = self.http.post(&self.login_url);
        let request = match encoding {
            LoginEncoding::Form => request.form(&credentials.form_fields(&self.identifier_field)),
            LoginEncoding::Json => request.json(&credentials.json_body(&self.identifier_field)),
            LoginEncoding::Multipart => {
                let form = credentials
                    .form_fields(&self.identifier_field)
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                request.multipart(form)
            }
        };

        debug!(encoding = %encoding, url = %self.login_url, "POST login");
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(transport_error)?;
        debug!(encoding = %encoding, status, "Login response received");

        Ok(TransportResponse::new(status, body))
    }
}

/// Build the shared HTTP client with the configured timeout.
pub fn build_http_client(config: &ApiConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .build()
        .map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })
}

pub(crate) fn transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Request(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::Router;
    use axum::http::{HeaderMap, StatusCode, header};
    use axum::routing::post;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Echoes back which encoding arrived and what identifier it carried.
    async fn echo(headers: HeaderMap, body: String) -> (StatusCode, String) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let kind = if content_type.starts_with("application/x-www-form-urlencoded") {
            assert!(body.contains("username=ana%40example.com"));
            assert!(body.contains("password=pw"));
            "form"
        } else if content_type.starts_with("application/json") {
            let value: serde_json::Value = serde_json::from_str(&body).unwrap();
            assert_eq!(value["email"], "ana@example.com");
            assert_eq!(value["username"], "ana@example.com");
            "json"
        } else if content_type.starts_with("multipart/form-data") {
            assert!(body.contains("name=\"username\""));
            assert!(body.contains("ana@example.com"));
            "multipart"
        } else {
            return (StatusCode::UNSUPPORTED_MEDIA_TYPE, String::new());
        };
        (StatusCode::OK, format!(r#"{{"received":"{kind}"}}"#))
    }

    fn config(base: &str) -> ApiConfig {
        ApiConfig::with_base_url(format!("{base}/api"))
    }

    #[tokio::test]
    async fn test_each_encoding_reaches_server() {
        let base = serve(Router::new().route("/api/v1/auth/login", post(echo))).await;
        let transport = ReqwestTransport::new(&config(&base)).unwrap();
        let credentials = Credentials::new("ana@example.com", "pw");

        for encoding in LoginEncoding::DEFAULT_ORDER {
            let response = transport.submit(encoding, &credentials).await.unwrap();
            assert_eq!(response.status, 200);
            assert_eq!(
                response.body,
                format!(r#"{{"received":"{}"}}"#, encoding.as_str())
            );
        }
    }

    #[tokio::test]
    async fn test_status_passed_through() {
        let router = Router::new().route(
            "/api/v1/auth/login",
            post(|| async { (StatusCode::UNAUTHORIZED, r#"{"detail":"no"}"#) }),
        );
        let base = serve(router).await;
        let transport = ReqwestTransport::new(&config(&base)).unwrap();

        let response = transport
            .submit(LoginEncoding::Json, &Credentials::new("a", "b"))
            .await
            .unwrap();
        assert!(response.is_unauthorized());
        assert_eq!(response.body, r#"{"detail":"no"}"#);
    }

    #[tokio::test]
    async fn test_timeout_classified() {
        let router = Router::new().route(
            "/api/v1/auth/login",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                StatusCode::OK
            }),
        );
        let base = serve(router).await;
        let mut api = config(&base);
        api.timeout_seconds = 1;
        let transport = ReqwestTransport::new(&api).unwrap();

        let err = transport
            .submit(LoginEncoding::Form, &Credentials::new("a", "b"))
            .await
            .unwrap_err();
        assert_eq!(err, TransportError::Timeout);
    }

    #[tokio::test]
    async fn test_refused_connection_classified() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = ReqwestTransport::new(&config(&format!("http://{addr}"))).unwrap();
        let err = transport
            .submit(LoginEncoding::Json, &Credentials::new("a", "b"))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Connect(_)));
    }
}
