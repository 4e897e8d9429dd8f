//! Authentication API location and login negotiation settings.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::LoginEncoding;

/// Where the authentication API lives and how to talk to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend origin. A trailing `/api` segment is tolerated and stripped.
    #[serde(default = "default_base_url")]
    base_url: String,
    /// Prefix prepended to every API path.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Login path relative to the prefix.
    #[serde(default = "default_login_path")]
    pub login_path: String,
    /// Profile path relative to the prefix, read with the bearer token.
    #[serde(default = "default_profile_path")]
    pub profile_path: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Login body encodings, tried in this order.
    #[serde(default = "default_encodings")]
    pub encodings: Vec<LoginEncoding>,
    /// Name of the identifier field in form and multipart bodies.
    #[serde(default = "default_identifier_field")]
    pub identifier_field: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            login_path: default_login_path(),
            profile_path: default_profile_path(),
            timeout_seconds: default_timeout(),
            encodings: default_encodings(),
            identifier_field: default_identifier_field(),
        }
    }
}

impl ApiConfig {
    /// Build a config pointing at `base_url` with default settings.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// The sanitized backend origin: trailing slashes and a trailing `/api`
    /// segment removed, so the prefix is never doubled.
    pub fn base_url(&self) -> String {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        trimmed
            .strip_suffix("/api")
            .unwrap_or(trimmed)
            .trim_end_matches('/')
            .to_string()
    }

    /// Absolute URL for an API path, e.g. `endpoint("/users/me")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}{}{}",
            self.base_url(),
            normalize_segment(&self.prefix),
            normalize_segment(path)
        )
    }

    pub fn login_url(&self) -> String {
        self.endpoint(&self.login_path)
    }

    pub fn profile_url(&self) -> String {
        self.endpoint(&self.profile_path)
    }

    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if self.base_url().is_empty() {
            return Err(AppError::configuration("api.base_url must not be empty"));
        }
        if self.timeout_seconds == 0 {
            return Err(AppError::configuration(
                "api.timeout_seconds must be greater than zero",
            ));
        }
        if self.encodings.is_empty() {
            return Err(AppError::configuration(
                "api.encodings must list at least one encoding",
            ));
        }
        for (i, encoding) in self.encodings.iter().enumerate() {
            if self.encodings[..i].contains(encoding) {
                return Err(AppError::configuration(format!(
                    "api.encodings lists '{encoding}' more than once"
                )));
            }
        }
        if self.identifier_field.trim().is_empty() {
            return Err(AppError::configuration(
                "api.identifier_field must not be empty",
            ));
        }
        Ok(())
    }
}

/// `"api/v1/"` → `"/api/v1"`, `""` → `""`.
fn normalize_segment(segment: &str) -> String {
    let trimmed = segment.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_prefix() -> String {
    "/api/v1".to_string()
}

fn default_login_path() -> String {
    "/auth/login".to_string()
}

fn default_profile_path() -> String {
    "/users/me".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_encodings() -> Vec<LoginEncoding> {
    LoginEncoding::DEFAULT_ORDER.to_vec()
}

fn default_identifier_field() -> String {
    "username".to_string()
}
