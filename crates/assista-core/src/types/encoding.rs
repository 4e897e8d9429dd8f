//! Request body encodings the login endpoint may accept.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A request body encoding for the login call.
///
/// The backend has historically accepted different encodings depending on
/// deployment, so the client tries them in a configured order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoginEncoding {
    /// `application/x-www-form-urlencoded` (OAuth2 password form).
    #[serde(alias = "form-urlencoded", alias = "urlencoded")]
    Form,
    /// `application/json`.
    Json,
    /// `multipart/form-data`.
    #[serde(alias = "form-data")]
    Multipart,
}

impl LoginEncoding {
    /// Default negotiation order.
    pub const DEFAULT_ORDER: [LoginEncoding; 3] = [Self::Form, Self::Json, Self::Multipart];

    /// MIME type announced for this encoding. Multipart boundaries are added
    /// by the transport.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Form => "application/x-www-form-urlencoded",
            Self::Json => "application/json",
            Self::Multipart => "multipart/form-data",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Form => "form",
            Self::Json => "json",
            Self::Multipart => "multipart",
        }
    }
}

impl fmt::Display for LoginEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoginEncoding {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "form" | "form-urlencoded" | "urlencoded" => Ok(Self::Form),
            "json" => Ok(Self::Json),
            "multipart" | "form-data" => Ok(Self::Multipart),
            _ => Err(AppError::configuration(format!(
                "Invalid login encoding: '{s}'. Expected one of: form, json, multipart"
            ))),
        }
    }
}
