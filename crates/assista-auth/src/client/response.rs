//! Interpretation of login response bodies.

use serde_json::{Map, Value};

use assista_entity::user::User;

use crate::error::FailureCause;
use crate::role::RoleNormalizer;
use crate::user::user_from_value;

/// Keys that may carry the bearer token, in lookup order.
const TOKEN_KEYS: [&str; 3] = ["accessToken", "access_token", "token"];

/// Shown when a 401 carries no message of its own.
pub const DEFAULT_REJECTION: &str = "Incorrect email or password";

/// Extract the token and the normalized user from a success body.
pub fn parse_success(body: &str) -> Result<(String, User), FailureCause> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| FailureCause::MalformedBody(e.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| FailureCause::MalformedBody("expected a JSON object".to_string()))?;

    let token = token_of(object).ok_or(FailureCause::MissingToken)?;

    let raw_user = object
        .get("user")
        .filter(|v| v.is_object())
        .ok_or(FailureCause::MissingUser)?;
    let role = RoleNormalizer::from_user(raw_user).map_err(|_| FailureCause::MissingRole)?;
    let mut user = user_from_value(raw_user).ok_or(FailureCause::MissingUser)?;
    user.role = Some(role);

    Ok((token, user))
}

/// The server's message for a rejection, or [`DEFAULT_REJECTION`].
///
/// Reads `detail`, `message`, then `error`. A `detail` list (validation
/// errors) contributes the `msg` of its first entry.
pub fn rejection_message(body: &str) -> String {
    let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) else {
        return DEFAULT_REJECTION.to_string();
    };

    ["detail", "message", "error"]
        .iter()
        .find_map(|key| match object.get(*key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Array(items) => items
                .first()
                .and_then(|item| item.get("msg"))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_REJECTION.to_string())
}

fn token_of(object: &Map<String, Value>) -> Option<String> {
    TOKEN_KEYS.iter().find_map(|key| {
        object
            .get(*key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    })
}
