//! Raw server user objects to [`User`].
//!
//! Used both for login responses and for user records read back from
//! storage, so a record written by an older client version (raw server
//! shape, `rol` key, uppercase role) still restores.

use serde::Serialize;
use serde_json::{Map, Value};

use assista_entity::user::User;

use crate::role::RoleNormalizer;

const ID_KEYS: [&str; 3] = ["id", "user_id", "_id"];
const EMAIL_KEYS: [&str; 3] = ["email", "correo", "username"];
const NAME_KEYS: [&str; 6] = [
    "displayName",
    "display_name",
    "full_name",
    "nombre_completo",
    "name",
    "nombre",
];

/// Build a [`User`] from a raw JSON object. Returns `None` when `value` is
/// not an object; a missing role yields `role: None`.
pub fn user_from_value(value: &Value) -> Option<User> {
    let object = value.as_object()?;

    Some(User {
        id: first_text(object, &ID_KEYS).unwrap_or_default(),
        email: first_text(object, &EMAIL_KEYS).unwrap_or_default(),
        display_name: first_text(object, &NAME_KEYS).unwrap_or_default(),
        role: RoleNormalizer::from_user(value).ok(),
    })
}

/// Persisted shape of a user.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser<'a> {
    id: &'a str,
    email: &'a str,
    display_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
}

/// Serialize a user for storage. The role is written in canonical form.
pub fn user_to_record(user: &User) -> Result<String, serde_json::Error> {
    serde_json::to_string(&StoredUser {
        id: &user.id,
        email: &user.email,
        display_name: &user.display_name,
        role: user.role.map(|r| r.as_str()),
    })
}

fn first_text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match object.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use assista_entity::user::Role;

    use super::*;

    #[test]
    fn test_server_shape() {
        let user = user_from_value(&json!({
            "id": 42,
            "email": "ana@example.com",
            "nombre": "Ana Pérez",
            "rol": "ABOGADO"
        }))
        .unwrap();
        assert_eq!(user.id, "42");
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.display_name, "Ana Pérez");
        assert_eq!(user.role, Some(Role::Lawyer));
    }

    #[test]
    fn test_record_roundtrip_keeps_canonical_role() {
        let user = User {
            id: "1".to_string(),
            email: "root@example.com".to_string(),
            display_name: "Root".to_string(),
            role: Some(Role::Admin),
        };
        let record = user_to_record(&user).unwrap();
        assert!(record.contains(r#""role":"admin""#));
        let value: Value = serde_json::from_str(&record).unwrap();
        assert_eq!(user_from_value(&value), Some(user));
    }

    #[test]
    fn test_missing_role_kept_as_none() {
        let user = user_from_value(&json!({ "id": "9", "email": "x@example.com" })).unwrap();
        assert_eq!(user.role, None);
    }

    #[test]
    fn test_non_object_rejected() {
        assert!(user_from_value(&json!([1, 2])).is_none());
        assert!(user_from_value(&Value::Null).is_none());
    }
}
