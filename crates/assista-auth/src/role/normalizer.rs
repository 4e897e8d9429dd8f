//! Maps heterogeneous role representations to the canonical [`Role`].
//!
//! Servers and older stored records spell roles in several ways: `ADMIN`,
//! `Abogado`, `cliente`, Python enum reprs such as `RolUsuario.ABOGADO`, and
//! under either a `role` or a `rol` key. Matching is case-insensitive against
//! a fixed synonym table. Nothing is ever defaulted.

use serde_json::{Map, Value};
use thiserror::Error;

use assista_entity::user::Role;

/// Field names that may carry the role, in lookup order.
const ROLE_KEYS: [&str; 2] = ["role", "rol"];

/// Synonym table. Keys are lowercase.
const SYNONYMS: &[(&str, Role)] = &[
    ("admin", Role::Admin),
    ("administrator", Role::Admin),
    ("administrador", Role::Admin),
    ("administradora", Role::Admin),
    ("lawyer", Role::Lawyer),
    ("attorney", Role::Lawyer),
    ("abogado", Role::Lawyer),
    ("abogada", Role::Lawyer),
    ("client", Role::Client),
    ("customer", Role::Client),
    ("cliente", Role::Client),
];

/// No recognizable role was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no recognizable role")]
pub struct RoleMissing;

/// Stateless role normalizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleNormalizer;

impl RoleNormalizer {
    /// Normalize a raw role string.
    pub fn normalize(raw: Option<&str>) -> Result<Role, RoleMissing> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or(RoleMissing)?;

        // `RolUsuario.ABOGADO` → `ABOGADO`
        let tail = raw.rsplit('.').next().unwrap_or(raw).trim();
        let lowered = tail.to_lowercase();

        SYNONYMS
            .iter()
            .find(|(name, _)| *name == lowered)
            .map(|(_, role)| *role)
            .ok_or(RoleMissing)
    }

    /// Infer the role of a raw user object.
    ///
    /// Looks at `role` then `rol` (key match is case-insensitive). A value
    /// may be a string or an object with a `name` or `value` string. The
    /// first recognizable candidate wins.
    pub fn from_user(user: &Value) -> Result<Role, RoleMissing> {
        let object = user.as_object().ok_or(RoleMissing)?;

        ROLE_KEYS
            .iter()
            .filter_map(|key| field_ci(object, key))
            .find_map(|value| Self::normalize(role_text(value)).ok())
            .ok_or(RoleMissing)
    }
}

/// Case-insensitive key lookup; an exact match takes precedence.
fn field_ci<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    })
}

fn role_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => Some(s),
        Value::Object(inner) => ["name", "value"]
            .iter()
            .find_map(|k| inner.get(*k).and_then(Value::as_str)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_abogado_is_lawyer() {
        assert_eq!(
            RoleNormalizer::from_user(&json!({ "role": "Abogado" })),
            Ok(Role::Lawyer)
        );
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(RoleNormalizer::normalize(Some("  ADMIN ")), Ok(Role::Admin));
        assert_eq!(RoleNormalizer::normalize(Some("Cliente")), Ok(Role::Client));
        assert_eq!(RoleNormalizer::normalize(Some("LaWyEr")), Ok(Role::Lawyer));
    }

    #[test]
    fn test_enum_repr() {
        assert_eq!(
            RoleNormalizer::normalize(Some("RolUsuario.ABOGADO")),
            Ok(Role::Lawyer)
        );
    }

    #[test]
    fn test_never_guesses() {
        assert_eq!(RoleNormalizer::normalize(None), Err(RoleMissing));
        assert_eq!(RoleNormalizer::normalize(Some("")), Err(RoleMissing));
        assert_eq!(RoleNormalizer::normalize(Some("superuser")), Err(RoleMissing));
        assert_eq!(RoleNormalizer::from_user(&json!({})), Err(RoleMissing));
        assert_eq!(RoleNormalizer::from_user(&json!("admin")), Err(RoleMissing));
        assert_eq!(RoleNormalizer::from_user(&json!({ "role": 3 })), Err(RoleMissing));
    }

    #[test]
    fn test_rol_key_and_mixed_case_keys() {
        assert_eq!(
            RoleNormalizer::from_user(&json!({ "rol": "CLIENTE" })),
            Ok(Role::Client)
        );
        assert_eq!(
            RoleNormalizer::from_user(&json!({ "Role": "admin" })),
            Ok(Role::Admin)
        );
    }

    #[test]
    fn test_falls_through_unrecognizable_role_to_rol() {
        assert_eq!(
            RoleNormalizer::from_user(&json!({ "role": "", "rol": "abogado" })),
            Ok(Role::Lawyer)
        );
    }

    #[test]
    fn test_object_valued_role() {
        assert_eq!(
            RoleNormalizer::from_user(&json!({ "role": { "name": "ADMIN" } })),
            Ok(Role::Admin)
        );
    }

    #[test]
    fn test_idempotent_on_canonical_input() {
        for role in Role::ALL {
            let once = RoleNormalizer::normalize(Some(role.as_str())).unwrap();
            let twice = RoleNormalizer::normalize(Some(once.as_str())).unwrap();
            assert_eq!(once, role);
            assert_eq!(twice, once);
        }
    }
}
