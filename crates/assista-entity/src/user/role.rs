//! Canonical role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The only role values the route guard ever compares against.
///
/// Raw server strings (`ABOGADO`, `Cliente`, `rol` vs `role`) are turned into
/// this enum once, by the role normalizer in `assista-auth`. `FromStr` here
/// only accepts the canonical spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Platform administrator.
    Admin,
    /// Lawyer handling client cases.
    Lawyer,
    /// Client (worker) seeking advice.
    Client,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Role; 3] = [Self::Admin, Self::Lawyer, Self::Client];

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Lawyer => "lawyer",
            Self::Client => "client",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = assista_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "lawyer" => Ok(Self::Lawyer),
            "client" => Ok(Self::Client),
            _ => Err(assista_core::AppError::validation(format!(
                "Invalid canonical role: '{s}'. Expected one of: admin, lawyer, client"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_strict() {
        assert_eq!("lawyer".parse::<Role>().unwrap(), Role::Lawyer);
        assert!("Lawyer".parse::<Role>().is_err());
        assert!("abogado".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Client).unwrap(), "\"client\"");
    }
}
