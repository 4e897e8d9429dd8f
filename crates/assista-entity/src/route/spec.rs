//! Which canonical roles may render a view.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::user::Role;

/// Access declaration for one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// Path the view is mounted at.
    pub path: String,
    /// `None` means any authenticated session may render the view.
    pub allowed_roles: Option<BTreeSet<Role>>,
}

impl RouteSpec {
    /// A view open to any authenticated session.
    pub fn any_authenticated(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            allowed_roles: None,
        }
    }

    /// A view restricted to the given roles.
    pub fn restricted(path: impl Into<String>, roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            path: path.into(),
            allowed_roles: Some(roles.into_iter().collect()),
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles
            .as_ref()
            .is_none_or(|roles| roles.contains(&role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_any_authenticated_allows_every_role() {
        let spec = RouteSpec::any_authenticated("/dashboard");
        assert!(Role::ALL.iter().all(|r| spec.allows(*r)));
    }

    #[test]
    fn test_restricted() {
        let spec = RouteSpec::restricted("/admin/usuarios", [Role::Admin]);
        assert!(spec.allows(Role::Admin));
        assert!(!spec.allows(Role::Client));
    }
}
