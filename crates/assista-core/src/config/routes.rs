//! Route table configuration: login path, per-role home paths, and the
//! guarded views.
//!
//! Role names stay strings here; `assista-auth` normalizes them when it
//! builds the route table, so synonyms such as `abogado` are accepted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A guarded view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Path the view is mounted at.
    pub path: String,
    /// Roles allowed to render the view. Absent means any authenticated
    /// session.
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl ViewConfig {
    fn new(path: &str, roles: Option<&[&str]>) -> Self {
        Self {
            path: path.to_string(),
            roles: roles.map(|r| r.iter().map(|s| s.to_string()).collect()),
        }
    }
}

/// Route table configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesConfig {
    /// Where unauthenticated or corrupted sessions are sent.
    #[serde(default = "default_login")]
    pub login: String,
    /// Landing path per role. Must cover every role.
    #[serde(default = "default_homes")]
    pub homes: BTreeMap<String, String>,
    /// View name → view declaration.
    #[serde(default = "default_views")]
    pub views: BTreeMap<String, ViewConfig>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            login: default_login(),
            homes: default_homes(),
            views: default_views(),
        }
    }
}

impl RoutesConfig {
    pub(crate) fn validate(&self) -> Result<(), AppError> {
        if !self.login.starts_with('/') {
            return Err(AppError::configuration(format!(
                "routes.login must be an absolute path, got '{}'",
                self.login
            )));
        }
        for (name, view) in &self.views {
            if !view.path.starts_with('/') {
                return Err(AppError::configuration(format!(
                    "routes.views.{name}.path must be an absolute path, got '{}'",
                    view.path
                )));
            }
            if view.roles.as_ref().is_some_and(|roles| roles.is_empty()) {
                return Err(AppError::configuration(format!(
                    "routes.views.{name}.roles is empty; omit it to allow any session"
                )));
            }
        }
        Ok(())
    }
}

fn default_login() -> String {
    "/login".to_string()
}

fn default_homes() -> BTreeMap<String, String> {
    let mut homes = BTreeMap::new();
    homes.insert("admin".to_string(), "/admin/metricas".to_string());
    homes.insert("lawyer".to_string(), "/abogado".to_string());
    homes.insert("client".to_string(), "/cliente".to_string());
    homes
}

fn default_views() -> BTreeMap<String, ViewConfig> {
    let mut views = BTreeMap::new();
    views.insert(
        "admin_metrics".to_string(),
        ViewConfig::new("/admin/metricas", Some(&["admin"])),
    );
    views.insert(
        "admin_users".to_string(),
        ViewConfig::new("/admin/usuarios", Some(&["admin"])),
    );
    views.insert(
        "admin_analytics".to_string(),
        ViewConfig::new("/admin/analytics", Some(&["admin"])),
    );
    views.insert(
        "lawyer_dashboard".to_string(),
        ViewConfig::new("/abogado", Some(&["lawyer"])),
    );
    views.insert(
        "client_dashboard".to_string(),
        ViewConfig::new("/cliente", Some(&["client"])),
    );
    views.insert("dashboard".to_string(), ViewConfig::new("/dashboard", None));
    views.insert("chat".to_string(), ViewConfig::new("/chat", None));
    views.insert("documents".to_string(), ViewConfig::new("/documentos", None));
    views
}
