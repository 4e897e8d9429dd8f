//! The static route table: login path, per-role homes, guarded views.

use std::collections::BTreeMap;

use assista_core::config::RoutesConfig;
use assista_core::error::AppError;
use assista_core::result::AppResult;
use assista_entity::route::RouteSpec;
use assista_entity::session::Session;
use assista_entity::user::Role;

use crate::role::RoleNormalizer;

/// Landing path for every role. Total by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomePaths {
    pub admin: String,
    pub lawyer: String,
    pub client: String,
}

impl HomePaths {
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Admin => &self.admin,
            Role::Lawyer => &self.lawyer,
            Role::Client => &self.client,
        }
    }
}

/// Route table with role names already normalized.
#[derive(Debug, Clone)]
pub struct RouteTable {
    login: String,
    homes: HomePaths,
    views: BTreeMap<String, RouteSpec>,
}

impl RouteTable {
    pub fn new(
        login: impl Into<String>,
        homes: HomePaths,
        views: BTreeMap<String, RouteSpec>,
    ) -> Self {
        Self {
            login: login.into(),
            homes,
            views,
        }
    }

    /// Build the table from configuration.
    ///
    /// Role names in `homes` keys and view `roles` go through the
    /// [`RoleNormalizer`]; an unrecognized name or a role without a home is
    /// a configuration error.
    pub fn from_config(config: &RoutesConfig) -> AppResult<Self> {
        let mut homes: BTreeMap<Role, String> = BTreeMap::new();
        for (name, path) in &config.homes {
            let role = config_role(name, "routes.homes")?;
            homes.insert(role, path.clone());
        }
        let mut home_of = |role: Role| {
            homes.remove(&role).ok_or_else(|| {
                AppError::configuration(format!("routes.homes has no entry for role '{role}'"))
            })
        };
        let homes = HomePaths {
            admin: home_of(Role::Admin)?,
            lawyer: home_of(Role::Lawyer)?,
            client: home_of(Role::Client)?,
        };

        let mut views = BTreeMap::new();
        for (name, view) in &config.views {
            let spec = match &view.roles {
                None => RouteSpec::any_authenticated(&view.path),
                Some(names) => {
                    let context = format!("routes.views.{name}.roles");
                    let roles = names
                        .iter()
                        .map(|raw| config_role(raw, &context))
                        .collect::<AppResult<Vec<_>>>()?;
                    RouteSpec::restricted(&view.path, roles)
                }
            };
            views.insert(name.clone(), spec);
        }

        Ok(Self::new(config.login.clone(), homes, views))
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn homes(&self) -> &HomePaths {
        &self.homes
    }

    pub fn home(&self, role: Role) -> &str {
        self.homes.get(role)
    }

    /// Where to land after login: the role's home, or the login path for a
    /// session without a role.
    pub fn landing(&self, session: &Session) -> &str {
        session
            .role()
            .map_or(self.login.as_str(), |role| self.homes.get(role))
    }

    pub fn view(&self, name: &str) -> Option<&RouteSpec> {
        self.views.get(name)
    }

    /// Views in name order.
    pub fn views(&self) -> impl Iterator<Item = (&str, &RouteSpec)> {
        self.views.iter().map(|(name, spec)| (name.as_str(), spec))
    }
}

fn config_role(raw: &str, context: &str) -> AppResult<Role> {
    RoleNormalizer::normalize(Some(raw))
        .map_err(|_| AppError::configuration(format!("{context}: unknown role '{raw}'")))
}
