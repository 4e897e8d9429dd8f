//! Applies guard decisions: reads the store, clears corruption, navigates.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use assista_core::result::AppResult;
use assista_core::traits::navigator::{NavigateOptions, Navigator};
use assista_entity::session::Session;

use super::decision::{Decision, GuardError, RedirectReason};
use super::route_guard::RouteGuard;
use super::table::RouteTable;
use crate::session::{SessionLookup, SessionStore};

/// Entry point for view transitions.
pub struct AccessController {
    store: Arc<SessionStore>,
    guard: RouteGuard,
    navigator: Arc<dyn Navigator>,
}

impl AccessController {
    pub fn new(
        store: Arc<SessionStore>,
        routes: Arc<RouteTable>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            store,
            guard: RouteGuard::new(routes),
            navigator,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        self.guard.routes()
    }

    /// Decide whether `view` may render for the stored session.
    ///
    /// Redirects are performed through the navigator before returning.
    pub fn enter(&self, view: &str) -> AppResult<Decision> {
        let Some(spec) = self.guard.routes().view(view) else {
            warn!(view, "Unknown view requested");
            return Ok(Decision::Error(GuardError::UnknownView(view.to_string())));
        };

        let lookup = self.store.get()?;
        let decision = self.guard.decide(&lookup, spec);

        match &decision {
            Decision::Render => debug!(view, "Render"),
            Decision::Redirect(redirect) => {
                match redirect.reason {
                    RedirectReason::CorruptedSession => {
                        self.store.clear()?;
                        warn!(view, reason = %redirect.reason, target = %redirect.target, "Redirecting");
                    }
                    RedirectReason::Unauthenticated => {
                        info!(view, reason = %redirect.reason, target = %redirect.target, "Redirecting");
                    }
                    RedirectReason::RoleMismatch => {
                        debug!(view, reason = %redirect.reason, target = %redirect.target, "Redirecting");
                    }
                }
                self.navigator.navigate(
                    &redirect.target,
                    NavigateOptions {
                        replace: redirect.replace,
                    },
                );
            }
            Decision::Error(err) => {
                let user_id = lookup.session().map(|s| s.user.id.as_str()).unwrap_or("");
                error!(view, user_id, error = %err, "View cannot be rendered");
            }
        }

        Ok(decision)
    }

    /// Current session lookup, without deciding anything.
    pub fn current(&self) -> AppResult<SessionLookup> {
        self.store.get()
    }

    /// Post-login landing path for `session`.
    pub fn home_for(&self, session: &Session) -> &str {
        self.guard.routes().landing(session)
    }
}
