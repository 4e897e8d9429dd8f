//! The route access decision.

use std::sync::Arc;

use assista_entity::route::RouteSpec;

use super::decision::{Decision, GuardError, Redirect, RedirectReason};
use super::table::RouteTable;
use crate::session::SessionLookup;

/// Pure decision engine over a session lookup and a view's access rule.
///
/// Performs no I/O; the same inputs always give the same decision.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    routes: Arc<RouteTable>,
}

impl RouteGuard {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn decide(&self, lookup: &SessionLookup, spec: &RouteSpec) -> Decision {
        let session = match lookup {
            SessionLookup::Absent => {
                return Decision::Redirect(Redirect::to_login(
                    self.routes.login(),
                    RedirectReason::Unauthenticated,
                    &spec.path,
                ));
            }
            SessionLookup::Corrupted(_) => {
                return Decision::Redirect(Redirect::to_login(
                    self.routes.login(),
                    RedirectReason::CorruptedSession,
                    &spec.path,
                ));
            }
            SessionLookup::Present(session) => session,
        };

        let Some(role) = session.role() else {
            return Decision::Error(GuardError::MissingRole);
        };

        if spec.allows(role) {
            Decision::Render
        } else {
            Decision::Redirect(Redirect::to_home(self.routes.home(role)))
        }
    }
}
