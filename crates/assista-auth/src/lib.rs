//! # assista-auth
//!
//! The authentication and authorization control plane of the LegalAssista
//! client.
//!
//! ## Modules
//!
//! - `role`: raw role strings (`ABOGADO`, `rol` vs `role`) to canonical roles
//! - `user`: raw server user objects to [`User`](assista_entity::User)
//! - `client`: login negotiation across request encodings, with fencing
//! - `session`: atomic session persistence and the login/logout lifecycle
//! - `guard`: route access decisions and the navigation side of them
//! - `notice`: user-facing text for each failure kind

pub mod client;
pub mod error;
pub mod guard;
pub mod notice;
pub mod role;
pub mod session;
pub mod user;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{AuthClient, LoginAttempt, LoginFence, LoginTicket};
pub use error::{AttemptFailure, FailureCause, LoginError};
pub use guard::{
    AccessController, Decision, GuardError, HomePaths, Redirect, RedirectReason, RouteGuard,
    RouteTable,
};
pub use notice::UserNotice;
pub use role::{RoleMissing, RoleNormalizer};
pub use session::{Corruption, LoginSuccess, SessionLookup, SessionManager, SessionStore};
