//! Route access decisions.
//!
//! [`RouteGuard`] is the pure decision function; [`AccessController`] feeds
//! it the stored session, applies the side effects (clearing a corrupted
//! store, navigating) and hands the decision back to the host.

pub mod access;
pub mod decision;
pub mod route_guard;
pub mod table;

pub use access::AccessController;
pub use decision::{Decision, GuardError, Redirect, RedirectReason};
pub use route_guard::RouteGuard;
pub use table::{HomePaths, RouteTable};
