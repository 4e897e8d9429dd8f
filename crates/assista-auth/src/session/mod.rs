//! Session persistence and lifecycle.

pub mod manager;
pub mod store;

pub use manager::{LoginSuccess, SessionManager};
pub use store::{Corruption, SessionLookup, SessionStore};
