//! Login negotiation.

pub mod fence;
pub mod negotiator;
pub mod response;

pub use fence::{LoginFence, LoginTicket};
pub use negotiator::{AuthClient, LoginAttempt};
