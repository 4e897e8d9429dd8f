//! Shared value types exchanged between the core traits and their
//! implementations.

pub mod encoding;
pub mod login;

pub use encoding::LoginEncoding;
pub use login::{Credentials, TransportError, TransportResponse};
