//! Collaborator traits defined in `assista-core` and implemented by other
//! crates or by the host UI.

pub mod navigator;
pub mod storage;
pub mod transport;

pub use navigator::{NavigateOptions, Navigator};
pub use storage::KeyValueStorage;
pub use transport::LoginTransport;
