//! In-process storage backend.

pub mod store;

pub use store::MemoryStorage;
