//! File-backed storage backend.

pub mod store;

pub use store::FileStorage;
