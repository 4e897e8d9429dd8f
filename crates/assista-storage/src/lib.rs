//! # assista-storage
//!
//! Implementations of the [`KeyValueStorage`](assista_core::traits::KeyValueStorage)
//! collaborator:
//!
//! - **memory**: process-local map backed by [dashmap](https://crates.io/crates/dashmap)
//! - **file**: a single JSON document on disk, replaced atomically on write
//!
//! The backend is selected at runtime from `storage.backend`.

#[cfg(feature = "file")]
pub mod file;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::StorageManager;
