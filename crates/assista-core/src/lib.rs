//! # assista-core
//!
//! Core crate for the LegalAssista client. Contains the collaborator traits
//! (persistence, navigation, login transport), configuration schemas, login
//! wire types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other LegalAssista crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
