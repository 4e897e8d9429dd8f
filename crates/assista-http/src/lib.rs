//! # assista-http
//!
//! HTTP side of the LegalAssista client:
//!
//! - [`ReqwestTransport`] implements the login
//!   [`LoginTransport`](assista_core::traits::LoginTransport) for every
//!   request encoding
//! - [`ApiClient`] issues API requests carrying the stored bearer token

pub mod client;
pub mod transport;

pub use client::{ApiClient, ApiResponse};
pub use transport::ReqwestTransport;
