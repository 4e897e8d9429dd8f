//! # assista-entity
//!
//! Domain entities for the LegalAssista client: canonical roles, the
//! authenticated user, the client-held session, and route declarations.

pub mod route;
pub mod session;
pub mod user;

pub use route::RouteSpec;
pub use session::Session;
pub use user::{Role, User};
