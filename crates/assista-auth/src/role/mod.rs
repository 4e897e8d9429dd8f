//! Role normalization.

pub mod normalizer;

pub use normalizer::{RoleMissing, RoleNormalizer};
