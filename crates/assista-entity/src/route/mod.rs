//! Route declarations owned by the view layer.

pub mod spec;

pub use spec::RouteSpec;
