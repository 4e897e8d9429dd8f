//! Navigation collaborator owned by the host UI framework.

/// Options for a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl NavigateOptions {
    pub fn replace() -> Self {
        Self { replace: true }
    }
}

/// Performs the actual view transition. Only the consumer of a guard
/// redirect calls this.
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str, options: NavigateOptions);
}
