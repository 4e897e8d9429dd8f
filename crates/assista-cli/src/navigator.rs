//! Navigator for a terminal host: there is no view stack, so redirects are
//! logged and remembered for the command to report.

use std::sync::Mutex;

use tracing::info;

use assista_core::traits::navigator::{NavigateOptions, Navigator};

#[derive(Debug, Default)]
pub struct TerminalNavigator {
    last: Mutex<Option<(String, NavigateOptions)>>,
}

impl TerminalNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent navigation, if any.
    pub fn last(&self) -> Option<(String, NavigateOptions)> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        info!(path, replace = options.replace, "Navigate");
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some((path.to_string(), options));
    }
}
