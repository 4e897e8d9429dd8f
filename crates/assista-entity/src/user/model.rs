//! User entity as held by the client.

use serde::{Deserialize, Serialize};

use super::role::Role;

/// The authenticated user attached to a session.
///
/// `role` is `None` when the server (or a stored record) carried no
/// recognizable role; the guard refuses such sessions instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub role: Option<Role>,
}

impl User {
    /// Name to show in the UI, falling back to the email address.
    pub fn label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            &self.email
        } else {
            &self.display_name
        }
    }
}
