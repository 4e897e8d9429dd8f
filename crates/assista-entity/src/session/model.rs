//! Session entity: bearer token paired with the normalized user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{Role, User};

/// The authenticated identity currently held by the client.
///
/// Token and user always travel together; a session is only ever replaced
/// wholesale, never patched field by field.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential. Never empty.
    pub token: String,
    /// The user, with its role already normalized.
    pub user: User,
    /// `true` when rebuilt from storage at startup rather than produced by
    /// a fresh login.
    pub restored_from_storage: bool,
    /// When the session was created or restored in this process.
    pub authenticated_at: DateTime<Utc>,
}

impl Session {
    /// A session produced by a successful login.
    pub fn fresh(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            restored_from_storage: false,
            authenticated_at: Utc::now(),
        }
    }

    /// A session reconstructed from persisted storage.
    pub fn restored(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            restored_from_storage: true,
            authenticated_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user.role
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("restored_from_storage", &self.restored_from_storage)
            .field("authenticated_at", &self.authenticated_at)
            .finish()
    }
}
