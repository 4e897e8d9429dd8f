//! Single-writer session persistence over a [`KeyValueStorage`].
//!
//! The token and the serialized user live under two keys. They are written
//! as one batch and read from one storage snapshot, so readers never see one
//! without the other. Anything else found in storage (a key left
//! behind by a crash, an edited file, a record from another client) is
//! reported as [`SessionLookup::Corrupted`] and wiped.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tracing::{debug, info, warn};

use assista_core::config::StorageConfig;
use assista_core::error::AppError;
use assista_core::result::AppResult;
use assista_core::traits::storage::KeyValueStorage;
use assista_entity::session::Session;

use crate::user::{user_from_value, user_to_record};

/// How a persisted session violated the all-or-nothing invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corruption {
    TokenWithoutUser,
    UserWithoutToken,
    /// Both keys present but the token is blank.
    EmptyToken,
    /// Both keys present but the user record is not a JSON object.
    UnreadableUser,
}

impl fmt::Display for Corruption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TokenWithoutUser => write!(f, "token_without_user"),
            Self::UserWithoutToken => write!(f, "user_without_token"),
            Self::EmptyToken => write!(f, "empty_token"),
            Self::UnreadableUser => write!(f, "unreadable_user"),
        }
    }
}

/// Result of reading the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// Nothing stored.
    Absent,
    /// A partial or unreadable session was found and has been cleared.
    Corrupted(Corruption),
    /// A complete session.
    Present(Session),
}

impl SessionLookup {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Present(session) => Some(session),
            _ => None,
        }
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::Present(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted(_))
    }
}

/// Persists at most one session.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    token_key: String,
    user_key: String,
    /// Last session written or restored by this process. Guards every
    /// storage access as well.
    current: Mutex<Option<Cached>>,
}

/// A session together with the user record it was read from or written as.
#[derive(Debug)]
struct Cached {
    session: Session,
    record: String,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("backend", &self.storage.backend())
            .field("token_key", &self.token_key)
            .field("user_key", &self.user_key)
            .finish()
    }
}

impl SessionStore {
    /// Create a store using the keys from configuration.
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &StorageConfig) -> Self {
        Self::with_keys(storage, &config.token_key, &config.user_key)
    }

    pub fn with_keys(storage: Arc<dyn KeyValueStorage>, token_key: &str, user_key: &str) -> Self {
        Self {
            storage,
            token_key: token_key.to_string(),
            user_key: user_key.to_string(),
            current: Mutex::new(None),
        }
    }

    /// Replace the stored session with `session`.
    pub fn set(&self, session: &Session) -> AppResult<()> {
        if session.token.trim().is_empty() {
            return Err(AppError::validation("Refusing to store a session with an empty token"));
        }
        let record = user_to_record(&session.user)?;

        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let written = self.storage.set_many(&[
            (self.user_key.as_str(), record.as_str()),
            (self.token_key.as_str(), session.token.as_str()),
        ]);
        if let Err(err) = written {
            warn!(error = %err, backend = self.storage.backend(), "Session write failed");
            if let Err(rollback) = self.remove_both(&mut current) {
                warn!(error = %rollback, "Rollback of partial session write failed");
            }
            return Err(err);
        }
        *current = Some(Cached {
            session: session.clone(),
            record,
        });

        info!(
            user_id = %session.user.id,
            role = ?session.user.role,
            "Session stored"
        );
        Ok(())
    }

    /// Read the current session.
    ///
    /// A partial or unreadable session is cleared before this returns.
    pub fn get(&self) -> AppResult<SessionLookup> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());

        let mut values = self
            .storage
            .get_many(&[self.token_key.as_str(), self.user_key.as_str()])?
            .into_iter();
        let token = values.next().flatten();
        let record = values.next().flatten();

        let (token, record) = match (token, record) {
            (None, None) => {
                *current = None;
                return Ok(SessionLookup::Absent);
            }
            (Some(_), None) => return self.corrupted(&mut current, Corruption::TokenWithoutUser),
            (None, Some(_)) => return self.corrupted(&mut current, Corruption::UserWithoutToken),
            (Some(token), Some(record)) => (token, record),
        };

        if token.trim().is_empty() {
            return self.corrupted(&mut current, Corruption::EmptyToken);
        }

        if let Some(cached) = current
            .as_ref()
            .filter(|c| c.session.token == token && c.record == record)
        {
            return Ok(SessionLookup::Present(cached.session.clone()));
        }

        let user = serde_json::from_str::<Value>(&record)
            .ok()
            .as_ref()
            .and_then(user_from_value);
        let Some(user) = user else {
            return self.corrupted(&mut current, Corruption::UnreadableUser);
        };

        let session = Session::restored(token, user);
        debug!(user_id = %session.user.id, role = ?session.user.role, "Session restored from storage");
        *current = Some(Cached {
            session: session.clone(),
            record,
        });
        Ok(SessionLookup::Present(session))
    }

    /// Remove the session. Idempotent.
    pub fn clear(&self) -> AppResult<()> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        self.remove_both(&mut current)
    }

    fn remove_both(&self, current: &mut Option<Cached>) -> AppResult<()> {
        self.storage
            .remove_many(&[self.token_key.as_str(), self.user_key.as_str()])?;
        *current = None;
        Ok(())
    }

    fn corrupted(
        &self,
        current: &mut Option<Cached>,
        kind: Corruption,
    ) -> AppResult<SessionLookup> {
        warn!(corruption = %kind, backend = self.storage.backend(), "Clearing corrupted session");
        self.remove_both(current)?;
        Ok(SessionLookup::Corrupted(kind))
    }
}
