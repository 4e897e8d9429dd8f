//! Login and logout lifecycle.

use std::sync::{Arc, Mutex};

use tracing::info;

use assista_core::result::AppResult;
use assista_entity::session::Session;

use super::store::{SessionLookup, SessionStore};
use crate::client::{AuthClient, LoginAttempt};
use crate::error::LoginError;
use crate::guard::RouteTable;

/// A committed login.
#[derive(Debug, Clone)]
pub struct LoginSuccess {
    pub session: Session,
    /// Where the host should navigate next.
    pub landing: String,
}

/// Owns the login fence and is the only caller that writes sessions.
pub struct SessionManager {
    client: AuthClient,
    store: Arc<SessionStore>,
    routes: Arc<RouteTable>,
    /// Held while checking the fence and writing the store, so a stale
    /// login can never land after a newer one or after logout.
    commit: Mutex<()>,
}

impl SessionManager {
    pub fn new(client: AuthClient, store: Arc<SessionStore>, routes: Arc<RouteTable>) -> Self {
        Self {
            client,
            store,
            routes,
            commit: Mutex::new(()),
        }
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }

    /// Negotiate a login and persist the session if this call is still the
    /// latest one when it completes.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<LoginSuccess, LoginError> {
        let LoginAttempt { ticket, result } = self.client.authenticate(identifier, secret).await;

        let _commit = self.commit.lock().unwrap_or_else(|e| e.into_inner());
        let fence = self.client.fence();
        if !fence.is_latest(ticket) {
            let latest = fence.latest();
            info!(seq = ticket.seq, latest, "Discarding superseded login result");
            return Err(LoginError::Superseded {
                seq: ticket.seq,
                latest,
            });
        }

        let session = result?;
        self.store
            .set(&session)
            .map_err(|e| LoginError::Persistence(e.message))?;

        let landing = self.routes.landing(&session).to_string();
        info!(seq = ticket.seq, landing = %landing, "Login committed");
        Ok(LoginSuccess { session, landing })
    }

    /// Clear the session and return the login path. Idempotent. A login
    /// still in flight is superseded.
    pub fn logout(&self) -> AppResult<String> {
        let _commit = self.commit.lock().unwrap_or_else(|e| e.into_inner());
        let seq = self.client.fence().invalidate();
        self.store.clear()?;
        info!(seq, "Logged out");
        Ok(self.routes.login().to_string())
    }

    pub fn current(&self) -> AppResult<SessionLookup> {
        self.store.get()
    }
}

#[cfg(test)]
mod tests {
    use assista_core::config::RoutesConfig;
    use assista_core::traits::transport::LoginTransport;
    use assista_core::types::{LoginEncoding, TransportResponse};
    use assista_entity::user::Role;
    use assista_storage::memory::MemoryStorage;

    use super::*;
    use crate::test_support::{GatedTransport, ScriptedTransport, success_body};

    fn manager(transport: Arc<dyn LoginTransport>) -> (Arc<SessionManager>, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = Arc::new(SessionStore::with_keys(
            Arc::new(storage.clone()),
            "token",
            "user",
        ));
        let routes = Arc::new(RouteTable::from_config(&RoutesConfig::default()).unwrap());
        let client = AuthClient::new(transport, vec![LoginEncoding::Json]);
        (
            Arc::new(SessionManager::new(client, store, routes)),
            storage,
        )
    }

    #[tokio::test]
    async fn test_login_persists_and_lands_on_home() {
        let body = success_body("tok", "Abogado");
        let transport = Arc::new(ScriptedTransport::new().reply(LoginEncoding::Json, 200, &body));
        let (manager, storage) = manager(transport);

        let success = manager.login("ana@example.com", "pw").await.unwrap();

        assert_eq!(success.landing, "/abogado");
        assert_eq!(success.session.role(), Some(Role::Lawyer));
        assert_eq!(storage.len(), 2);
        assert_eq!(
            manager.current().unwrap().into_session().unwrap(),
            success.session
        );
    }

    #[tokio::test]
    async fn test_failed_login_leaves_store_untouched() {
        let transport = Arc::new(ScriptedTransport::new().reply(
            LoginEncoding::Json,
            401,
            r#"{"detail":"no"}"#,
        ));
        let (manager, storage) = manager(transport);

        let err = manager.login("ana@example.com", "bad").await.unwrap_err();

        assert!(matches!(err, LoginError::CredentialsRejected { .. }));
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let transport = Arc::new(
            ScriptedTransport::new().reply(LoginEncoding::Json, 200, &success_body("tok", "admin")),
        );
        let (manager, storage) = manager(transport);
        manager.login("a", "b").await.unwrap();

        assert_eq!(manager.logout().unwrap(), "/login");
        assert_eq!(manager.logout().unwrap(), "/login");
        assert!(storage.is_empty());
        assert_eq!(manager.current().unwrap(), SessionLookup::Absent);
    }

    #[tokio::test]
    async fn test_stale_login_cannot_overwrite_newer() {
        let transport = Arc::new(GatedTransport::new());
        let first_gate = transport.gate();
        let second_gate = transport.gate();
        let (manager, _) = manager(transport);

        let first = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.login("first@example.com", "pw").await }
        });
        // Let the first call take its ticket and its gate.
        tokio::task::yield_now().await;
        while manager.client().fence().latest() < 1 {
            tokio::task::yield_now().await;
        }
        let second = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.login("second@example.com", "pw").await }
        });
        while manager.client().fence().latest() < 2 {
            tokio::task::yield_now().await;
        }

        // Newer call completes first, older one afterwards.
        second_gate
            .send(TransportResponse::new(200, success_body("tok-2", "client")))
            .unwrap();
        let second = second.await.unwrap().unwrap();
        first_gate
            .send(TransportResponse::new(200, success_body("tok-1", "admin")))
            .unwrap();
        let first = first.await.unwrap();

        assert_eq!(first.unwrap_err(), LoginError::Superseded { seq: 1, latest: 2 });
        let stored = manager.current().unwrap().into_session().unwrap();
        assert_eq!(stored.token, "tok-2");
        assert_eq!(stored, second.session);
    }

    #[tokio::test]
    async fn test_logout_supersedes_in_flight_login() {
        let transport = Arc::new(GatedTransport::new());
        let gate = transport.gate();
        let (manager, storage) = manager(transport);

        let pending = tokio::spawn({
            let manager = Arc::clone(&manager);
            async move { manager.login("a@example.com", "pw").await }
        });
        while manager.client().fence().latest() < 1 {
            tokio::task::yield_now().await;
        }

        manager.logout().unwrap();
        gate.send(TransportResponse::new(200, success_body("tok", "admin")))
            .unwrap();

        assert!(matches!(
            pending.await.unwrap(),
            Err(LoginError::Superseded { seq: 1, .. })
        ));
        assert!(storage.is_empty());
    }
}
