//! Shared helpers for the assista-auth integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;

use assista_auth::{AccessController, AuthClient, RouteTable, SessionManager, SessionStore};
use assista_core::config::{AppConfig, StorageBackend};
use assista_core::traits::navigator::{NavigateOptions, Navigator};
use assista_core::traits::storage::KeyValueStorage;
use assista_core::traits::transport::LoginTransport;
use assista_core::types::{Credentials, LoginEncoding, TransportError, TransportResponse};
use assista_storage::StorageManager;

/// A backend deployment that only understands JSON logins and knows a
/// single account per role.
#[derive(Debug, Default)]
pub struct JsonOnlyBackend {
    pub calls: Mutex<Vec<LoginEncoding>>,
}

impl JsonOnlyBackend {
    pub fn calls(&self) -> Vec<LoginEncoding> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginTransport for JsonOnlyBackend {
    async fn submit(
        &self,
        encoding: LoginEncoding,
        credentials: &Credentials,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(encoding);
        if encoding != LoginEncoding::Json {
            return Ok(TransportResponse::new(
                422,
                r#"{"detail":[{"msg":"field required"}]}"#,
            ));
        }

        let role = match (credentials.identifier(), credentials.secret()) {
            ("admin@example.com", "secret") => "ADMIN",
            ("abogado@example.com", "secret") => "Abogado",
            ("cliente@example.com", "secret") => "cliente",
            ("norole@example.com", "secret") => "",
            _ => {
                return Ok(TransportResponse::new(
                    401,
                    r#"{"detail":"Credenciales incorrectas"}"#,
                ));
            }
        };

        let body = json!({
            "access_token": format!("tok-{}", credentials.identifier()),
            "token_type": "bearer",
            "user": {
                "id": 17,
                "email": credentials.identifier(),
                "nombre": "Usuario de prueba",
                "rol": role,
            }
        });
        Ok(TransportResponse::new(200, body.to_string()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visits: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str, options: NavigateOptions) {
        assert!(options.replace, "guard redirects must replace history");
        self.visits.lock().unwrap().push(path.to_string());
    }
}

/// A client wired the way the CLI wires it, on a temporary session file.
pub struct TestApp {
    pub config: AppConfig,
    pub backend: Arc<JsonOnlyBackend>,
    pub storage: Arc<dyn KeyValueStorage>,
    pub manager: SessionManager,
    pub access: AccessController,
    pub navigator: Arc<RecordingNavigator>,
    pub dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        Self::in_dir(dir)
    }

    /// Build a second client over the same session file, as a restarted
    /// process would.
    pub fn restart(self) -> Self {
        Self::in_dir(self.dir)
    }

    fn in_dir(dir: TempDir) -> Self {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = dir.path().join("session.json").display().to_string();
        config.validate().unwrap();

        let storage = StorageManager::new(&config.storage).unwrap().backend();
        let store = Arc::new(SessionStore::new(storage.clone(), &config.storage));
        let routes = Arc::new(RouteTable::from_config(&config.routes).unwrap());
        let backend = Arc::new(JsonOnlyBackend::default());
        let client = AuthClient::from_config(backend.clone(), &config.api);
        let navigator = Arc::new(RecordingNavigator::default());

        Self {
            manager: SessionManager::new(client, store.clone(), routes.clone()),
            access: AccessController::new(store, routes, navigator.clone()),
            config,
            backend,
            storage,
            navigator,
            dir,
        }
    }
}
