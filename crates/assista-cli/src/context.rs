//! Wires configuration into the auth control plane.

use std::sync::Arc;

use assista_auth::{AccessController, AuthClient, RouteTable, SessionManager, SessionStore};
use assista_core::config::AppConfig;
use assista_core::result::AppResult;
use assista_http::transport::build_http_client;
use assista_http::{ApiClient, ReqwestTransport};
use assista_storage::StorageManager;

use crate::navigator::TerminalNavigator;

/// Everything a command needs, built once per invocation.
pub struct AppContext {
    pub routes: Arc<RouteTable>,
    pub manager: SessionManager,
    pub access: AccessController,
    pub api: ApiClient,
    pub navigator: Arc<TerminalNavigator>,
}

impl AppContext {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let storage = StorageManager::new(&config.storage)?.backend();
        let store = Arc::new(SessionStore::new(storage, &config.storage));
        let routes = Arc::new(RouteTable::from_config(&config.routes)?);

        let http = build_http_client(&config.api)?;
        let transport = Arc::new(ReqwestTransport::with_client(http.clone(), &config.api));
        let client = AuthClient::from_config(transport, &config.api);
        let navigator = Arc::new(TerminalNavigator::new());

        Ok(Self {
            manager: SessionManager::new(client, Arc::clone(&store), Arc::clone(&routes)),
            access: AccessController::new(
                Arc::clone(&store),
                Arc::clone(&routes),
                navigator.clone(),
            ),
            api: ApiClient::with_client(http, &config.api, store),
            routes,
            navigator,
        })
    }
}
