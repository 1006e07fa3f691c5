//! Wiring: one backend client shared by every service a command needs.

use std::sync::Arc;

use vibrae_adapter_http_reqwest::{
    ApiClient, HttpAuthGateway, HttpError, HttpLogSource, HttpPlayerControl,
    HttpRoutineRepository, HttpSceneRepository,
};
use vibrae_adapter_token_store_fs::FileTokenStore;
use vibrae_adapter_ws_tungstenite::{LiveError, SocketEndpoint};
use vibrae_app::ports::{NoopSessionListener, TokenStore};
use vibrae_app::services::{
    ControlService, LogService, RoutineService, SceneService, SessionService,
};

use crate::config::Config;

pub struct Context {
    pub config: Config,
    tokens: Arc<dyn TokenStore + Send + Sync>,
    client: ApiClient,
}

impl Context {
    /// # Errors
    ///
    /// Returns an error when the configured base URL cannot be used.
    pub fn new(config: Config) -> Result<Self, HttpError> {
        let path = config.token_path();
        tracing::debug!(path = %path.display(), "using token file");
        let tokens: Arc<dyn TokenStore + Send + Sync> = Arc::new(FileTokenStore::new(path));
        // A command that hits a 401 ends with an error that already tells
        // the user to log in again.
        let client = ApiClient::new(&config.api, tokens.clone(), Arc::new(NoopSessionListener))?;
        Ok(Self {
            config,
            tokens,
            client,
        })
    }

    pub fn tokens(&self) -> Arc<dyn TokenStore + Send + Sync> {
        self.tokens.clone()
    }

    pub fn session(&self) -> SessionService<HttpAuthGateway> {
        SessionService::new(HttpAuthGateway::new(self.client.clone()), self.tokens())
    }

    pub fn routines(&self) -> RoutineService<HttpRoutineRepository> {
        RoutineService::new(HttpRoutineRepository::new(self.client.clone()))
    }

    pub fn scenes(&self) -> SceneService<HttpSceneRepository> {
        SceneService::new(HttpSceneRepository::new(self.client.clone()))
    }

    pub fn control(&self) -> ControlService<HttpPlayerControl> {
        ControlService::new(HttpPlayerControl::new(self.client.clone()))
    }

    pub fn logs(&self) -> LogService<HttpLogSource> {
        LogService::new(HttpLogSource::new(self.client.clone()))
    }

    /// # Errors
    ///
    /// Returns an error when the base URL has no socket equivalent.
    pub fn socket_endpoint(&self) -> Result<SocketEndpoint, LiveError> {
        SocketEndpoint::from_api_base(self.client.base_url())
    }
}
