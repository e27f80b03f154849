use std::sync::Arc;

use serde::Deserialize;

use crate::api::{HttpTransport, Transport};
use crate::config::Config;
use crate::session::Session;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Everything the handlers share. The session is the only piece that changes
/// during normal use; `configure` may also swap the transport and config.
pub struct AppState {
    pub config: Config,
    pub api: Arc<dyn Transport>,
    pub session: Option<Session>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<AppState> {
        let api = Arc::new(HttpTransport::new(&config.api_url)?);
        Ok(AppState {
            config,
            api,
            session: None,
        })
    }

    /// Tests inject a scripted transport here.
    pub fn with_transport(config: Config, api: Arc<dyn Transport>) -> AppState {
        AppState {
            config,
            api,
            session: None,
        }
    }
}
