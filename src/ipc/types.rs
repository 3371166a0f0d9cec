use crate::config::Config;
use crate::graphql::Transport;
use crate::host::ScreenHost;
use crate::screens::Identity;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone)]
pub struct Request {
    pub id: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
}

pub struct Session {
    pub identity: Identity,
    pub endpoint: String,
    pub transport: Arc<dyn Transport>,
}

pub struct AppState {
    pub config: Config,
    pub session: Option<Session>,
    pub host: ScreenHost,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: None,
            host: ScreenHost::new(),
        }
    }
}
