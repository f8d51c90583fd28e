use std::sync::Arc;

use config::Config;
use session::SessionLifecycle;
use token::TokenCodec;

pub mod config;
pub mod credentials;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod token;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionLifecycle>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let sessions = SessionLifecycle::new(
            config.credentials.clone(),
            TokenCodec::new(config.jwt_secret.as_bytes()),
            config.token_ttl(),
        );

        Self {
            sessions: Arc::new(sessions),
        }
    }
}
