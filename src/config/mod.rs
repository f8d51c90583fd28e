use std::env;
use std::fmt;

use chrono::Duration;

use crate::{credentials::CredentialStore, error::ConfigError, session::DEFAULT_TTL_MINUTES};

pub const DEFAULT_JWT_SECRET: &str = "secret_key";
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Upper bound on `TOKEN_EXPIRY_MINUTES` (100 years), keeping every expiry
/// well inside the range a cookie `Expires` date can carry.
pub const MAX_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24 * 366 * 100;

#[derive(Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub token_expiry_minutes: i64,
    pub credentials: CredentialStore,
    pub server_host: String,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let jwt_secret = optional("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, using the built-in default secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let token_expiry_minutes = match optional("TOKEN_EXPIRY_MINUTES") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|minutes| (1..=MAX_TOKEN_EXPIRY_MINUTES).contains(minutes))
                .ok_or(ConfigError::InvalidVar {
                    name: "TOKEN_EXPIRY_MINUTES",
                    value: raw,
                })?,
            None => DEFAULT_TTL_MINUTES,
        };

        let users = lookup("USERS")
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::MissingVar("USERS"))?;
        let credentials = CredentialStore::parse(&users)?;

        let server_host =
            optional("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string());

        let server_port = match optional("SERVER_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                name: "SERVER_PORT",
                value: raw,
            })?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Config {
            jwt_secret,
            token_expiry_minutes,
            credentials,
            server_host,
            server_port,
        })
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::minutes(self.token_expiry_minutes)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("jwt_secret", &"<redacted>")
            .field("token_expiry_minutes", &self.token_expiry_minutes)
            .field("credentials", &self.credentials)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}
