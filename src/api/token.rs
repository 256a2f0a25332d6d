use log::debug;
use reqwest::Method;
use serde_json::{Value, json};
use tokio::sync::RwLock;

use super::config::Config;
use super::error::{Error, Result};
use super::transport::Transport;

/// Password-grant endpoint for the built-in superusers collection.
const SUPERUSER_AUTH_PATH: &str = "/api/collections/_superusers/auth-with-password";

/// Owns the process-wide cached superuser token.
///
/// The cache holds at most one token at a time and is never persisted.
/// Staleness is discovered reactively: the facade forces a refresh when a
/// request using the cached token is rejected with a 401.
pub struct TokenManager {
    config: Config,
    cache: RwLock<Option<String>>,
}

impl TokenManager {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Return the superuser token, minting a fresh one when the cache is
    /// empty or `force` is set.
    ///
    /// Missing credentials are a configuration precondition failure: no
    /// network call is attempted. HTTP failures from the authentication
    /// call itself propagate as-is.
    pub async fn token(&self, transport: &Transport, force: bool) -> Result<String> {
        if !force {
            if let Some(token) = self.cache.read().await.as_ref() {
                debug!("using cached superuser token");
                return Ok(token.clone());
            }
        }

        if !self.config.has_superuser_credentials() {
            return Err(Error::Config(
                "PB_SUPERUSER_EMAIL and PB_SUPERUSER_PASSWORD must be set".into(),
            ));
        }

        let body = json!({
            "identity": self.config.superuser_email,
            "password": self.config.superuser_password,
        });
        let response = transport
            .send(Method::POST, SUPERUSER_AUTH_PATH, Some(&body), None)
            .await?;

        let token = response
            .body
            .as_ref()
            .and_then(|body| body.get("token"))
            .and_then(Value::as_str)
            .ok_or_else(|| Error::connection("auth response did not contain a token"))?
            .to_string();

        debug!("cached fresh superuser token");
        *self.cache.write().await = Some(token.clone());
        Ok(token)
    }
}
