use log::debug;
use reqwest::Method;
use serde_json::{Value, json};

use super::config::Config;
use super::error::{Error, Result};
use super::token::TokenManager;
use super::transport::{ApiResponse, Transport};

/// Authenticated request facade: composes the transport and the token
/// manager, and recovers from a stale cached token by refreshing it exactly
/// once and replaying the request.
pub struct PbClient {
    transport: Transport,
    tokens: TokenManager,
}

impl PbClient {
    pub fn new(config: Config) -> Self {
        let transport = Transport::new(config.base_url.clone());
        Self {
            transport,
            tokens: TokenManager::new(config),
        }
    }

    /// Build a client from `PB_URL` / `PB_SUPERUSER_EMAIL` /
    /// `PB_SUPERUSER_PASSWORD`, seeded from a `.env` file when present.
    pub fn from_env() -> Self {
        Self::new(Config::from_env())
    }

    pub fn config(&self) -> &Config {
        self.tokens.config()
    }

    /// The underlying transport, for unauthenticated or raw-mode calls.
    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Obtain the superuser token (forced refresh replaces the cache).
    pub async fn authenticate(&self, force: bool) -> Result<String> {
        self.tokens.token(&self.transport, force).await
    }

    /// Authenticate against any auth collection with identity/password.
    /// This is an unauthenticated call; it does not touch the superuser
    /// token cache.
    pub async fn auth_with_password(
        &self,
        collection: &str,
        identity: &str,
        password: &str,
    ) -> Result<ApiResponse> {
        let body = json!({ "identity": identity, "password": password });
        self.transport
            .send(
                Method::POST,
                &format!("/api/collections/{collection}/auth-with-password"),
                Some(&body),
                None,
            )
            .await
    }

    /// Send a request with the superuser token attached.
    ///
    /// On a 401 rejection the token is refreshed once and the identical
    /// request replayed once; the replay's outcome is returned unmodified.
    /// Any other failure propagates immediately, so a call issues at most
    /// two transport requests.
    pub async fn send_authenticated(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ApiResponse> {
        let token = self.tokens.token(&self.transport, false).await?;
        match self
            .transport
            .send(method.clone(), path, body, Some(&token))
            .await
        {
            Err(Error::Request { status: 401, .. }) => {
                debug!("token rejected with 401, refreshing and replaying once");
                let token = self.tokens.token(&self.transport, true).await?;
                self.transport.send(method, path, body, Some(&token)).await
            }
            outcome => outcome,
        }
    }
}
