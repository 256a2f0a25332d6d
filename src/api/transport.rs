use std::time::Duration;

use log::debug;
use reqwest::Method;
use serde_json::{Value, json};

use super::error::{Error, Result};

/// Outcome of a successful HTTP exchange: status code plus the parsed JSON
/// body, absent when the server sent no content.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    /// The response body, with an absent body rendered as JSON `null`.
    pub fn into_data(self) -> Value {
        self.body.unwrap_or(Value::Null)
    }
}

/// Issues single HTTP requests against the configured PocketBase instance.
pub struct Transport {
    base_url: String,
    http: reqwest::Client,
}

impl Transport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("pocketbase-cli/1.0")
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// Issue one HTTP exchange. A 2xx status yields the parsed response;
    /// any other status yields [`Error::Request`] carrying the backend's
    /// status and error payload.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<ApiResponse> {
        let (status, payload) = self.dispatch(method, path, body, token).await?;
        if (200..300).contains(&status) {
            let body = if payload.is_null() { None } else { Some(payload) };
            Ok(ApiResponse { status, body })
        } else {
            Err(Error::Request {
                status,
                data: payload,
            })
        }
    }

    /// Raw mode: a uniform `(status, payload)` pair for success and HTTP
    /// error statuses alike, so callers can assert on error responses
    /// without error-based control flow. Only connection-level failures
    /// are `Err`.
    pub async fn send_raw(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<(u16, Value)> {
        self.dispatch(method, path, body, token).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<(u16, Value)> {
        let url = self.url_for(path);
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }
        if let Some(token) = token {
            // PocketBase expects the raw token, no "Bearer " prefix.
            request = request.header(reqwest::header::AUTHORIZATION, token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::connection(format!("request to {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| Error::connection(format!("failed to read response body: {e}")))?;
        debug!("response status {status} ({} bytes)", text.len());

        if text.is_empty() {
            return Ok((status, Value::Null));
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(parsed) => Ok((status, parsed)),
            Err(e) if (200..300).contains(&status) => Err(Error::connection(format!(
                "malformed JSON in response from {url}: {e}"
            ))),
            // Error responses keep their own status; the unparseable body is
            // replaced with a message payload.
            Err(_) => Ok((
                status,
                json!({ "message": format!("HTTP {}: {}", status, text.trim()) }),
            )),
        }
    }
}
