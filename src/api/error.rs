use serde_json::{Value, json};
use thiserror::Error;

/// Error taxonomy for PocketBase API interactions.
///
/// Every variant can be rendered as a failure [`Report`](super::Report):
/// `Request` carries the backend's status and payload verbatim, while
/// `Config` and `Input` report status 0 with a message payload.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend answered with a non-2xx status, or the exchange failed
    /// before a status was available (status 0 for connection-level errors
    /// and malformed responses).
    #[error("HTTP {status}: {data}")]
    Request { status: u16, data: Value },

    /// Required configuration is missing; no network call was attempted.
    #[error("configuration error: {0}")]
    Config(String),

    /// Local input was rejected before any network call.
    #[error("invalid input: {0}")]
    Input(String),
}

/// Result type alias for PocketBase API operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A request failure with no server-provided payload. The message is
    /// wrapped in a `{"message": ...}` object so the failure data is always
    /// JSON-serializable.
    pub fn connection(message: impl Into<String>) -> Self {
        Error::Request {
            status: 0,
            data: json!({ "message": message.into() }),
        }
    }

    /// HTTP status associated with this error (0 when none exists).
    pub fn status(&self) -> u16 {
        match self {
            Error::Request { status, .. } => *status,
            Error::Config(_) | Error::Input(_) => 0,
        }
    }

    /// Structured payload for the failure report.
    pub fn data(&self) -> Value {
        match self {
            Error::Request { data, .. } => data.clone(),
            Error::Config(message) | Error::Input(message) => {
                json!({ "message": message })
            }
        }
    }
}
