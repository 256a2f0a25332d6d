use log::debug;

/// Default PocketBase address for local development.
pub const DEFAULT_URL: &str = "http://127.0.0.1:8090";

/// Endpoint configuration, loaded once at process start and immutable for
/// the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub superuser_email: String,
    pub superuser_password: String,
}

impl Config {
    pub fn new(
        base_url: impl Into<String>,
        superuser_email: impl Into<String>,
        superuser_password: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            superuser_email: superuser_email.into(),
            superuser_password: superuser_password.into(),
        }
    }

    /// Load configuration from the environment. A `.env` file in the current
    /// working directory seeds variables but never overrides one already set
    /// in the environment.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let base_url =
            std::env::var("PB_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let superuser_email =
            std::env::var("PB_SUPERUSER_EMAIL").unwrap_or_default();
        let superuser_password =
            std::env::var("PB_SUPERUSER_PASSWORD").unwrap_or_default();

        debug!("Loaded configuration for {}", base_url);
        Self::new(base_url, superuser_email, superuser_password)
    }

    /// Whether both superuser credential fields are present.
    pub fn has_superuser_credentials(&self) -> bool {
        !self.superuser_email.is_empty() && !self.superuser_password.is_empty()
    }
}
