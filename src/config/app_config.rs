use std::env;
use std::time::Duration;

pub const DEFAULT_PAGERDUTY_API_URL: &str = "https://api.pagerduty.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub pagerduty: PagerDutyConfig,
}

/// Credentials and target of the incident-management service
#[derive(Clone)]
pub struct PagerDutyConfig {
    pub api_key: String,
    /// Service the incident is filed against
    pub service_id: String,
    pub api_url: String,
    /// Requester email sent as the `From` header
    pub from_email: Option<String>,
    pub timeout: Duration,
}

// Keeps the API key out of logs.
impl std::fmt::Debug for PagerDutyConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDutyConfig")
            .field("api_key", &"<redacted>")
            .field("service_id", &self.service_id)
            .field("api_url", &self.api_url)
            .field("from_email", &self.from_email)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PagerDutyConfig {
    pub fn new(api_key: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            service_id: service_id.into(),
            api_url: DEFAULT_PAGERDUTY_API_URL.to_string(),
            from_email: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_from_email(mut self, from_email: impl Into<String>) -> Self {
        self.from_email = Some(from_email.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = required_var("PAGERDUTY_API_KEY")?;
        let service_id = required_var("PAGERDUTY_SERVICE_ID")?;

        let api_url = env::var("PAGERDUTY_API_URL")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PAGERDUTY_API_URL.to_string());

        let from_email = env::var("PAGERDUTY_FROM_EMAIL")
            .ok()
            .filter(|v| !v.is_empty());

        let timeout_secs = match env::var("PAGERDUTY_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber("PAGERDUTY_TIMEOUT_SECS"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            service_id,
            api_url,
            from_email,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidNumber("SERVER_PORT"))?;

        Ok(Self {
            server_port,
            pagerduty: PagerDutyConfig::from_env()?,
        })
    }
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingVar(&'static str),
    #[error("{0} must be a valid number")]
    InvalidNumber(&'static str),
}
