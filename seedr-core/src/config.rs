//! Centralized configuration for the Seedr client.
//!
//! Endpoints, client identifiers and timeouts live here instead of being
//! hard-coded at each call site.

use std::time::Duration;

use crate::errors::SeedrError;

/// Central configuration for all client components.
#[derive(Debug, Clone, Default)]
pub struct SeedrConfig {
    pub api: ApiConfig,
    pub poll: PollConfig,
}

/// Remote API endpoints and HTTP settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Scheme and host of the service, without trailing slash
    pub base_url: String,
    /// OAuth client id used for password and refresh grants
    pub client_id: &'static str,
    /// Client id used for the device code flow
    pub device_client_id: &'static str,
    /// Per-request timeout enforced by the HTTP client
    pub request_timeout: Duration,
    /// User agent for HTTP requests
    pub user_agent: &'static str,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.seedr.cc".to_string(),
            client_id: "seedr_chrome",
            device_client_id: "seedr_xbmc",
            request_timeout: Duration::from_secs(30),
            user_agent: "seedr-client/0.1.0",
        }
    }
}

impl ApiConfig {
    /// OAuth token endpoint for password and refresh grants.
    pub fn token_url(&self) -> String {
        format!("{}/oauth_test/token.php", self.base_url)
    }

    /// Resource endpoint every content call goes through.
    pub fn resource_url(&self) -> String {
        format!("{}/oauth_test/resource.php", self.base_url)
    }

    /// Device code request endpoint.
    pub fn device_code_url(&self) -> String {
        format!("{}/api/device/code", self.base_url)
    }

    /// Device code authorization endpoint.
    pub fn device_authorize_url(&self) -> String {
        format!("{}/api/device/authorize", self.base_url)
    }

    /// Checks that `base_url` is an absolute http(s) URL.
    ///
    /// # Errors
    /// - `SeedrError::Configuration` - URL does not parse or uses another scheme
    pub fn validate(&self) -> Result<(), SeedrError> {
        let url = url::Url::parse(&self.base_url).map_err(|e| SeedrError::Configuration {
            reason: format!("invalid base URL '{}': {e}", self.base_url),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SeedrError::Configuration {
                reason: format!("unsupported URL scheme '{scheme}'"),
            }),
        }
    }
}

/// Bounded poll-with-backoff settings for waiting on remote torrent processing.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Delay before the second listing
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier applied to the delay after each miss
    pub backoff_factor: u32,
    /// Total number of listings before giving up
    pub max_attempts: u32,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(8),
            backoff_factor: 2,
            max_attempts: 10,
        }
    }
}

impl PollConfig {
    /// Delay to wait after the given zero-based failed attempt.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.max(1).saturating_pow(attempt);
        self.initial_delay
            .saturating_mul(factor)
            .min(self.max_delay)
    }
}

impl SeedrConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Recognizes `SEEDR_BASE_URL` and `SEEDR_TIMEOUT_SECS`; unparsable
    /// values are ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("SEEDR_BASE_URL") {
            config.api.base_url = base_url.trim_end_matches('/').to_string();
        }

        if let Ok(timeout) = std::env::var("SEEDR_TIMEOUT_SECS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.api.request_timeout = Duration::from_secs(seconds);
            }
        }

        config
    }

    /// Configuration pointing at an arbitrary server, e.g. a local mock.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.api.base_url = base_url.into().trim_end_matches('/').to_string();
        config
    }
}

/// Account credentials for the password grant.
///
/// Passed explicitly to [`crate::Login`]; nothing reads them from globals.
#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    /// Creates credentials from an email and password.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reads `SEEDR_EMAIL` and `SEEDR_PASSWORD`.
    ///
    /// Returns `None` when either is missing or empty.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let email = lookup("SEEDR_EMAIL").filter(|v| !v.is_empty())?;
        let password = lookup("SEEDR_PASSWORD").filter(|v| !v.is_empty())?;
        Some(Self::new(email, password))
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
