//! Configuration for the Footprints client.
//!
//! A [`Config`] can be built in code with [`Config::new`] or loaded from
//! environment variables with [`Config::from_env`]. Either way the base URL
//! and credentials are validated up front.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::FootprintsError;

/// Default lifetime of a cached service description, in seconds.
pub const DEFAULT_CACHE_TIMEOUT_SECS: u64 = 60;

/// Transport settings handed to the SOAP transport as-is.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Fail on responses that cannot be decoded instead of returning the
    /// raw body as a string.
    pub strict: bool,

    /// Rewrite the endpoint address from the description to `https`.
    pub force_https: bool,

    /// Extra headers sent with every request.
    pub extra_http_headers: Vec<(String, String)>,

    /// Timeout applied to every HTTP exchange.
    pub operation_timeout: Option<Duration>,
}

impl Settings {
    /// Creates default settings (lenient decoding, no extra headers, no timeout).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables strict response decoding.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Forces the endpoint to `https`.
    pub fn with_force_https(mut self, force_https: bool) -> Self {
        self.force_https = force_https;
        self
    }

    /// Adds a header sent with every request.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_http_headers.push((name.into(), value.into()));
        self
    }

    /// Sets the HTTP timeout.
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }
}

/// Configuration for connecting to FootPrints.
///
/// The client secret is used for HTTP basic authentication and is never
/// included in `Debug` output.
#[derive(Clone)]
pub struct Config {
    /// Username / client id.
    pub client_id: String,

    /// Password / client secret.
    client_secret: String,

    /// URL of the service description (WSDL).
    pub base_url: String,

    /// Optional transport settings.
    pub settings: Option<Settings>,

    /// Directory for the service description cache.
    pub storage_path: Option<PathBuf>,

    /// Lifetime of cached descriptions. Only relevant with `storage_path`.
    pub cache_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("settings", &self.settings)
            .field("storage_path", &self.storage_path)
            .field("cache_timeout", &self.cache_timeout)
            .finish()
    }
}

impl Config {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `FootprintsError::Config` if the base URL is not an http(s)
    /// URL or a credential is empty or a placeholder.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, FootprintsError> {
        let client_id = client_id.into();
        let client_secret = client_secret.into();
        let base_url = Self::validate_base_url(base_url.into())?;

        Self::validate_credential("client id", &client_id)?;
        Self::validate_credential("client secret", &client_secret)?;

        Ok(Config {
            client_id,
            client_secret,
            base_url,
            settings: None,
            storage_path: None,
            cache_timeout: Duration::from_secs(DEFAULT_CACHE_TIMEOUT_SECS),
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FOOTPRINTS_BASE_URL`: URL of the service description
    /// - `FOOTPRINTS_CLIENT_ID`: username for basic authentication
    /// - `FOOTPRINTS_CLIENT_SECRET`: password for basic authentication
    ///
    /// # Optional Environment Variables
    ///
    /// - `FOOTPRINTS_STORAGE_URL`: directory for the description cache
    /// - `FOOTPRINTS_CACHE_TIMEOUT`: cache lifetime in seconds (default 60)
    ///
    /// # Errors
    ///
    /// Returns `FootprintsError::Config` if a required variable is missing
    /// or a value fails validation.
    pub fn from_env() -> Result<Self, FootprintsError> {
        let base_url = Self::get_required_env("FOOTPRINTS_BASE_URL")?;
        let client_id = Self::get_required_env("FOOTPRINTS_CLIENT_ID")?;
        let client_secret = Self::get_required_env("FOOTPRINTS_CLIENT_SECRET")?;

        let mut config = Config::new(client_id, client_secret, base_url)?;

        if let Some(path) = Self::get_optional_env("FOOTPRINTS_STORAGE_URL") {
            config.storage_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = Self::get_optional_env("FOOTPRINTS_CACHE_TIMEOUT") {
            config.cache_timeout = Self::parse_timeout(&raw)?;
        }

        Ok(config)
    }

    /// Sets the transport settings.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Enables the on-disk description cache.
    pub fn with_storage(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = Some(path.into());
        self
    }

    /// Sets the description cache lifetime.
    pub fn with_cache_timeout(mut self, timeout: Duration) -> Self {
        self.cache_timeout = timeout;
        self
    }

    /// Returns the client secret.
    ///
    /// This should ONLY be used for authentication and sanitization, never for logging.
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    fn get_required_env(name: &str) -> Result<String, FootprintsError> {
        Self::get_optional_env(name).ok_or_else(|| FootprintsError::missing_env(name))
    }

    fn get_optional_env(name: &str) -> Option<String> {
        env::var(name).ok().filter(|value| !value.trim().is_empty())
    }

    fn parse_timeout(raw: &str) -> Result<Duration, FootprintsError> {
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                FootprintsError::invalid_config(
                    "FOOTPRINTS_CACHE_TIMEOUT must be a whole number of seconds",
                )
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, FootprintsError> {
        let url = url.trim().to_string();

        let parsed = url::Url::parse(&url)
            .map_err(|e| FootprintsError::invalid_config(format!("invalid base URL: {}", e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FootprintsError::invalid_config(
                "base URL must start with http:// or https://",
            ));
        }

        Ok(url)
    }

    /// Rejects empty or placeholder credentials.
    fn validate_credential(label: &str, value: &str) -> Result<(), FootprintsError> {
        if value.trim().is_empty() {
            return Err(FootprintsError::invalid_config(format!("{} is empty", label)));
        }

        let lower = value.to_lowercase();
        let placeholder_patterns = ["your_client", "your_secret", "placeholder", "changeme"];
        if placeholder_patterns.iter().any(|p| lower.contains(p)) {
            return Err(FootprintsError::invalid_config(format!(
                "{} appears to be a placeholder value",
                label
            )));
        }

        Ok(())
    }
}
