//! Application configuration
//!
//! Values come from `MENTORHUB_*` environment variables with defaults for
//! local development.
//!
//! # Example
//!
//! ```no_run
//! use mentorhub::config::AppConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! println!("API: {}", config.api_url);
//! # Ok(())
//! # }
//! ```

use mentorhub_api::ApiConfig;
use mentorhub_api::config::DEFAULT_BASE_URL;
use mentorhub_collections::DEFAULT_PAGE_SIZE;
use std::num::NonZeroUsize;
use std::time::Duration;
use thiserror::Error;

/// REST server base URL
pub const API_URL_VAR: &str = "MENTORHUB_API_URL";
/// Records per listing page
pub const PAGE_SIZE_VAR: &str = "MENTORHUB_PAGE_SIZE";
/// Seconds to wait for a request to complete
pub const REQUEST_TIMEOUT_VAR: &str = "MENTORHUB_REQUEST_TIMEOUT_SECS";
/// Seconds before a dismissible notification disappears (0 keeps it)
pub const NOTIFICATION_TIMEOUT_VAR: &str = "MENTORHUB_NOTIFICATION_TIMEOUT_SECS";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be used
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    InvalidValue {
        /// Variable name
        var: &'static str,
        /// Raw value
        value: String,
        /// Why it was rejected
        reason: &'static str,
    },
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// REST server base URL
    pub api_url: String,
    /// Records per listing page
    pub page_size: NonZeroUsize,
    /// Timeout for HTTP requests and for waiting on their completion
    pub request_timeout: Duration,
    /// Auto-dismiss delay for dismissible notifications (`None` keeps them)
    pub notification_timeout: Option<Duration>,
}

impl AppConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a variable is set to an
    /// unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(url) = lookup(API_URL_VAR) {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: API_URL_VAR,
                    value: url,
                    reason: "must not be empty",
                });
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup(PAGE_SIZE_VAR) {
            let size = parse_u64(PAGE_SIZE_VAR, &raw)?;
            config.page_size = NonZeroUsize::new(usize::try_from(size).unwrap_or(usize::MAX))
                .ok_or(ConfigError::InvalidValue {
                    var: PAGE_SIZE_VAR,
                    value: raw,
                    reason: "must be greater than zero",
                })?;
        }

        if let Some(raw) = lookup(REQUEST_TIMEOUT_VAR) {
            let secs = parse_u64(REQUEST_TIMEOUT_VAR, &raw)?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    var: REQUEST_TIMEOUT_VAR,
                    value: raw,
                    reason: "must be greater than zero",
                });
            }
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(NOTIFICATION_TIMEOUT_VAR) {
            let secs = parse_u64(NOTIFICATION_TIMEOUT_VAR, &raw)?;
            config.notification_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Set the REST server base URL
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the listing page size
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the notification auto-dismiss delay
    #[must_use]
    pub const fn with_notification_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.notification_timeout = timeout;
        self
    }

    /// Request helper configuration derived from this one
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::new(self.api_url.clone()).with_timeout(self.request_timeout)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(30),
            notification_timeout: Some(Duration::from_secs(5)),
        }
    }
}

fn parse_u64(var: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
        reason: "expected a non-negative integer",
    })
}
