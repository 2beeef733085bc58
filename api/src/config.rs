//! Request helper configuration

use std::time::Duration;

/// Default REST server base URL
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000";

/// Configuration for [`HttpApiClient`](crate::HttpApiClient)
///
/// # Example
///
/// ```
/// use mentorhub_api::ApiConfig;
/// use std::time::Duration;
///
/// let config = ApiConfig::new("https://mentors.example.org/")
///     .with_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.base_url, "https://mentors.example.org");
/// assert_eq!(config.timeout, Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Create a configuration for `base_url`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL for a request path
    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.url_for("/api/projects"), "http://localhost:9000/api/projects");
    }
}
