//! Injected collaborators shared by all feature reducers

use mentorhub_api::ApiClient;
use mentorhub_core::environment::{Clock, Navigator, SystemClock};
use std::sync::Arc;
use std::time::Duration;

/// Environment for every feature reducer
///
/// Cheap to clone: all collaborators are shared.
#[derive(Clone)]
pub struct AppEnvironment {
    /// REST request helper
    pub api: Arc<dyn ApiClient>,
    /// Client-side router
    pub navigator: Arc<dyn Navigator>,
    /// Time source for notification timestamps
    pub clock: Arc<dyn Clock>,
    /// Auto-dismiss delay for dismissible notifications
    pub notification_timeout: Option<Duration>,
}

impl AppEnvironment {
    /// Environment with the system clock and a 5 second notification timeout
    #[must_use]
    pub fn new(api: Arc<dyn ApiClient>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            api,
            navigator,
            clock: Arc::new(SystemClock),
            notification_timeout: Some(Duration::from_secs(5)),
        }
    }

    /// Use a different clock
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Set the auto-dismiss delay (`None` keeps notifications)
    #[must_use]
    pub const fn with_notification_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.notification_timeout = timeout;
        self
    }
}

impl std::fmt::Debug for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppEnvironment")
            .field("notification_timeout", &self.notification_timeout)
            .finish_non_exhaustive()
    }
}

/// Navigator for headless use: logs route changes
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn navigate_to(&self, path: &str) {
        tracing::info!(path, "Navigating");
    }
}
