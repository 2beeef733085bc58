//! # Mentorhub Testing
//!
//! Testing utilities for Mentorhub reducers and stores.
//!
//! This crate provides:
//! - Mock implementations of Environment collaborators
//! - The [`ReducerTest`] Given-When-Then harness and effect assertions
//! - Helpers that drive effect futures without a store
//!
//! ## Example
//!
//! ```ignore
//! use mentorhub::{AppConfig, AppEnvironment, Hub};
//! use mentorhub_api::Method;
//! use mentorhub_testing::{MockApiClient, RecordingNavigator};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::test]
//! async fn test_project_listing() {
//!     let api = MockApiClient::new()
//!         .respond(Method::Post, "/auth/local", json!({ "token": "t" }))
//!         .respond(Method::Get, "/api/users/me", json!({ "_id": "u1", "name": "Ada" }))
//!         .respond(Method::Get, "/api/projects", json!([]));
//!     let env = AppEnvironment::new(Arc::new(api), Arc::new(RecordingNavigator::new()));
//!     let hub = Hub::with_environment(AppConfig::default(), env);
//!
//!     hub.login("ada@example.com", "secret").await.unwrap();
//!     assert!(hub.fetch_projects().await.unwrap().is_empty());
//! }
//! ```

use chrono::{DateTime, Utc};
use mentorhub_core::environment::Clock;

pub mod reducer_test;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use mentorhub_api::{ApiClient, ApiError, ApiFuture, ApiRequest, Method};
    use mentorhub_core::environment::Navigator;
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
    use std::time::Duration;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use mentorhub_testing::mocks::FixedClock;
    /// use mentorhub_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }

    fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    type Response = (Result<Value, ApiError>, Option<Duration>);

    /// Scripted [`ApiClient`]
    ///
    /// Responses are routed by method and path. A route holding several
    /// responses hands them out in order and repeats the last one. Unrouted
    /// requests fail with status 404. Every request is recorded.
    #[derive(Debug, Default)]
    pub struct MockApiClient {
        routes: Mutex<HashMap<(Method, String), VecDeque<Response>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl MockApiClient {
        /// Client with no routes
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Append a response for `method path`
        #[must_use]
        pub fn on(self, method: Method, path: &str, response: Result<Value, ApiError>) -> Self {
            self.push(method, path, (response, None));
            self
        }

        /// Append a successful response
        #[must_use]
        pub fn respond(self, method: Method, path: &str, body: Value) -> Self {
            self.on(method, path, Ok(body))
        }

        /// Append a successful response delivered after `delay`
        #[must_use]
        pub fn respond_after(self, method: Method, path: &str, delay: Duration, body: Value) -> Self {
            self.push(method, path, (Ok(body), Some(delay)));
            self
        }

        /// Append a failure
        #[must_use]
        pub fn fail(self, method: Method, path: &str, error: ApiError) -> Self {
            self.on(method, path, Err(error))
        }

        fn push(&self, method: Method, path: &str, response: Response) {
            lock(&self.routes)
                .entry((method, path.to_string()))
                .or_default()
                .push_back(response);
        }

        fn next_response(&self, request: &ApiRequest) -> Response {
            let mut routes = lock(&self.routes);
            let Some(queue) = routes.get_mut(&(request.method, request.path.clone())) else {
                return (
                    Err(ApiError::Status {
                        status: 404,
                        body: format!("no route for {} {}", request.method, request.path),
                    }),
                    None,
                );
            };

            if queue.len() > 1 {
                queue.pop_front().unwrap_or_else(|| (Ok(Value::Null), None))
            } else {
                queue.front().cloned().unwrap_or_else(|| (Ok(Value::Null), None))
            }
        }

        /// All requests received so far
        #[must_use]
        pub fn requests(&self) -> Vec<ApiRequest> {
            lock(&self.requests).clone()
        }

        /// Number of requests received for `method path`
        #[must_use]
        pub fn request_count(&self, method: Method, path: &str) -> usize {
            lock(&self.requests)
                .iter()
                .filter(|request| request.method == method && request.path == path)
                .count()
        }

        /// Most recent request for `method path`
        #[must_use]
        pub fn last_request(&self, method: Method, path: &str) -> Option<ApiRequest> {
            lock(&self.requests)
                .iter()
                .rev()
                .find(|request| request.method == method && request.path == path)
                .cloned()
        }
    }

    impl ApiClient for MockApiClient {
        fn send(&self, request: ApiRequest) -> ApiFuture<'_> {
            let (result, delay) = self.next_response(&request);
            lock(&self.requests).push(request);

            Box::pin(async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                result
            })
        }
    }

    /// [`Navigator`] that records every route change
    #[derive(Debug, Clone, Default)]
    pub struct RecordingNavigator {
        visited: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingNavigator {
        /// Navigator with no history
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Paths navigated to, oldest first
        #[must_use]
        pub fn visited(&self) -> Vec<String> {
            lock(&self.visited).clone()
        }
    }

    impl Navigator for RecordingNavigator {
        fn navigate_to(&self, path: &str) {
            lock(&self.visited).push(path.to_string());
        }
    }
}

/// Drive effects without a store
pub mod effects {
    use futures::future::{BoxFuture, FutureExt, join_all};
    use mentorhub_core::effect::Effect;

    /// Execute `effects` and collect every action they produce
    ///
    /// Futures are awaited, parallel effects are joined, sequential effects
    /// run in order. Delayed actions are returned immediately without
    /// sleeping. Produced actions are not reduced.
    pub async fn collect_actions<A: Send + 'static>(effects: Vec<Effect<A>>) -> Vec<A> {
        let mut actions = Vec::new();
        for effect in effects {
            actions.extend(run(effect).await);
        }
        actions
    }

    fn run<A: Send + 'static>(effect: Effect<A>) -> BoxFuture<'static, Vec<A>> {
        async move {
            match effect {
                Effect::None => Vec::new(),
                Effect::Future(fut) => fut.await.into_iter().collect(),
                Effect::Delay { action, .. } => vec![*action],
                Effect::Parallel(effects) => join_all(effects.into_iter().map(run))
                    .await
                    .into_iter()
                    .flatten()
                    .collect(),
                Effect::Sequential(effects) => {
                    let mut actions = Vec::new();
                    for effect in effects {
                        actions.extend(run(effect).await);
                    }
                    actions
                },
            }
        }
        .boxed()
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs it.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use effects::collect_actions;
pub use mocks::{FixedClock, MockApiClient, RecordingNavigator, test_clock};
pub use reducer_test::{ReducerTest, assertions};
