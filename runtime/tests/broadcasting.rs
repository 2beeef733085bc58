//! Integration tests for Store action broadcasting
//!
//! Request helpers wait for the completion action of a fetch. These tests
//! cover that request/response pattern over the action broadcast.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use mentorhub_core::{SmallVec, effect::Effect, reducer::Reducer, smallvec};
use mentorhub_runtime::{Store, StoreConfig, StoreError};
use std::sync::Arc;
use std::time::Duration;

// ============================================================================
// Test Fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum TestAction {
    /// Start a fetch tagged with a request id
    Fetch { request: u64, fail: bool },
    /// Fetch finished with a number of items
    Loaded { request: u64, items: usize },
    /// Fetch failed
    Failed { request: u64, error: String },
    /// Schedule a dismiss after a short delay
    Schedule,
    /// Dismissed (produced by a delay)
    Dismissed,
    /// Fire several fetches at once
    FetchMany,
    /// Local change with no effects
    Touch,
    /// Start a fetch numbered by the store, finishing after `delay_ms`
    Issue { delay_ms: u64 },
}

#[derive(Debug, Clone, Default)]
struct TestState {
    loaded: Vec<u64>,
    failures: usize,
    touched: usize,
    issued: u64,
}

#[derive(Clone)]
struct TestEnvironment;

#[derive(Clone)]
struct TestReducer;

impl Reducer for TestReducer {
    type State = TestState;
    type Action = TestAction;
    type Environment = TestEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TestAction::Fetch { request, fail } => {
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(5)).await;
                    if fail {
                        Some(TestAction::Failed {
                            request,
                            error: "status 500".to_string(),
                        })
                    } else {
                        Some(TestAction::Loaded { request, items: 3 })
                    }
                }))]
            },
            TestAction::Loaded { request, .. } => {
                state.loaded.push(request);
                SmallVec::new()
            },
            TestAction::Failed { .. } => {
                state.failures += 1;
                SmallVec::new()
            },
            TestAction::Schedule => smallvec![Effect::Delay {
                duration: Duration::from_millis(10),
                action: Box::new(TestAction::Dismissed),
            }],
            TestAction::Dismissed => SmallVec::new(),
            TestAction::FetchMany => smallvec![Effect::Parallel(
                (1..=3)
                    .map(|request| {
                        Effect::Future(Box::pin(async move {
                            Some(TestAction::Loaded { request, items: 0 })
                        }))
                    })
                    .collect()
            )],
            TestAction::Touch => {
                state.touched += 1;
                SmallVec::new()
            },
            TestAction::Issue { delay_ms } => {
                state.issued += 1;
                let request = state.issued;
                smallvec![Effect::Future(Box::pin(async move {
                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                    Some(TestAction::Loaded { request, items: 1 })
                }))]
            },
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn send_and_wait_for_returns_completion_action() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::Fetch { request: 1, fail: false },
            |action| matches!(action, TestAction::Loaded { .. } | TestAction::Failed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert_eq!(result, TestAction::Loaded { request: 1, items: 3 });
    // Broadcast happens after the completion was reduced
    assert_eq!(store.state(|s| s.loaded.clone()).await, vec![1]);
}

#[tokio::test]
async fn send_and_wait_for_returns_failure_action() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::Fetch { request: 7, fail: true },
            |action| matches!(action, TestAction::Loaded { .. } | TestAction::Failed { .. }),
            Duration::from_secs(1),
        )
        .await
        .unwrap();

    assert!(matches!(result, TestAction::Failed { request: 7, .. }));
}

#[tokio::test]
async fn send_and_wait_for_times_out() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::Touch,
            |action| matches!(action, TestAction::Loaded { .. }),
            Duration::from_millis(30),
        )
        .await;

    assert_eq!(result, Err(StoreError::Timeout));
}

#[tokio::test]
async fn concurrent_waiters_get_their_own_completion() {
    let store = Arc::new(Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment,
    ));

    let mut handles = vec![];
    for request in 1..=5 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .send_and_wait_for(
                    TestAction::Fetch { request, fail: false },
                    move |action| {
                        matches!(action, TestAction::Loaded { request: r, .. } if *r == request)
                    },
                    Duration::from_secs(2),
                )
                .await
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.await.expect("task panicked");
        assert!(matches!(result, Ok(TestAction::Loaded { request, .. }) if request == i as u64 + 1));
    }
}

fn loaded_by(request: &u64, action: &TestAction) -> bool {
    matches!(action, TestAction::Loaded { request: r, .. } if r == request)
}

#[tokio::test]
async fn keyed_waiters_ignore_responses_to_other_requests() {
    let store = Arc::new(Store::new(
        TestState::default(),
        TestReducer,
        TestEnvironment,
    ));

    let slow = {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            store
                .send_and_wait_keyed(
                    TestAction::Issue { delay_ms: 80 },
                    |s: &TestState| s.issued,
                    loaded_by,
                    Duration::from_secs(2),
                )
                .await
        })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let fast = store
        .send_and_wait_keyed(
            TestAction::Issue { delay_ms: 5 },
            |s: &TestState| s.issued,
            loaded_by,
            Duration::from_secs(2),
        )
        .await;

    assert_eq!(fast, Ok(TestAction::Loaded { request: 2, items: 1 }));
    assert_eq!(
        slow.await.expect("task panicked"),
        Ok(TestAction::Loaded { request: 1, items: 1 })
    );
}

#[tokio::test]
async fn keyed_wait_without_a_request_fails_fast() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_keyed(
            TestAction::Touch,
            |s: &TestState| s.issued,
            loaded_by,
            Duration::from_secs(5),
        )
        .await;

    assert_eq!(result, Err(StoreError::NotStarted));
    assert_eq!(store.state(|s| s.touched).await, 1);
}

#[tokio::test]
async fn initial_actions_are_not_broadcast() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);
    let mut rx = store.subscribe_actions();

    store.send(TestAction::Touch).await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(rx.try_recv().is_err());
    assert_eq!(store.state(|s| s.touched).await, 1);
}

#[tokio::test]
async fn delayed_actions_are_broadcast() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);

    let result = store
        .send_and_wait_for(
            TestAction::Schedule,
            |action| matches!(action, TestAction::Dismissed),
            Duration::from_secs(1),
        )
        .await;

    assert_eq!(result, Ok(TestAction::Dismissed));
}

#[tokio::test]
async fn parallel_effects_are_broadcast() {
    let store = Store::new(TestState::default(), TestReducer, TestEnvironment);
    let mut rx = store.subscribe_actions();

    let mut handle = store.send(TestAction::FetchMany).await.unwrap();
    handle.wait_with_timeout(Duration::from_secs(1)).await.unwrap();

    let mut requests = vec![];
    while let Ok(action) = rx.try_recv() {
        if let TestAction::Loaded { request, .. } = action {
            requests.push(request);
        }
    }
    requests.sort_unstable();
    assert_eq!(requests, vec![1, 2, 3]);
}

#[tokio::test]
async fn small_broadcast_capacity_lags_slow_subscribers() {
    let store = Store::with_config(
        TestState::default(),
        TestReducer,
        TestEnvironment,
        StoreConfig::default().with_broadcast_capacity(2),
    );
    let mut rx = store.subscribe_actions();

    for request in 0..10 {
        store
            .send(TestAction::Fetch { request, fail: false })
            .await
            .unwrap();
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    let mut lagged = false;
    loop {
        match rx.try_recv() {
            Ok(_) => {},
            Err(tokio::sync::broadcast::error::TryRecvError::Lagged(_)) => lagged = true,
            Err(_) => break,
        }
    }
    assert!(lagged, "expected subscriber to lag");

    // The store itself reduced every completion
    assert_eq!(store.state(|s| s.loaded.len()).await, 10);
}
