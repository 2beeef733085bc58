//! Registration reducer

use super::types::{RegistrationAction, RegistrationState};
use crate::auth::TokenResponse;
use crate::environment::AppEnvironment;
use mentorhub_api::post_json;
use mentorhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Account creation endpoint
pub const USERS_PATH: &str = "/api/users";

/// Reducer for the registration form
///
/// A successful registration only records the token here. Starting the
/// session and notifying the user is wired up at the application level.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationReducer;

impl RegistrationReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for RegistrationReducer {
    type State = RegistrationState;
    type Action = RegistrationAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            RegistrationAction::SetDraft(draft) => {
                state.new_model.set_draft(draft);
                SmallVec::new()
            },
            RegistrationAction::Reset => {
                state.new_model.reset();
                state.last_error = None;
                SmallVec::new()
            },
            RegistrationAction::Register => {
                if state.fetching {
                    tracing::debug!("Registration already in flight");
                    return SmallVec::new();
                }

                let registration = state.new_model.draft().clone();
                tracing::info!(email = %registration.email, "Registering");
                state.fetching = true;
                state.last_error = None;

                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    let response =
                        post_json::<_, TokenResponse>(api.as_ref(), USERS_PATH, None, &registration)
                            .await;
                    match response {
                        Ok(response) => {
                            Some(RegistrationAction::Registered { token: response.token })
                        },
                        Err(error) => Some(RegistrationAction::RegisterFailed { error }),
                    }
                }]
            },
            RegistrationAction::Registered { .. } => {
                state.fetching = false;
                state.new_model.reset();
                SmallVec::new()
            },
            RegistrationAction::RegisterFailed { error } => {
                tracing::warn!(%error, "Registration failed");
                state.fetching = false;
                state.last_error = Some(error);
                SmallVec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_registration::types::Registration;
    use mentorhub_api::{ApiError, AuthToken, Method};
    use mentorhub_testing::{
        MockApiClient, RecordingNavigator, ReducerTest, assertions, collect_actions,
    };
    use serde_json::json;

    fn draft() -> Registration {
        Registration {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn register_posts_draft() {
        let api = Arc::new(
            MockApiClient::new().respond(Method::Post, USERS_PATH, json!({ "token": "fresh" })),
        );
        let env = AppEnvironment::new(api.clone(), Arc::new(RecordingNavigator::new()));

        let (state, effects) = ReducerTest::new(RegistrationReducer::new())
            .with_env(env)
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::SetDraft(draft()))
            .when_action(RegistrationAction::Register)
            .then_effects(|effects| assertions::assert_effects_count(effects, 1))
            .run();
        assert!(state.is_fetching());

        let actions = collect_actions(effects).await;
        assert_eq!(
            actions,
            vec![RegistrationAction::Registered {
                token: AuthToken::new("fresh")
            }]
        );
        assert_eq!(
            api.last_request(Method::Post, USERS_PATH)
                .and_then(|request| request.body),
            Some(json!({ "name": "Ada", "email": "ada@example.com", "password": "secret" }))
        );
    }

    #[test]
    fn register_is_ignored_while_in_flight() {
        let env = AppEnvironment::new(
            Arc::new(MockApiClient::new()),
            Arc::new(RecordingNavigator::new()),
        );

        ReducerTest::new(RegistrationReducer::new())
            .with_env(env)
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::Register)
            .when_action(RegistrationAction::Register)
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn outcome_settles_flag_and_draft() {
        let env = AppEnvironment::new(
            Arc::new(MockApiClient::new()),
            Arc::new(RecordingNavigator::new()),
        );

        ReducerTest::new(RegistrationReducer::new())
            .with_env(env.clone())
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::SetDraft(draft()))
            .when_action(RegistrationAction::Register)
            .when_action(RegistrationAction::RegisterFailed {
                error: ApiError::Status {
                    status: 422,
                    body: "email taken".into(),
                },
            })
            .then_state(|state| {
                assert!(!state.is_fetching());
                assert_eq!(state.draft(), &draft());
                assert!(state.last_error().is_some());
            })
            .run();

        ReducerTest::new(RegistrationReducer::new())
            .with_env(env)
            .given_state(RegistrationState::default())
            .when_action(RegistrationAction::SetDraft(draft()))
            .when_action(RegistrationAction::Register)
            .when_action(RegistrationAction::Registered {
                token: AuthToken::new("fresh"),
            })
            .then_state(|state| {
                assert!(!state.is_fetching());
                assert_eq!(state.draft(), &Registration::default());
            })
            .run();
    }
}
