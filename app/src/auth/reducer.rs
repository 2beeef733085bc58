//! Login and session reducer

use super::types::{AuthAction, AuthState, Credentials, TokenResponse, User};
use crate::environment::AppEnvironment;
use mentorhub_api::{ApiError, AuthToken, get_json, post_json};
use mentorhub_collections::FetchTicket;
use mentorhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;

/// Login endpoint
pub const LOGIN_PATH: &str = "/auth/local";
/// Profile of the token's owner
pub const ME_PATH: &str = "/api/users/me";

/// Reducer for the session
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthReducer;

impl AuthReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn login(env: &AppEnvironment, credentials: Credentials) -> Effect<AuthAction> {
        let api = Arc::clone(&env.api);
        async_effect! {
            let response =
                post_json::<_, TokenResponse>(api.as_ref(), LOGIN_PATH, None, &credentials).await;
            match response {
                Ok(response) => Some(AuthAction::LoggedIn { token: response.token }),
                Err(error) => Some(AuthAction::LoginFailed { error }),
            }
        }
    }

    fn fetch_profile(
        env: &AppEnvironment,
        token: AuthToken,
        ticket: FetchTicket,
    ) -> Effect<AuthAction> {
        let api = Arc::clone(&env.api);
        async_effect! {
            match get_json::<User>(api.as_ref(), ME_PATH, Some(&token)).await {
                Ok(user) => Some(AuthAction::ProfileLoaded { ticket, user }),
                Err(error) => Some(AuthAction::ProfileFailed { ticket, error }),
            }
        }
    }

    fn start_session(
        state: &mut AuthState,
        env: &AppEnvironment,
        token: AuthToken,
    ) -> SmallVec<[Effect<AuthAction>; 4]> {
        state.token = Some(token.clone());
        state.profile.clear();
        let ticket = state.profile.begin_fetch();
        smallvec![Self::fetch_profile(env, token, ticket)]
    }
}

impl Reducer for AuthReducer {
    type State = AuthState;
    type Action = AuthAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AuthAction::Login { credentials } => {
                tracing::info!(email = %credentials.email, "Logging in");
                state.logging_in = true;
                state.last_error = None;
                smallvec![Self::login(env, credentials)]
            },
            AuthAction::LoggedIn { token } => {
                if !state.logging_in {
                    tracing::debug!("Dropping login completed after logout");
                    return SmallVec::new();
                }
                state.logging_in = false;
                Self::start_session(state, env, token)
            },
            AuthAction::SessionStarted { token } => Self::start_session(state, env, token),
            AuthAction::LoginFailed { error } => {
                if !state.logging_in {
                    tracing::debug!(%error, "Dropping login failure after logout");
                    return SmallVec::new();
                }
                tracing::warn!(%error, "Login failed");
                state.token = None;
                state.logging_in = false;
                state.last_error = Some(error);
                SmallVec::new()
            },
            AuthAction::ProfileLoaded { ticket, user } => {
                let id = user.id.clone();
                if state.profile.complete_fetch(ticket, user) {
                    tracing::debug!(user = %id, "Profile loaded");
                }
                SmallVec::new()
            },
            AuthAction::ProfileFailed { ticket, error } => {
                if !state.profile.fail_fetch(ticket) {
                    tracing::debug!(%error, "Dropping stale profile failure");
                    return SmallVec::new();
                }
                tracing::warn!(%error, "Profile request failed");
                if error == ApiError::Unauthorized {
                    state.token = None;
                }
                state.last_error = Some(error);
                SmallVec::new()
            },
            AuthAction::Logout => {
                tracing::info!("Logged out");
                state.token = None;
                state.logging_in = false;
                state.last_error = None;
                state.profile.clear();
                state.profile.cancel_fetch();
                SmallVec::new()
            },
        }
    }
}
