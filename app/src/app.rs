//! Application state, actions and the combined reducer
//!
//! Feature reducers are scoped to their slice of [`AppState`]. A final
//! reducer reacts to completions that concern more than one feature:
//! logins and registrations push notifications, and a registration starts
//! the session with the returned token.

use crate::auth::{AuthAction, AuthReducer, AuthState};
use crate::environment::AppEnvironment;
use crate::notification::{
    NewNotification, NotificationAction, NotificationReducer, NotificationState,
};
use crate::project::{ProjectAction, ProjectReducer, ProjectState};
use crate::user_registration::{RegistrationAction, RegistrationReducer, RegistrationState};
use mentorhub_collections::DEFAULT_PAGE_SIZE;
use mentorhub_core::composition::{BoxedReducer, CombinedReducer, combine_reducers, scope_reducer};
use mentorhub_core::{SmallVec, async_effect, effect::Effect, reducer::Reducer, smallvec};
use std::num::NonZeroUsize;

/// State of every feature module
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    /// Session
    pub auth: AuthState,
    /// Notification queue
    pub notifications: NotificationState,
    /// Registration form
    pub registration: RegistrationState,
    /// Projects
    pub projects: ProjectState,
}

impl AppState {
    /// Initial state with `page_size` records per listing page
    #[must_use]
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self {
            auth: AuthState::default(),
            notifications: NotificationState::default(),
            registration: RegistrationState::default(),
            projects: ProjectState::new(page_size),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Actions of every feature module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Session
    Auth(AuthAction),
    /// Notification queue
    Notification(NotificationAction),
    /// Registration form
    Registration(RegistrationAction),
    /// Projects
    Project(ProjectAction),
}

impl From<AuthAction> for AppAction {
    fn from(action: AuthAction) -> Self {
        Self::Auth(action)
    }
}

impl From<NotificationAction> for AppAction {
    fn from(action: NotificationAction) -> Self {
        Self::Notification(action)
    }
}

impl From<RegistrationAction> for AppAction {
    fn from(action: RegistrationAction) -> Self {
        Self::Registration(action)
    }
}

impl From<ProjectAction> for AppAction {
    fn from(action: ProjectAction) -> Self {
        Self::Project(action)
    }
}

/// Cross-feature reactions
#[derive(Debug, Clone, Copy, Default)]
struct SessionHooks;

impl SessionHooks {
    fn dispatch(action: impl Into<AppAction>) -> Effect<AppAction> {
        let action = action.into();
        async_effect! { Some(action) }
    }

    fn notify(notification: NewNotification) -> Effect<AppAction> {
        Self::dispatch(NotificationAction::Push(notification))
    }
}

impl Reducer for SessionHooks {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        _state: &mut Self::State,
        action: Self::Action,
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::Auth(AuthAction::LoggedIn { .. }) => {
                smallvec![Self::notify(NewNotification::login_success())]
            },
            AppAction::Auth(AuthAction::LoginFailed { .. }) => {
                smallvec![Self::notify(NewNotification::login_error())]
            },
            AppAction::Registration(RegistrationAction::Registered { token }) => smallvec![
                Self::dispatch(AuthAction::SessionStarted { token }),
                Self::notify(NewNotification::register_success()),
            ],
            AppAction::Registration(RegistrationAction::RegisterFailed { .. }) => {
                smallvec![Self::notify(NewNotification::register_error())]
            },
            _ => SmallVec::new(),
        }
    }
}

/// Root reducer: scoped feature reducers followed by the session hooks
#[derive(Clone)]
pub struct AppReducer {
    inner: CombinedReducer<AppState, AppAction, AppEnvironment>,
}

impl AppReducer {
    /// Build the root reducer
    #[must_use]
    pub fn new() -> Self {
        let reducers: Vec<BoxedReducer<AppState, AppAction, AppEnvironment>> = vec![
            Box::new(scope_reducer(
                AuthReducer::new(),
                |state: &mut AppState| &mut state.auth,
                |action| match action {
                    AppAction::Auth(action) => Some(action),
                    _ => None,
                },
                AppAction::Auth,
            )),
            Box::new(scope_reducer(
                NotificationReducer::new(),
                |state: &mut AppState| &mut state.notifications,
                |action| match action {
                    AppAction::Notification(action) => Some(action),
                    _ => None,
                },
                AppAction::Notification,
            )),
            Box::new(scope_reducer(
                RegistrationReducer::new(),
                |state: &mut AppState| &mut state.registration,
                |action| match action {
                    AppAction::Registration(action) => Some(action),
                    _ => None,
                },
                AppAction::Registration,
            )),
            Box::new(scope_reducer(
                ProjectReducer::new(),
                |state: &mut AppState| &mut state.projects,
                |action| match action {
                    AppAction::Project(action) => Some(action),
                    _ => None,
                },
                AppAction::Project,
            )),
            Box::new(SessionHooks),
        ];

        Self {
            inner: combine_reducers(reducers),
        }
    }
}

impl Default for AppReducer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppReducer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppReducer")
            .field("reducers", &self.inner.len())
            .finish()
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        self.inner.reduce(state, action, env)
    }
}
