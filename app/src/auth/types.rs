//! Session state, user records and auth actions

use mentorhub_api::{ApiError, AuthToken};
use mentorhub_collections::{FetchTicket, ModelSlot, Named};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned user id
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    /// Wrap a raw id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw id
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A user as returned by `/api/users/me` and project contributor lists
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    /// Server id
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Role (`user`, `mentor`, `admin`)
    pub role: String,
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Login form payload for `/auth/local`
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl Credentials {
    /// Build a login payload
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests
    pub token: AuthToken,
}

/// Session state
///
/// The profile is a model slot so that a response arriving after logout,
/// or after a newer session started, is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub(super) token: Option<AuthToken>,
    pub(super) profile: ModelSlot<User>,
    pub(super) logging_in: bool,
    pub(super) last_error: Option<ApiError>,
}

impl AuthState {
    /// Bearer token of the session
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Profile of the logged-in user, once loaded
    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.profile.model()
    }

    /// Whether a login or profile request is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.logging_in || self.profile.is_fetching()
    }

    /// Whether the session holds a token
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    /// Error of the last failed request
    #[must_use]
    pub const fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }
}

/// Auth actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    // Commands
    /// Log in with email and password
    Login {
        /// Login payload
        credentials: Credentials,
    },
    /// Adopt a token obtained elsewhere (registration) and load the profile
    SessionStarted {
        /// Bearer token
        token: AuthToken,
    },
    /// Drop the session
    Logout,

    // Events
    /// Login succeeded
    LoggedIn {
        /// Bearer token
        token: AuthToken,
    },
    /// Login failed
    LoginFailed {
        /// Why
        error: ApiError,
    },
    /// Profile loaded
    ProfileLoaded {
        /// Request answered
        ticket: FetchTicket,
        /// Logged-in user
        user: User,
    },
    /// Profile request failed
    ProfileFailed {
        /// Request answered
        ticket: FetchTicket,
        /// Why
        error: ApiError,
    },
}
