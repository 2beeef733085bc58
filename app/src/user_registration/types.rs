//! Registration form state and actions

use mentorhub_api::{ApiError, AuthToken};
use mentorhub_collections::NewModel;
use serde::Serialize;
use std::fmt;

/// Registration form payload for `/api/users`
#[derive(Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Display name
    pub name: String,
    /// Login email
    pub email: String,
    /// Plain-text password
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration state: the form draft and the request status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationState {
    pub(super) new_model: NewModel<Registration>,
    pub(super) fetching: bool,
    pub(super) last_error: Option<ApiError>,
}

impl RegistrationState {
    /// Current form draft
    #[must_use]
    pub const fn draft(&self) -> &Registration {
        self.new_model.draft()
    }

    /// Whether the registration request is in flight
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Error of the last failed registration
    #[must_use]
    pub const fn last_error(&self) -> Option<&ApiError> {
        self.last_error.as_ref()
    }
}

/// Registration actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationAction {
    /// Replace the form draft
    SetDraft(Registration),
    /// Clear the form
    Reset,
    /// Submit the draft
    Register,
    /// The server created the account
    Registered {
        /// Session token for the new account
        token: AuthToken,
    },
    /// The server rejected the registration
    RegisterFailed {
        /// Why
        error: ApiError,
    },
}
