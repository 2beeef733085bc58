//! Authentication: login, session token and the current user's profile

pub mod reducer;
pub mod types;

pub use reducer::AuthReducer;
pub use types::{AuthAction, AuthState, Credentials, TokenResponse, User, UserId};
