//! Account registration

pub mod reducer;
pub mod types;

pub use reducer::RegistrationReducer;
pub use types::{Registration, RegistrationAction, RegistrationState};
