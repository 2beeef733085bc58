//! Application error type

use crate::config::ConfigError;
use mentorhub_api::ApiError;
use mentorhub_runtime::StoreError;
use thiserror::Error;

/// Errors returned by [`Hub`](crate::hub::Hub) operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// The REST call failed
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The store rejected the action or the completion never arrived
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation needs a logged-in user
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The operation works on the current project, and none is loaded
    #[error("No project loaded")]
    NoCurrentProject,

    /// The store delivered a completion the operation cannot interpret
    #[error("Unexpected completion: {0}")]
    UnexpectedOutcome(String),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
}
