//! # Mentorhub
//!
//! Client-side state for the Mentorhub project tracker.
//!
//! Four feature modules, each a reducer over its own slice of [`AppState`]:
//!
//! - [`auth`]: login, session token and the current user
//! - [`notification`]: success and warning banners with auto-dismiss
//! - [`user_registration`]: account creation form
//! - [`project`]: filtered, paginated project listing plus detail page,
//!   creation draft, personal lists, favorites and admin flags
//!
//! [`AppReducer`] composes them. [`Hub`] wraps the store in one `async fn`
//! per operation.
//!
//! ## Example
//!
//! ```no_run
//! use mentorhub::{AppConfig, Hub};
//!
//! # async fn run() -> Result<(), mentorhub::AppError> {
//! let hub = Hub::new(AppConfig::from_env()?)?;
//! hub.login("ada@example.com", "secret").await?;
//!
//! let page = hub.fetch_projects().await?;
//! let page = hub.set_filter("rust").await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod environment;
pub mod error;
pub mod hub;
pub mod notification;
pub mod project;
pub mod user_registration;

pub use app::{AppAction, AppReducer, AppState};
pub use config::{AppConfig, ConfigError};
pub use environment::{AppEnvironment, LoggingNavigator};
pub use error::AppError;
pub use hub::{AppStore, Hub};
