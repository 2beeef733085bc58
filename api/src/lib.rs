//! # Mentorhub API
//!
//! Request helper for the Mentorhub REST server.
//!
//! Feature reducers never talk HTTP directly. They describe a request with
//! [`ApiRequest`] and hand it to an injected [`ApiClient`], which resolves
//! with the JSON body or rejects with an [`ApiError`].
//!
//! ## Example
//!
//! ```no_run
//! use mentorhub_api::{ApiClient, ApiConfig, ApiRequest, AuthToken, HttpApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HttpApiClient::new(ApiConfig::new("http://localhost:9000"))?;
//!
//!     let projects = client
//!         .send(ApiRequest::get("/api/projects").with_token(AuthToken::new("token")))
//!         .await?;
//!
//!     println!("Projects: {projects}");
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod request;

// Re-export main types for convenience
pub use client::{ApiClient, ApiFuture, HttpApiClient, delete_json, get_json, post_json, put_json};
pub use config::ApiConfig;
pub use error::ApiError;
pub use request::{ApiRequest, AuthToken, Method};
