//! Request helper contract and the reqwest implementation

use crate::{
    config::ApiConfig,
    error::ApiError,
    request::{ApiRequest, AuthToken, Method},
};
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by [`ApiClient::send`]
pub type ApiFuture<'a> = Pin<Box<dyn Future<Output = Result<Value, ApiError>> + Send + 'a>>;

/// Request helper used by the feature reducers
///
/// Performs one request and resolves with the JSON body on 2xx, or rejects
/// with an [`ApiError`]. Implementations inject the bearer token from the
/// request and never retry.
///
/// The trait is dyn-compatible so environments can hold `Arc<dyn ApiClient>`.
pub trait ApiClient: Send + Sync {
    /// Execute a request
    fn send(&self, request: ApiRequest) -> ApiFuture<'_>;
}

/// GET `path` and decode the body
///
/// # Errors
///
/// Returns the request error, or [`ApiError::Decode`] if the body does not
/// match `T`.
pub async fn get_json<T: DeserializeOwned>(
    client: &dyn ApiClient,
    path: &str,
    token: Option<&AuthToken>,
) -> Result<T, ApiError> {
    let mut request = ApiRequest::get(path);
    if let Some(token) = token {
        request = request.with_token(token.clone());
    }
    decode(client.send(request).await?)
}

/// POST `body` to `path` and decode the response
///
/// # Errors
///
/// Returns the request error, or [`ApiError::Decode`] on encode/decode failure.
pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
    client: &dyn ApiClient,
    path: &str,
    token: Option<&AuthToken>,
    body: &B,
) -> Result<T, ApiError> {
    send_with_body(client, Method::Post, path, token, body).await
}

/// PUT `body` to `path` and decode the response
///
/// # Errors
///
/// Returns the request error, or [`ApiError::Decode`] on encode/decode failure.
pub async fn put_json<B: Serialize + Sync, T: DeserializeOwned>(
    client: &dyn ApiClient,
    path: &str,
    token: Option<&AuthToken>,
    body: &B,
) -> Result<T, ApiError> {
    send_with_body(client, Method::Put, path, token, body).await
}

/// DELETE `path` and decode the response
///
/// # Errors
///
/// Returns the request error, or [`ApiError::Decode`] if the body does not
/// match `T`.
pub async fn delete_json<T: DeserializeOwned>(
    client: &dyn ApiClient,
    path: &str,
    token: Option<&AuthToken>,
) -> Result<T, ApiError> {
    let mut request = ApiRequest::delete(path);
    if let Some(token) = token {
        request = request.with_token(token.clone());
    }
    decode(client.send(request).await?)
}

async fn send_with_body<B: Serialize + Sync, T: DeserializeOwned>(
    client: &dyn ApiClient,
    method: Method,
    path: &str,
    token: Option<&AuthToken>,
    body: &B,
) -> Result<T, ApiError> {
    let mut request = ApiRequest::new(method, path).with_body(serde_json::to_value(body)?);
    if let Some(token) = token {
        request = request.with_token(token.clone());
    }
    decode(client.send(request).await?)
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::from)
}

/// [`ApiClient`] backed by `reqwest`
#[derive(Clone)]
pub struct HttpApiClient {
    client: Client,
    config: ApiConfig,
}

impl HttpApiClient {
    /// Create a client for the given configuration
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the underlying client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration in use
    #[must_use]
    pub const fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn execute(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = reqwest::Url::parse(&self.config.url_for(&request.path))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        tracing::debug!(method = %request.method, path = %request.path, "Sending request");

        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Delete => self.client.delete(url),
        };

        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(
                method = %request.method,
                path = %request.path,
                status = status.as_u16(),
                "Request rejected"
            );
            return Err(ApiError::from_status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(ApiError::from)
    }
}

impl ApiClient for HttpApiClient {
    fn send(&self, request: ApiRequest) -> ApiFuture<'_> {
        Box::pin(self.execute(request))
    }
}

impl std::fmt::Debug for HttpApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpApiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
