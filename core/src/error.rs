//! Error types for the posts API client.
//!
//! # Design
//! Non-2xx responses are not errors: they come back as `HttpResponse` values
//! for the caller to inspect. `ApiError` covers only what prevents a response
//! from being produced or interpreted, plus the single local failure raised
//! by `PostsApi::get_any_post`.

use thiserror::Error;

/// Errors returned by `ApiClient` and `PostsApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response: connection refused, DNS
    /// failure, timeout, or the body could not be read.
    #[error("transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The service still listed no posts after one was ensured to exist.
    #[error("no posts found")]
    NoPosts,

    /// A configuration value taken from the environment was invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
