//! Blocking client for the posts REST service.
//!
//! # Overview
//! Two layers, composed linearly:
//! - `ApiClient` performs GET/POST/PUT/DELETE against a base URL and returns
//!   every response as data, whatever its status.
//! - `PostsApi` maps post operations (create, list, read, replace, delete)
//!   onto `ApiClient` calls.
//!
//! # Design
//! - Calls are synchronous and one request each: no retries, no pagination,
//!   no caching.
//! - HTTP error statuses are data. `ApiError` is reserved for transport
//!   failures, JSON encode/decode failures, bad configuration, and
//!   `get_any_post` finding nothing.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod config;
pub mod error;
pub mod http;
pub mod posts;
pub mod types;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{ApiClient, HttpMethod, HttpResponse};
pub use posts::PostsApi;
pub use types::{Post, PostContent};
