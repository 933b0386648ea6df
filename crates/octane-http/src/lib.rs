//! HTTP transport for the Octane API client
//!
//! Provides a mockable, configurable HTTP client used by `octane-api-client`.
//!
//! ## Features
//!
//! - **Trait-based design**: Mockable via `HttpClientTrait`
//! - **Value types**: `HttpRequest` / `HttpResponse` compare field by field
//! - **Configurable**: Timeouts, proxy, user-agent, redirects, pooling
//! - **Connection pooling**: Managed by underlying reqwest client
//! - **Testing support**: `MockHttpClient` (feature `test-util`) and wiremock

pub mod client;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;
pub mod types;

pub use client::{shared_client, HttpClient, HttpClientTrait};
pub use config::HttpConfig;
pub use error::{HttpError, Result};
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockHttpClient;
pub use types::{HeaderFields, HttpMethod, HttpRequest, HttpResponse, HttpVersion};

/// Re-export commonly used types
pub use reqwest::{header, StatusCode};
