//! HTTP transport error types

use thiserror::Error;

/// Result type for HTTP operations
pub type Result<T> = std::result::Result<T, HttpError>;

/// HTTP transport errors
///
/// A non-2xx status is not an error at this layer; it comes back as an
/// ordinary [`HttpResponse`](crate::HttpResponse).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network request failed
    #[error("Network request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Method and body do not go together (e.g. a GET with a body)
    #[error("Incorrect HTTP method: {0}")]
    IncorrectMethod(String),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Header name or value that cannot be sent
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// Invalid proxy configuration
    #[error("Invalid proxy configuration: {0}")]
    InvalidProxy(String),

    /// Transport failed without an underlying reqwest error
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Client build error
    #[error("Failed to build HTTP client: {0}")]
    BuildError(String),
}

impl HttpError {
    /// Check if the request never produced a response
    pub fn is_connection_error(&self) -> bool {
        match self {
            HttpError::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            HttpError::Transport(_) => true,
            _ => false,
        }
    }

    /// Check if the error comes from building the client rather than sending
    pub fn is_setup_error(&self) -> bool {
        matches!(self, HttpError::InvalidProxy(_) | HttpError::BuildError(_))
    }
}
