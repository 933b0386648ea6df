//! Request builder sitting between the bridge and the transport
//!
//! [`Fetch`] turns an endpoint path into a full [`HttpRequest`] (base URL,
//! API token, body and MIME type), sends it, and decodes JSON responses. The
//! [`FetchBase`] trait lets the bridge run on a fake instead.

use std::sync::Arc;

use async_trait::async_trait;
use octane_http::{HeaderFields, HttpClientTrait, HttpError, HttpMethod, HttpRequest};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{
    error_code::{
        ERR_HTTP_CLIENT_INITIALIZATION_FAILED, ERR_HTTP_CONNECTION_FAILED,
        ERR_INCORRECT_HTTP_METHOD, ERR_INVALID_REQUEST, ERR_JSON_PARSE_FAILED,
    },
    error_response::{make_error, ApiOutcome, ErrorResponse},
    result::Outcome,
};

/// Header carrying the API token on every request
pub const TOKEN_HEADER: &str = "X-Octane-API-Token";

/// Decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum FetchBody {
    /// Body of a response declared as `application/json`
    Json(Value),
    Binary(Vec<u8>),
}

/// Response after body decoding
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status_code: u16,
    pub status_line: String,
    pub headers: HeaderFields,
    pub body: FetchBody,
}

impl FetchResponse {
    /// Response carrying a decoded JSON body
    pub fn json(status_code: u16, body: Value) -> Self {
        Self::with_body(status_code, FetchBody::Json(body))
    }

    /// Response carrying a raw body
    pub fn binary(status_code: u16, body: Vec<u8>) -> Self {
        Self::with_body(status_code, FetchBody::Binary(body))
    }

    fn with_body(status_code: u16, body: FetchBody) -> Self {
        let response = octane_http::HttpResponse::empty(status_code);
        Self {
            status_code,
            status_line: response.status_line,
            headers: HeaderFields::new(),
            body,
        }
    }
}

/// Request operations the bridge is written against
#[async_trait]
pub trait FetchBase: Send + Sync {
    /// Send a request without body
    async fn request(&self, method: HttpMethod, path: &str) -> ApiOutcome<FetchResponse>;

    /// Send a JSON body
    async fn request_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: &Value,
    ) -> ApiOutcome<FetchResponse>;

    /// Send raw bytes of the given MIME type
    async fn request_binary(
        &self,
        method: HttpMethod,
        path: &str,
        mime: &str,
        body: &[u8],
    ) -> ApiOutcome<FetchResponse>;
}

/// [`FetchBase`] over an [`HttpClientTrait`] transport
pub struct Fetch {
    token: String,
    origin: String,
    base_url: String,
    client: Arc<dyn HttpClientTrait>,
}

impl Fetch {
    pub fn new(
        token: impl Into<String>,
        origin: impl Into<String>,
        base_url: impl Into<String>,
        client: Arc<dyn HttpClientTrait>,
    ) -> Self {
        Self {
            token: token.into(),
            origin: origin.into(),
            base_url: base_url.into(),
            client,
        }
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest::new(method, format!("{}{}", self.base_url, path))
            .with_header(TOKEN_HEADER, self.token.as_str())
    }

    async fn send(&self, request: HttpRequest) -> ApiOutcome<FetchResponse> {
        let response = match self.client.request(&self.origin, &request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("{} {} failed: {}", request.method, request.uri, e);
                return Outcome::error(e.into());
            }
        };

        let is_json = response
            .content_type()
            .is_some_and(|mime| mime.starts_with("application/json"));

        let body = if is_json {
            match decode_json(&response.body) {
                Ok(value) => FetchBody::Json(value),
                Err(e) => {
                    return make_error(
                        ERR_JSON_PARSE_FAILED,
                        format!("Failed to parse JSON response: {e}"),
                    )
                }
            }
        } else {
            FetchBody::Binary(response.body)
        };

        debug!(
            "{} {} -> {} ({})",
            request.method,
            request.uri,
            response.status_code,
            if is_json { "json" } else { "binary" }
        );

        Outcome::ok(FetchResponse {
            status_code: response.status_code,
            status_line: response.status_line,
            headers: response.headers,
            body,
        })
    }
}

#[async_trait]
impl FetchBase for Fetch {
    async fn request(&self, method: HttpMethod, path: &str) -> ApiOutcome<FetchResponse> {
        self.send(self.build(method, path)).await
    }

    async fn request_json(
        &self,
        method: HttpMethod,
        path: &str,
        body: &Value,
    ) -> ApiOutcome<FetchResponse> {
        match self.build(method, path).with_json(body) {
            Ok(request) => self.send(request).await,
            Err(e) => Outcome::error(e.into()),
        }
    }

    async fn request_binary(
        &self,
        method: HttpMethod,
        path: &str,
        mime: &str,
        body: &[u8],
    ) -> ApiOutcome<FetchResponse> {
        let request = self.build(method, path).with_body(mime, body.to_vec());
        self.send(request).await
    }
}

fn decode_json(body: &[u8]) -> serde_json::Result<Value> {
    if body.is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
}

impl From<HttpError> for ErrorResponse {
    fn from(error: HttpError) -> Self {
        let code = match &error {
            HttpError::IncorrectMethod(_) => ERR_INCORRECT_HTTP_METHOD,
            HttpError::InvalidUrl(_) | HttpError::InvalidHeader(_) => ERR_INVALID_REQUEST,
            HttpError::InvalidProxy(_) | HttpError::BuildError(_) => {
                ERR_HTTP_CLIENT_INITIALIZATION_FAILED
            }
            HttpError::RequestFailed(_) | HttpError::Transport(_) => ERR_HTTP_CONNECTION_FAILED,
        };
        ErrorResponse::new(code, error.to_string())
    }
}
