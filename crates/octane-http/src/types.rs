//! Request and response value types
//!
//! Both types are plain values: equality is field-wise and there is no
//! identity beyond the fields.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::{HttpError, Result};

/// Header fields, keyed by name.
pub type HeaderFields = BTreeMap<String, String>;

/// HTTP methods used by the Octane API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Method name as sent on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Returns `true` if a request body may be sent with this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// HTTP protocol version of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpVersion {
    Http1_0,
    #[default]
    Http1_1,
    Http2,
    Http3,
}

impl HttpVersion {
    /// Version as written in a status line, e.g. `HTTP/1.1`
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVersion::Http1_0 => "HTTP/1.0",
            HttpVersion::Http1_1 => "HTTP/1.1",
            HttpVersion::Http2 => "HTTP/2",
            HttpVersion::Http3 => "HTTP/3",
        }
    }
}

impl From<reqwest::Version> for HttpVersion {
    fn from(version: reqwest::Version) -> Self {
        if version == reqwest::Version::HTTP_10 {
            HttpVersion::Http1_0
        } else if version == reqwest::Version::HTTP_2 {
            HttpVersion::Http2
        } else if version == reqwest::Version::HTTP_3 {
            HttpVersion::Http3
        } else {
            HttpVersion::Http1_1
        }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request, relative to an origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpRequest {
    /// Request method
    pub method: HttpMethod,
    /// Path (and query) appended to the origin, e.g. `/api/v1/room/1`
    pub uri: String,
    /// MIME type of the body, sent as `Content-Type`
    pub mime: Option<String>,
    /// Extra header fields
    pub headers: HeaderFields,
    /// Request body; empty for GET and DELETE
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Create a request without body or headers
    pub fn new(method: HttpMethod, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            mime: None,
            headers: HeaderFields::new(),
            body: Vec::new(),
        }
    }

    /// Add a header field
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Attach a raw body with its MIME type
    pub fn with_body(mut self, mime: impl Into<String>, body: Vec<u8>) -> Self {
        self.mime = Some(mime.into());
        self.body = body;
        self
    }

    /// Attach a JSON body
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| HttpError::Transport(format!("failed to encode JSON body: {e}")))?;
        Ok(self.with_body("application/json", bytes))
    }
}

/// An HTTP response, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HttpResponse {
    /// Status code, e.g. 200 or 404
    pub status_code: u16,
    /// Status line, e.g. `HTTP/2 200 OK`
    pub status_line: String,
    /// Protocol version
    pub version: HttpVersion,
    /// Header fields with lower-cased names
    pub headers: HeaderFields,
    /// Response body
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response with a status line derived from the code
    pub fn new(status_code: u16, body: Vec<u8>) -> Self {
        let version = HttpVersion::Http1_1;
        Self {
            status_code,
            status_line: status_line(version, status_code),
            version,
            headers: HeaderFields::new(),
            body,
        }
    }

    /// Build a response carrying a JSON document
    pub fn json(status_code: u16, body: &serde_json::Value) -> Self {
        Self::new(status_code, body.to_string().into_bytes())
            .with_header("content-type", "application/json")
    }

    /// Build a response carrying raw bytes of the given MIME type
    pub fn binary(status_code: u16, mime: &str, body: Vec<u8>) -> Self {
        Self::new(status_code, body).with_header("content-type", mime)
    }

    /// Build a response without body
    pub fn empty(status_code: u16) -> Self {
        Self::new(status_code, Vec::new())
    }

    /// Add a header field; the name is lower-cased
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Returns `true` for 1xx and 2xx status codes
    pub fn is_success(&self) -> bool {
        (100..300).contains(&self.status_code)
    }

    /// Value of the `Content-Type` header, if any
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get("content-type").map(String::as_str)
    }
}

pub(crate) fn status_line(version: HttpVersion, status_code: u16) -> String {
    let reason = reqwest::StatusCode::from_u16(status_code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("");
    format!("{version} {status_code} {reason}").trim_end().to_string()
}
