//! In-memory transport double
//!
//! `MockHttpClient` answers from a route table instead of the network and
//! keeps every request it receives, so tests can check both what the caller
//! sent and how it handles the reply.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use crate::{
    client::{check_body_allowed, HttpClientTrait},
    error::{HttpError, Result},
    types::{HttpMethod, HttpRequest, HttpResponse},
};

#[derive(Debug, Clone)]
enum Reply {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Debug, Clone)]
struct Route {
    method: HttpMethod,
    uri: String,
    reply: Reply,
}

/// Transport double keyed by method and URI
#[derive(Debug, Default)]
pub struct MockHttpClient {
    routes: Mutex<Vec<Route>>,
    received: Mutex<Vec<(String, HttpRequest)>>,
}

impl MockHttpClient {
    /// Empty route table; every request gets a 404 until routes are added
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `method uri` with `response`. Later routes for the same key win.
    pub fn respond(&self, method: HttpMethod, uri: impl Into<String>, response: HttpResponse) {
        self.routes.lock().push(Route {
            method,
            uri: uri.into(),
            reply: Reply::Response(response),
        });
    }

    /// Fail `method uri` as if the connection broke
    pub fn fail(&self, method: HttpMethod, uri: impl Into<String>, reason: impl Into<String>) {
        self.routes.lock().push(Route {
            method,
            uri: uri.into(),
            reply: Reply::Failure(reason.into()),
        });
    }

    /// Every request received so far, with the origin it was sent to
    pub fn received(&self) -> Vec<(String, HttpRequest)> {
        self.received.lock().clone()
    }

    /// Requests received for `method uri`
    pub fn received_for(&self, method: HttpMethod, uri: &str) -> Vec<HttpRequest> {
        self.received
            .lock()
            .iter()
            .filter(|(_, request)| request.method == method && request.uri == uri)
            .map(|(_, request)| request.clone())
            .collect()
    }

    /// Number of requests received for `method uri`
    pub fn hits(&self, method: HttpMethod, uri: &str) -> usize {
        self.received_for(method, uri).len()
    }
}

#[async_trait]
impl HttpClientTrait for MockHttpClient {
    async fn request(&self, origin: &str, request: &HttpRequest) -> Result<HttpResponse> {
        check_body_allowed(request)?;
        debug!("mock HTTP {}: {}{}", request.method, origin, request.uri);
        self.received
            .lock()
            .push((origin.to_string(), request.clone()));

        let reply = self
            .routes
            .lock()
            .iter()
            .rev()
            .find(|route| route.method == request.method && route.uri == request.uri)
            .map(|route| route.reply.clone());

        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Failure(reason)) => Err(HttpError::Transport(reason)),
            None => Ok(HttpResponse::json(
                404,
                &serde_json::json!({
                    "code": "ERR_NOT_FOUND",
                    "reason": format!("no route for {} {}", request.method, request.uri),
                }),
            )),
        }
    }
}
