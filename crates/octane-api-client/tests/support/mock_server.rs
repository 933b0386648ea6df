//! Shared setup for tests running the client against `MockHttpClient`

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use octane_api_client::{ApiBridge, ApiClient, Fetch};
use octane_http::{HttpMethod, HttpResponse, MockHttpClient};
use serde_json::json;

pub const ORIGIN: &str = "http://localhost:3000";
pub const BASE_URL: &str = "/api/v1";
pub const TOKEN: &str = "mock";

pub fn path(endpoint: &str) -> String {
    format!("{BASE_URL}{endpoint}")
}

pub fn bridge(mock: &Arc<MockHttpClient>) -> ApiBridge<Fetch> {
    ApiBridge::new(Fetch::new(TOKEN, ORIGIN, BASE_URL, mock.clone()))
}

pub fn client(mock: &Arc<MockHttpClient>) -> ApiClient<Fetch> {
    ApiClient::with_bridge(bridge(mock), Duration::from_secs(1800))
}

pub fn respond_health(mock: &MockHttpClient, health: &str, message: &str) {
    mock.respond(
        HttpMethod::Get,
        path("/health"),
        HttpResponse::json(200, &json!({"health": health, "message": message})),
    );
}

pub fn respond_ok(mock: &MockHttpClient, method: HttpMethod, endpoint: &str) {
    mock.respond(method, path(endpoint), HttpResponse::empty(200));
}

pub fn respond_error(
    mock: &MockHttpClient,
    method: HttpMethod,
    endpoint: &str,
    status: u16,
    code: &str,
    reason: &str,
) {
    mock.respond(
        method,
        path(endpoint),
        HttpResponse::json(status, &json!({"code": code, "reason": reason})),
    );
}
