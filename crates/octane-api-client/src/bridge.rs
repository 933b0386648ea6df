//! One method per REST endpoint of the room service
//!
//! Each method sends a single request through [`FetchBase`] and maps the
//! response to an [`ApiOutcome`]: a status in `100..300` is parsed into the
//! endpoint's value, anything else becomes the server's [`ErrorResponse`].

use octane_http::HttpMethod;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    error_code::ERR_INVALID_RESPONSE,
    error_response::{ApiOutcome, ErrorResponse},
    fetch::{FetchBase, FetchBody, FetchResponse},
    types::{ContentStatus, ContentType, HealthResult, RoomId, RoomStatus},
};

/// What `POST /room/{id}` asks the server to do with the device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomRequest {
    Connect,
    Disconnect,
}

/// One method per server endpoint, each a single round trip
pub struct ApiBridge<F: FetchBase> {
    fetch: F,
}

impl<F: FetchBase> ApiBridge<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }

    pub fn fetch(&self) -> &F {
        &self.fetch
    }

    /// `GET /health`
    pub async fn health_get(&self) -> ApiOutcome<HealthResult> {
        let response = self.fetch.request(HttpMethod::Get, "/health").await;
        expect_json(response).into()
    }

    /// `POST /room`: create a room
    pub async fn room_post(&self, name: &str) -> ApiOutcome<RoomId> {
        let response = self
            .fetch
            .request_json(HttpMethod::Post, "/room", &json!({ "name": name }))
            .await;
        expect_json(response).into()
    }

    /// `GET /room/{id}`
    pub async fn room_id_get(&self, id: u64) -> ApiOutcome<RoomStatus> {
        let response = self.fetch.request(HttpMethod::Get, &room_path(id)).await;
        expect_json(response).into()
    }

    /// `DELETE /room/{id}`
    pub async fn room_id_delete(&self, id: u64) -> ApiOutcome<()> {
        let response = self.fetch.request(HttpMethod::Delete, &room_path(id)).await;
        expect_success(response).into()
    }

    /// `POST /room/{id}`: connect a device to a room or disconnect it
    pub async fn room_id_post(&self, id: u64, name: &str, request: RoomRequest) -> ApiOutcome<()> {
        let body = json!({ "name": name, "request": request });
        let response = self
            .fetch
            .request_json(HttpMethod::Post, &room_path(id), &body)
            .await;
        expect_success(response).into()
    }

    /// `GET /room/{id}/status`
    pub async fn room_id_status_get(&self, id: u64) -> ApiOutcome<ContentStatus> {
        let response = self
            .fetch
            .request(HttpMethod::Get, &format!("{}/status", room_path(id)))
            .await;
        expect_json(response).into()
    }

    /// `PUT /room/{id}/status`
    ///
    /// `name` is only sent for `file` content and falls back to `"file"`.
    pub async fn room_id_status_put(
        &self,
        id: u64,
        status: &ContentStatus,
        hash: &str,
    ) -> ApiOutcome<()> {
        let response = self
            .fetch
            .request_json(
                HttpMethod::Put,
                &format!("{}/status", room_path(id)),
                &status_body(status, hash),
            )
            .await;
        expect_success(response).into()
    }

    /// `DELETE /room/{id}/status`
    pub async fn room_id_status_delete(&self, id: u64) -> ApiOutcome<()> {
        let response = self
            .fetch
            .request(HttpMethod::Delete, &format!("{}/status", room_path(id)))
            .await;
        expect_success(response).into()
    }

    /// `GET /room/{id}/content`: raw content bytes
    pub async fn room_id_content_get(&self, id: u64) -> ApiOutcome<Vec<u8>> {
        let response = self
            .fetch
            .request(HttpMethod::Get, &format!("{}/content", room_path(id)))
            .await;
        expect_binary(response).into()
    }

    /// `PUT /room/{id}/content`
    pub async fn room_id_content_put(&self, id: u64, data: &[u8], mime: &str) -> ApiOutcome<()> {
        let response = self
            .fetch
            .request_binary(HttpMethod::Put, &format!("{}/content", room_path(id)), mime, data)
            .await;
        expect_success(response).into()
    }

    /// `DELETE /room/{id}/content`
    pub async fn room_id_content_delete(&self, id: u64) -> ApiOutcome<()> {
        let response = self
            .fetch
            .request(HttpMethod::Delete, &format!("{}/content", room_path(id)))
            .await;
        expect_success(response).into()
    }
}

fn room_path(id: u64) -> String {
    format!("/room/{id}")
}

fn status_body(status: &ContentStatus, hash: &str) -> Value {
    let mut body = json!({
        "device": status.device,
        "timestamp": status.timestamp,
        "type": status.content_type.as_str(),
        "mime": status.mime,
        "hash": hash,
    });
    if status.content_type == ContentType::File {
        body["name"] = Value::String(status.name.clone().unwrap_or_else(|| "file".to_string()));
    }
    body
}

/// Map a non-success status to the error it describes
///
/// A JSON body must have the `{code, reason}` shape. Any other body is
/// reported as `ERR_INVALID_RESPONSE` with the headers, status line and body
/// text in the reason.
pub fn check_status_code(response: &FetchResponse) -> Result<(), ErrorResponse> {
    if (100..300).contains(&response.status_code) {
        return Ok(());
    }

    let error = match &response.body {
        FetchBody::Json(json) => match ErrorResponse::deserialize(json) {
            Ok(error) => error,
            Err(e) => ErrorResponse::new(
                ERR_INVALID_RESPONSE,
                format!("Invalid error response: {e}"),
            ),
        },
        FetchBody::Binary(body) => {
            let headers: String = response
                .headers
                .iter()
                .map(|(name, value)| format!("{name}: {value} "))
                .collect();
            ErrorResponse::new(
                ERR_INVALID_RESPONSE,
                format!(
                    "Invalid response, json not returned. {headers}status line = {} body = {}",
                    response.status_line,
                    String::from_utf8_lossy(body)
                ),
            )
        }
    };

    debug!("request failed with {}: {}", response.status_code, error);
    Err(error)
}

fn expect_success(response: ApiOutcome<FetchResponse>) -> Result<(), ErrorResponse> {
    check_status_code(&response.into_result()?)
}

fn expect_json<T: DeserializeOwned>(response: ApiOutcome<FetchResponse>) -> Result<T, ErrorResponse> {
    let response = response.into_result()?;
    check_status_code(&response)?;
    match response.body {
        FetchBody::Json(json) => serde_json::from_value(json).map_err(|e| {
            ErrorResponse::new(ERR_INVALID_RESPONSE, format!("Invalid response: {e}"))
        }),
        FetchBody::Binary(_) => Err(ErrorResponse::new(
            ERR_INVALID_RESPONSE,
            "Invalid response, json not returned",
        )),
    }
}

fn expect_binary(response: ApiOutcome<FetchResponse>) -> Result<Vec<u8>, ErrorResponse> {
    let response = response.into_result()?;
    check_status_code(&response)?;
    match response.body {
        FetchBody::Binary(body) => Ok(body),
        FetchBody::Json(_) => Err(ErrorResponse::new(
            ERR_INVALID_RESPONSE,
            "Invalid response, binary not returned",
        )),
    }
}
