//! High level client
//!
//! [`ApiClient`] wraps [`ApiBridge`] with the state a device needs while it
//! talks to the service: a cached health check run before every call, the
//! room the device is connected to, and conversion between [`Content`] and
//! the bytes stored on the server.

use std::sync::Arc;
use std::time::{Duration, Instant};

use octane_http::HttpClient;
use tracing::{debug, info, warn};

use crate::{
    bridge::{ApiBridge, RoomRequest},
    config::ClientConfig,
    error_code::{
        ERR_API_CLIENT_INITIALIZATION_FAILED, ERR_INVALID_REQUEST, ERR_INVALID_RESPONSE,
        ERR_ROOM_DISCONNECTED, ERR_ROOM_ID_UNDEFINED, ERR_SERVER_HEALTH_STATUS_FAULTY,
    },
    error_response::{make_error, ApiOutcome, ErrorResponse},
    fetch::{Fetch, FetchBase},
    hash::generate_hash,
    multi_file::{MultiFileCompressor, MultiFileDecompressor},
    result::{try_outcome, Outcome},
    types::{
        ConnectionStatus, Content, ContentData, ContentStatus, ContentType, Health,
        HealthResult, Response, RoomId, RoomStatus,
    },
};

/// Health-gated room client that tracks the current connection
pub struct ApiClient<F: FetchBase = Fetch> {
    bridge: ApiBridge<F>,
    health_check_interval: Duration,
    last_health: Option<(Instant, HealthResult)>,
    connection: ConnectionStatus,
}

impl ApiClient<Fetch> {
    /// Build a client talking HTTP to the server named in `config`
    pub fn new(config: ClientConfig) -> ApiOutcome<Self> {
        if let Err(e) = config.validate() {
            return make_error(ERR_API_CLIENT_INITIALIZATION_FAILED, e.to_string());
        }

        let client = try_outcome!(HttpClient::new(config.http.clone()));
        let fetch = Fetch::new(
            config.token.as_str(),
            config.origin.as_str(),
            config.base_url.as_str(),
            Arc::new(client),
        );

        info!("API client for {}{}", config.origin, config.base_url);
        Outcome::ok(Self::with_bridge(
            ApiBridge::new(fetch),
            config.health_check_interval(),
        ))
    }
}

impl<F: FetchBase> ApiClient<F> {
    pub fn with_bridge(bridge: ApiBridge<F>, health_check_interval: Duration) -> Self {
        Self {
            bridge,
            health_check_interval,
            last_health: None,
            connection: ConnectionStatus::default(),
        }
    }

    pub fn bridge(&self) -> &ApiBridge<F> {
        &self.bridge
    }

    pub fn connection_status(&self) -> &ConnectionStatus {
        &self.connection
    }

    /// Check the server health, ignoring any cached result
    pub async fn init(&mut self) -> ApiOutcome<Response<()>> {
        self.last_health = None;
        let health = try_outcome!(self.check_health().await);
        Outcome::ok(Response::new((), &health))
    }

    /// `GET /health`, uncached and ungated
    pub async fn health(&self) -> ApiOutcome<HealthResult> {
        self.bridge.health_get().await
    }

    pub async fn create_room(&mut self, name: &str) -> ApiOutcome<Response<RoomId>> {
        let health = try_outcome!(self.check_health().await);
        let room = try_outcome!(self.bridge.room_post(name).await);
        info!("created room {}", room.id);
        Outcome::ok(Response::new(room, &health))
    }

    /// Join room `id` as device `name`
    pub async fn connect_room(&mut self, id: u64, name: &str) -> ApiOutcome<Response<()>> {
        let health = try_outcome!(self.check_health().await);
        try_outcome!(self.bridge.room_id_post(id, name, RoomRequest::Connect).await);

        self.connection = ConnectionStatus {
            connected: true,
            id,
            name: name.to_string(),
        };
        info!("connected to room {} as {}", id, name);
        Outcome::ok(Response::new((), &health))
    }

    /// Leave the connected room
    pub async fn disconnect_room(&mut self) -> ApiOutcome<Response<()>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.connected_room());
        let name = self.connection.name.clone();
        try_outcome!(self.bridge.room_id_post(id, &name, RoomRequest::Disconnect).await);

        self.connection = ConnectionStatus::default();
        info!("disconnected from room {}", id);
        Outcome::ok(Response::new((), &health))
    }

    /// Status of room `id`, or of the connected room
    pub async fn get_room_status(&mut self, id: Option<u64>) -> ApiOutcome<Response<RoomStatus>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.resolve_room(id));
        let status = try_outcome!(self.bridge.room_id_get(id).await);
        Outcome::ok(Response::new(status, &health))
    }

    /// Delete room `id`, or the connected room
    pub async fn delete_room(&mut self, id: Option<u64>) -> ApiOutcome<Response<()>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.resolve_room(id));
        try_outcome!(self.bridge.room_id_delete(id).await);

        if self.connection.connected && self.connection.id == id {
            self.connection = ConnectionStatus::default();
        }
        info!("deleted room {}", id);
        Outcome::ok(Response::new((), &health))
    }

    /// Download the content shared in the connected room
    pub async fn get_content(&mut self) -> ApiOutcome<Response<Content>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.connected_room());

        let status = try_outcome!(self.bridge.room_id_status_get(id).await);
        let bytes = try_outcome!(self.bridge.room_id_content_get(id).await);
        let data = try_outcome!(decode_content(&status, bytes));

        Outcome::ok(Response::new(Content { status, data }, &health))
    }

    /// Share `content` in the connected room
    ///
    /// The status goes first, carrying the hash of the bytes that follow.
    pub async fn upload_content(&mut self, content: &Content) -> ApiOutcome<Response<()>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.connected_room());

        let bytes = try_outcome!(encode_content(content));
        let hash = generate_hash(&bytes);
        debug!("uploading {} bytes to room {} ({})", bytes.len(), id, hash);

        try_outcome!(self.bridge.room_id_status_put(id, &content.status, &hash).await);
        try_outcome!(
            self.bridge
                .room_id_content_put(id, &bytes, &content.status.mime)
                .await
        );
        Outcome::ok(Response::new((), &health))
    }

    /// Delete the content shared in the connected room
    pub async fn delete_content(&mut self) -> ApiOutcome<Response<()>> {
        let health = try_outcome!(self.check_health().await);
        let id = try_outcome!(self.connected_room());
        try_outcome!(self.bridge.room_id_content_delete(id).await);
        Outcome::ok(Response::new((), &health))
    }

    async fn check_health(&mut self) -> Result<HealthResult, ErrorResponse> {
        if let Some((checked_at, health)) = &self.last_health {
            if checked_at.elapsed() < self.health_check_interval {
                return Ok(health.clone());
            }
        }

        let health = self.bridge.health_get().await.into_result()?;
        match health.health {
            Health::Faulty => {
                warn!("server reports faulty health: {:?}", health.message);
                self.last_health = None;
                Err(ErrorResponse::new(
                    ERR_SERVER_HEALTH_STATUS_FAULTY,
                    health.message.unwrap_or_default(),
                ))
            }
            Health::Healthy | Health::Degraded => {
                if health.health == Health::Degraded {
                    warn!("server reports degraded health: {:?}", health.message);
                }
                self.last_health = Some((Instant::now(), health.clone()));
                Ok(health)
            }
        }
    }

    fn resolve_room(&self, id: Option<u64>) -> Result<u64, ErrorResponse> {
        match id {
            Some(id) => Ok(id),
            None if self.connection.connected => Ok(self.connection.id),
            None => Err(ErrorResponse::new(
                ERR_ROOM_ID_UNDEFINED,
                "Room id is undefined and this device is not connected to a room",
            )),
        }
    }

    fn connected_room(&self) -> Result<u64, ErrorResponse> {
        if !self.connection.connected {
            return Err(ErrorResponse::new(
                ERR_ROOM_DISCONNECTED,
                "This device is disconnected from the room",
            ));
        }
        Ok(self.connection.id)
    }
}

fn encode_content(content: &Content) -> Result<Vec<u8>, ErrorResponse> {
    match (&content.data, content.status.content_type) {
        (ContentData::Text(text), ContentType::Clipboard) => Ok(text.as_bytes().to_vec()),
        (ContentData::Binary(data), ContentType::File) => Ok(data.clone()),
        (ContentData::Files(files), ContentType::MultiFile) => MultiFileCompressor::compress(files),
        (_, content_type) => Err(ErrorResponse::new(
            ERR_INVALID_REQUEST,
            format!("Content data does not match content type '{}'", content_type.as_str()),
        )),
    }
}

fn decode_content(status: &ContentStatus, bytes: Vec<u8>) -> Result<ContentData, ErrorResponse> {
    match status.content_type {
        ContentType::Clipboard => String::from_utf8(bytes).map(ContentData::Text).map_err(|e| {
            ErrorResponse::new(ERR_INVALID_RESPONSE, format!("Clipboard is not UTF-8: {e}"))
        }),
        ContentType::File => Ok(ContentData::Binary(bytes)),
        ContentType::MultiFile => MultiFileDecompressor::decompress(&bytes).map(ContentData::Files),
    }
}
