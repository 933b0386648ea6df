//! `ApiClient` state handling over `MockHttpClient`

#[path = "support/mock_server.rs"]
mod mock_server;

use std::sync::Arc;
use std::time::Duration;

use mock_server::{bridge, client, path, respond_error, respond_health, respond_ok};
use octane_api_client::{
    error_code::{
        ERR_INVALID_REQUEST, ERR_ROOM_DISCONNECTED, ERR_ROOM_ID_UNDEFINED,
        ERR_SERVER_HEALTH_STATUS_FAULTY,
    },
    generate_hash, ApiClient, ConnectionStatus, Content, ContentData, ContentStatus,
    ContentType, FileInfo, Health, MultiFileCompressor,
};
use octane_http::{HttpMethod, HttpResponse, MockHttpClient};
use serde_json::{json, Value};

fn clipboard(text: &str) -> Content {
    Content {
        status: ContentStatus {
            device: "laptop".to_string(),
            timestamp: 1662552000,
            content_type: ContentType::Clipboard,
            name: None,
            mime: "text/plain".to_string(),
        },
        data: ContentData::Text(text.to_string()),
    }
}

async fn connected(mock: &Arc<MockHttpClient>, id: u64) -> ApiClient {
    respond_ok(mock, HttpMethod::Post, &format!("/room/{id}"));
    let mut client = client(mock);
    assert!(client.connect_room(id, "laptop").await.is_ok());
    client
}

#[tokio::test]
async fn test_init_reports_health() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "all good");

    let response = client(&mock).init().await.into_ok();
    assert_eq!(response.health, Health::Healthy);
    assert_eq!(response.message.as_deref(), Some("all good"));
}

#[tokio::test]
async fn test_health_is_cached_within_interval() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    mock.respond(
        HttpMethod::Post,
        path("/room"),
        HttpResponse::json(200, &json!({"id": 1})),
    );

    let mut client = client(&mock);
    assert!(client.create_room("a").await.is_ok());
    assert!(client.create_room("b").await.is_ok());

    assert_eq!(mock.hits(HttpMethod::Get, &path("/health")), 1);
    assert_eq!(mock.hits(HttpMethod::Post, &path("/room")), 2);
}

#[tokio::test]
async fn test_init_ignores_cached_health() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    mock.respond(
        HttpMethod::Post,
        path("/room"),
        HttpResponse::json(200, &json!({"id": 1})),
    );

    let mut client = client(&mock);
    assert!(client.create_room("a").await.is_ok());
    assert_eq!(mock.hits(HttpMethod::Get, &path("/health")), 1);

    respond_health(&mock, "degraded", "slow disk");
    let response = client.init().await.into_ok();
    assert_eq!(response.health, Health::Degraded);
    assert_eq!(mock.hits(HttpMethod::Get, &path("/health")), 2);
}

#[tokio::test]
async fn test_health_is_refetched_after_interval() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "degraded", "slow");
    mock.respond(
        HttpMethod::Post,
        path("/room"),
        HttpResponse::json(200, &json!({"id": 1})),
    );

    let mut client = ApiClient::with_bridge(bridge(&mock), Duration::ZERO);
    let response = client.create_room("a").await.into_ok();
    assert_eq!(response.health, Health::Degraded);
    assert!(client.create_room("b").await.is_ok());

    assert_eq!(mock.hits(HttpMethod::Get, &path("/health")), 2);
}

#[tokio::test]
async fn test_faulty_server_blocks_calls() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "faulty", "database is down");

    let mut client = client(&mock);
    let error = client.create_room("a").await.into_error();
    assert_eq!(error.code, ERR_SERVER_HEALTH_STATUS_FAULTY);
    assert_eq!(error.reason, "database is down");
    assert_eq!(mock.hits(HttpMethod::Post, &path("/room")), 0);

    // A faulty result is not cached
    let _ = client.create_room("a").await;
    assert_eq!(mock.hits(HttpMethod::Get, &path("/health")), 2);
}

#[tokio::test]
async fn test_health_call_is_ungated() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "faulty", "down");

    let health = client(&mock).health().await.into_ok();
    assert_eq!(health.health, Health::Faulty);
}

#[tokio::test]
async fn test_connect_and_disconnect() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    let mut client = connected(&mock, 5).await;

    assert_eq!(
        client.connection_status(),
        &ConnectionStatus {
            connected: true,
            id: 5,
            name: "laptop".to_string(),
        }
    );

    assert!(client.disconnect_room().await.is_ok());
    assert_eq!(client.connection_status(), &ConnectionStatus::default());

    let requests = mock.received_for(HttpMethod::Post, &path("/room/5"));
    let last: Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(last["request"], "disconnect");
    assert_eq!(last["name"], "laptop");
}

#[tokio::test]
async fn test_failed_connect_keeps_state() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    respond_error(&mock, HttpMethod::Post, "/room/5", 404, "ERR_NOT_FOUND", "not found");

    let mut client = client(&mock);
    assert!(client.connect_room(5, "laptop").await.is_error());
    assert!(!client.connection_status().connected);
}

#[tokio::test]
async fn test_disconnect_without_room() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");

    let error = client(&mock).disconnect_room().await.into_error();
    assert_eq!(error.code, ERR_ROOM_DISCONNECTED);
}

#[tokio::test]
async fn test_room_id_falls_back_to_connection() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    mock.respond(
        HttpMethod::Get,
        path("/room/5"),
        HttpResponse::json(200, &json!({"devices": [], "name": "five", "id": 5})),
    );

    let mut disconnected = client(&mock);
    let error = disconnected.get_room_status(None).await.into_error();
    assert_eq!(error.code, ERR_ROOM_ID_UNDEFINED);

    let mut client = connected(&mock, 5).await;
    let response = client.get_room_status(None).await.into_ok();
    assert_eq!(response.data.name, "five");
}

#[tokio::test]
async fn test_delete_connected_room_clears_connection() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    respond_ok(&mock, HttpMethod::Delete, "/room/5");
    respond_ok(&mock, HttpMethod::Delete, "/room/6");

    let mut client = connected(&mock, 5).await;
    assert!(client.delete_room(Some(6)).await.is_ok());
    assert!(client.connection_status().connected);

    assert!(client.delete_room(None).await.is_ok());
    assert!(!client.connection_status().connected);
    assert_eq!(mock.hits(HttpMethod::Delete, &path("/room/5")), 1);
}

#[tokio::test]
async fn test_content_requires_connection() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    let mut client = client(&mock);

    assert_eq!(client.get_content().await.into_error().code, ERR_ROOM_DISCONNECTED);
    assert_eq!(client.delete_content().await.into_error().code, ERR_ROOM_DISCONNECTED);
    assert_eq!(
        client.upload_content(&clipboard("hi")).await.into_error().code,
        ERR_ROOM_DISCONNECTED
    );
}

#[tokio::test]
async fn test_upload_clipboard_sends_status_then_content() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    respond_ok(&mock, HttpMethod::Put, "/room/5/status");
    respond_ok(&mock, HttpMethod::Put, "/room/5/content");
    let mut client = connected(&mock, 5).await;

    assert!(client.upload_content(&clipboard("Do your best.")).await.is_ok());

    let puts: Vec<_> = mock
        .received()
        .into_iter()
        .map(|(_, request)| request)
        .filter(|request| request.method == HttpMethod::Put)
        .collect();
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].uri, path("/room/5/status"));
    assert_eq!(puts[1].uri, path("/room/5/content"));

    let status: Value = serde_json::from_slice(&puts[0].body).unwrap();
    assert_eq!(status["type"], "clipboard");
    assert_eq!(
        status["hash"],
        "e5f82d8e538c516f946db5f8fad590412458a1fec09bac56630695d0558b0c60"
    );
    assert!(status.get("name").is_none());

    assert_eq!(puts[1].body, b"Do your best.".to_vec());
    assert_eq!(puts[1].mime.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_upload_stops_when_status_is_rejected() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    respond_error(
        &mock,
        HttpMethod::Put,
        "/room/5/status",
        400,
        "ERR_BAD_REQUEST",
        "timestamp is in the future",
    );
    let mut client = connected(&mock, 5).await;

    let error = client.upload_content(&clipboard("hi")).await.into_error();
    assert_eq!(error.code, "ERR_BAD_REQUEST");
    assert_eq!(mock.hits(HttpMethod::Put, &path("/room/5/content")), 0);
}

#[tokio::test]
async fn test_upload_rejects_mismatched_content() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    let mut client = connected(&mock, 5).await;

    let mut content = clipboard("hi");
    content.status.content_type = ContentType::MultiFile;

    let error = client.upload_content(&content).await.into_error();
    assert_eq!(error.code, ERR_INVALID_REQUEST);
    assert!(mock.received_for(HttpMethod::Put, &path("/room/5/status")).is_empty());
}

#[tokio::test]
async fn test_get_multi_file_content() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    let files = vec![
        FileInfo::new("notes.txt", "meeting at 10"),
        FileInfo::new("data/raw.bin", vec![0u8, 1, 2, 3]),
    ];
    let bundle = MultiFileCompressor::compress(&files).unwrap();

    mock.respond(
        HttpMethod::Get,
        path("/room/5/status"),
        HttpResponse::json(
            200,
            &json!({
                "device": "desktop",
                "timestamp": 1662552000,
                "type": "multi-file",
                "mime": "application/x-tar",
                "hash": generate_hash(&bundle)
            }),
        ),
    );
    mock.respond(
        HttpMethod::Get,
        path("/room/5/content"),
        HttpResponse::binary(200, "application/x-tar", bundle),
    );
    let mut client = connected(&mock, 5).await;

    let content = client.get_content().await.into_ok().data;
    assert_eq!(content.status.content_type, ContentType::MultiFile);
    assert_eq!(content.status.device, "desktop");
    assert_eq!(content.data, ContentData::Files(files));
}

#[tokio::test]
async fn test_delete_content() {
    let mock = Arc::new(MockHttpClient::new());
    respond_health(&mock, "healthy", "");
    respond_ok(&mock, HttpMethod::Delete, "/room/5/content");
    let mut client = connected(&mock, 5).await;

    assert!(client.delete_content().await.is_ok());
    assert_eq!(mock.hits(HttpMethod::Delete, &path("/room/5/content")), 1);
}
