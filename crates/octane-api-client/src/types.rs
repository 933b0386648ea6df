//! Domain values exchanged with the room service

use serde::{Deserialize, Serialize};

/// Server health as reported by `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Degraded,
    Faulty,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HealthResult {
    pub health: Health,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId {
    pub id: u64,
}

/// A device connected to a room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomStatus {
    pub id: u64,
    pub name: String,
    pub devices: Vec<Device>,
}

/// Kind of content shared in a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentType {
    File,
    Clipboard,
    MultiFile,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::File => "file",
            ContentType::Clipboard => "clipboard",
            ContentType::MultiFile => "multi-file",
        }
    }
}

/// Metadata of the content currently shared in a room
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentStatus {
    /// Device that uploaded the content
    pub device: String,
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// File name, for `file` content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub mime: String,
}

/// One file of a multi-file bundle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileInfo {
    pub filename: String,
    pub data: Vec<u8>,
}

impl FileInfo {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentData {
    /// Clipboard text
    Text(String),
    /// A single file
    Binary(Vec<u8>),
    /// A bundle of files
    Files(Vec<FileInfo>),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Content {
    pub status: ContentStatus,
    pub data: ContentData,
}

/// Success payload of the high level client
///
/// Carries the server health observed by the health gate next to the value
/// the endpoint returned.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Response<T> {
    pub data: T,
    pub health: Health,
    pub message: Option<String>,
}

impl<T> Response<T> {
    pub(crate) fn new(data: T, health: &HealthResult) -> Self {
        Self {
            data,
            health: health.health,
            message: health.message.clone(),
        }
    }
}

/// Room this client is connected to, if any
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ConnectionStatus {
    pub connected: bool,
    pub id: u64,
    pub name: String,
}
