//! Client for the Octane room service
//!
//! Devices use the service to share clipboard text, a file, or a bundle of
//! files through a room. Every call returns an [`Outcome`] holding either the
//! endpoint's value or an [`ErrorResponse`].
//!
//! ## Layers
//!
//! - [`ApiClient`]: health gate, room connection and content encoding
//! - [`ApiBridge`]: one method per REST endpoint
//! - [`Fetch`]: base URL, API token and JSON decoding over an
//!   [`octane_http::HttpClientTrait`] transport
//!
//! ```no_run
//! use octane_api_client::{ApiClient, ClientConfig};
//!
//! # async fn run() {
//! let mut client = ApiClient::new(ClientConfig::default()).into_ok();
//! let room = client.create_room("soon's room").await;
//! if room.is_ok() {
//!     let _ = client.connect_room(room.get().data.id, "laptop").await;
//! }
//! # }
//! ```

pub mod bridge;
pub mod client;
pub mod config;
pub mod error_code;
pub mod error_response;
pub mod fetch;
pub mod hash;
pub mod multi_file;
pub mod result;
pub mod types;

pub use bridge::{check_status_code, ApiBridge, RoomRequest};
pub use client::ApiClient;
pub use config::{
    ClientConfig, ConfigError, ConfigLoader, DEFAULT_BASE_URL, DEFAULT_ORIGIN, DEFAULT_TOKEN,
    LIBRARY_NAME, LIBRARY_VERSION,
};
pub use error_response::{make_error, ApiOutcome, ErrorResponse};
pub use fetch::{Fetch, FetchBase, FetchBody, FetchResponse, TOKEN_HEADER};
pub use hash::generate_hash;
pub use multi_file::{is_relative_file_name, MultiFileCompressor, MultiFileDecompressor};
pub use result::{InvalidAccess, Outcome};
pub use types::{
    ConnectionStatus, Content, ContentData, ContentStatus, ContentType, Device, FileInfo,
    Health, HealthResult, Response, RoomId, RoomStatus,
};
