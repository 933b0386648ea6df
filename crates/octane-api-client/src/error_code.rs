//! Error codes produced on the client side
//!
//! Server errors carry their own codes; these cover failures detected before
//! or after the round trip.

pub const ERR_API_CLIENT_INITIALIZATION_FAILED: &str = "ERR_API_CLIENT_INITIALIZATION_FAILED";
pub const ERR_SERVER_HEALTH_STATUS_FAULTY: &str = "ERR_SERVER_HEALTH_STATUS_FAULTY";
pub const ERR_HTTP_CLIENT_INITIALIZATION_FAILED: &str = "ERR_HTTP_CLIENT_INITIALIZATION_FAILED";
pub const ERR_INCORRECT_HTTP_METHOD: &str = "ERR_INCORRECT_HTTP_METHOD";
pub const ERR_HTTP_CONNECTION_FAILED: &str = "ERR_HTTP_CONNECTION_FAILED";
pub const ERR_JSON_PARSE_FAILED: &str = "ERR_JSON_PARSE_FAILED";
pub const ERR_INVALID_RESPONSE: &str = "ERR_INVALID_RESPONSE";
pub const ERR_INVALID_REQUEST: &str = "ERR_INVALID_REQUEST";
pub const ERR_ROOM_ID_UNDEFINED: &str = "ERR_ROOM_ID_UNDEFINED";
pub const ERR_ROOM_DISCONNECTED: &str = "ERR_ROOM_DISCONNECTED";
pub const ERR_COMPRESSION_FAILED: &str = "ERR_COMPRESSION_FAILED";
pub const ERR_DECOMPRESSION_FAILED: &str = "ERR_DECOMPRESSION_FAILED";
