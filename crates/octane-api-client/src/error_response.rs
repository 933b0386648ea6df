//! Error value carried by failed API calls

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::result::Outcome;

/// Error code plus a human readable reason
///
/// The code is either one sent by the server (e.g. `ERR_BAD_REQUEST`) or one
/// of the client codes in [`crate::error_code`]. Equality compares both
/// fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("{code}: {reason}")]
pub struct ErrorResponse {
    pub code: String,
    pub reason: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            reason: reason.into(),
        }
    }
}

/// Return value of every bridge and client call
pub type ApiOutcome<T> = Outcome<T, ErrorResponse>;

/// Error-populated [`ApiOutcome`] built from a code and reason
pub fn make_error<T>(code: impl Into<String>, reason: impl Into<String>) -> ApiOutcome<T> {
    Outcome::error(ErrorResponse::new(code, reason))
}
