//! Response envelope
//!
//! The shape handed back to the trigger: a status code and a JSON-encoded
//! body, `{"error": ...}` on failure.

use serde::{Deserialize, Serialize};
use serde_json::json;

pub const STATUS_OK: u16 = 200;
pub const STATUS_ERROR: u16 = 500;

/// Uniform response to a job request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub status_code: u16,
    /// Serialized JSON document
    pub body: String,
}

impl Envelope {
    /// Successful submission carrying the serialized service response
    pub fn success(body: String) -> Self {
        Self {
            status_code: STATUS_OK,
            body,
        }
    }

    /// Failure carrying an error message
    pub fn failure(message: impl std::fmt::Display) -> Self {
        Self {
            status_code: STATUS_ERROR,
            body: json!({ "error": message.to_string() }).to_string(),
        }
    }

    /// Whether this envelope reports a successful submission
    pub fn is_success(&self) -> bool {
        self.status_code == STATUS_OK
    }
}
