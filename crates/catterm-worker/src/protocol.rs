//! The JSON request/response shapes exchanged over the WebSocket.
//!
//! One request, one reply: there is no batching and no out-of-order
//! delivery, so `id` only needs to round-trip whatever the client attached
//! to correlate the reply, not to order concurrent requests.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: serde_json::Value,
    pub code: String,
    /// Per-request gas override; falls back to the worker's configured
    /// default when absent.
    #[serde(default)]
    pub gas: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Ok {
        id: serde_json::Value,
        result: String,
    },
    Err {
        id: serde_json::Value,
        error: String,
    },
}

impl Response {
    pub fn ok(id: serde_json::Value, result: impl Into<String>) -> Self {
        Response::Ok {
            id,
            result: result.into(),
        }
    }

    pub fn err(id: serde_json::Value, error: impl std::fmt::Display) -> Self {
        Response::Err {
            id,
            error: error.to_string(),
        }
    }
}
