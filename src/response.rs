//! Standard response envelope.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Uniform success/error body: `{"status":200}` or `{"status":400,"error":"..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Envelope {
    pub fn ok() -> Self {
        Envelope {
            status: StatusCode::OK.as_u16(),
            error: None,
        }
    }

    /// Logical status is always 400; the transport status is decided by the status mode.
    pub fn error(message: impl Into<String>) -> Self {
        Envelope {
            status: StatusCode::BAD_REQUEST.as_u16(),
            error: Some(message.into()),
        }
    }

    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status.as_u16();
        self
    }
}

pub fn success_ok() -> (StatusCode, Json<Envelope>) {
    (StatusCode::OK, Json(Envelope::ok()))
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}
