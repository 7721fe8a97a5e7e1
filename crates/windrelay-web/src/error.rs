//! Request failures and their HTTP representation.
//!
//! | Error | Status | Body |
//! |---|---|---|
//! | `NotFound` | 404 | `{"error":"not_found"}` |
//! | `InvalidPayload` | 400 | `{"error":"invalid_payload"}` |
//! | `Serial` | 500 | `{"error":"serial_error","details":"..."}` |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use windrelay_core::InvalidReading;
use windrelay_serial::SinkError;

/// A failed request. Always contained in that request's response.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Unknown method or path.
    #[error("not found")]
    NotFound,

    /// The body did not yield a reading.
    #[error("invalid payload: {0}")]
    InvalidPayload(#[from] InvalidReading),

    /// The serial write failed or the sink is unavailable.
    #[error("serial error: {0}")]
    Serial(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Serial(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Value of the `error` key.
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::NotFound => "not_found",
            ApiError::InvalidPayload(_) => "invalid_payload",
            ApiError::Serial(_) => "serial_error",
        }
    }

    fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.kind(),
            details: match self {
                ApiError::Serial(details) => Some(details.clone()),
                _ => None,
            },
        }
    }
}

impl From<SinkError> for ApiError {
    fn from(err: SinkError) -> Self {
        ApiError::Serial(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Serial(details) => tracing::error!("Serial write failed: {}", details),
            other => debug!("Rejected request: {}", other),
        }
        (self.status(), Json(self.body())).into_response()
    }
}
