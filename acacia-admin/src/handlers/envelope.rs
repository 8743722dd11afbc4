//! Uniform response envelope
//!
//! Every admin operation answers with the same JSON shape: on success
//! `{"status":"success","message":...,"payload":...}`, on failure
//! `{"status":"failed","code":...,"message":...}`. The builder is chainable
//! and finalized with [`ApiResponse::send`]. The outcome kind is fixed by
//! the constructor, so an envelope can never be sent without one.
//!
//! # Example
//!
//! ```rust
//! use acacia_admin::handlers::ApiResponse;
//!
//! let response = ApiResponse::success()
//!     .message("Record created successfully")
//!     .payload(serde_json::json!({"id": 1}))
//!     .send();
//! assert_eq!(response.status(), axum::http::StatusCode::OK);
//! ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Failed,
}

/// Chainable builder for the admin response envelope
#[derive(Debug)]
pub struct ApiResponse {
    outcome: Outcome,
    message: String,
    payload: Option<Value>,
    code: StatusCode,
}

impl ApiResponse {
    /// Start a success envelope (HTTP 200)
    #[must_use]
    pub fn success() -> Self {
        Self {
            outcome: Outcome::Success,
            message: String::new(),
            payload: None,
            code: StatusCode::OK,
        }
    }

    /// Start a failure envelope (HTTP 500 unless overridden via [`code`](Self::code))
    #[must_use]
    pub fn failed() -> Self {
        Self {
            outcome: Outcome::Failed,
            message: String::new(),
            payload: None,
            code: StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Set the human-readable message
    #[must_use]
    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = text.into();
        self
    }

    /// Attach the machine payload (ignored by failure envelopes)
    #[must_use]
    pub fn payload<T: Serialize>(mut self, value: T) -> Self {
        self.payload = Some(match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!("failed to serialize envelope payload: {e}");
                Value::Null
            }
        });
        self
    }

    /// Set the status code reported by a failure envelope
    #[must_use]
    pub fn code(mut self, code: StatusCode) -> Self {
        self.code = code;
        self
    }

    /// Finalize the envelope into an HTTP response
    pub fn send(self) -> Response {
        match self.outcome {
            Outcome::Success => {
                let body = json!({
                    "status": "success",
                    "message": self.message,
                    "payload": self.payload,
                });
                (StatusCode::OK, Json(body)).into_response()
            }
            Outcome::Failed => {
                let body = json!({
                    "status": "failed",
                    "code": self.code.as_u16(),
                    "message": self.message,
                });
                (self.code, Json(body)).into_response()
            }
        }
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        self.send()
    }
}
