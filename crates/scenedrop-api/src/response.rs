//! Uniform response envelope.
//!
//! Every endpoint answers `{success, message, data}`; the HTTP status
//! mirrors `success` (2xx ⇔ true). `data` is always a JSON object —
//! empty on errors.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    /// Human-readable outcome description.
    pub message: String,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: serde_json::json!({}),
        }
    }
}
