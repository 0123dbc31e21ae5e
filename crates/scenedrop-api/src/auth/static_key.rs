//! Static key strategy: membership in a fixed allow-list.

use super::{key_prefix, API_KEY_HEADER};
use axum::http::HeaderMap;
use scenedrop_core::AppError;
use subtle::ConstantTimeEq;

pub struct StaticKeyAuth {
    keys: Vec<String>,
}

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

impl StaticKeyAuth {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Check the presented key against the allow-list; returns the
    /// attribution prefix of the accepted key.
    ///
    /// Each candidate comparison is constant-time. There is no rate
    /// limiting or lockout on failures.
    pub fn verify(&self, headers: &HeaderMap) -> Result<String, AppError> {
        let provided = headers
            .get(API_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| AppError::Unauthorized("Missing API key.".to_string()))?;

        if self.keys.iter().any(|key| secure_compare(key, provided)) {
            Ok(key_prefix(provided))
        } else {
            Err(AppError::Unauthorized("Invalid API key.".to_string()))
        }
    }
}
