//! HMAC-signed strategy.
//!
//! The signature binds the request to its timestamp, code, and file
//! content: `HMAC-SHA256(secret, "<timestamp>:<code>:<sha256-hex(file)>")`,
//! hex-encoded. Verification is split in two: [`HmacAuth::begin`] checks
//! everything available from headers alone (presence, secret lookup,
//! freshness window), [`HmacRequest::verify`] checks the signature once
//! the file bytes and code are known.
//!
//! Signed requests must carry a client-generated code — the server never
//! generates one on this path, so the signed code and the stored code
//! cannot diverge.

use super::{key_prefix, API_KEY_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use axum::http::HeaderMap;
use chrono::Utc;
use hmac::{Hmac, Mac};
use scenedrop_core::AppError;
use sha2::{Digest, Sha256};
use std::collections::HashMap;

type HmacSha256 = Hmac<Sha256>;

pub struct HmacAuth {
    /// public key -> signing secret
    secrets: HashMap<String, String>,
    clock_skew_secs: i64,
}

/// A signed request whose headers checked out; awaiting the content check.
#[derive(Debug)]
pub struct HmacRequest<'a> {
    secret: &'a str,
    timestamp: String,
    signature: String,
    pub key_prefix: String,
}

impl HmacAuth {
    pub fn new(secrets: HashMap<String, String>, clock_skew_secs: i64) -> Self {
        Self {
            secrets,
            clock_skew_secs,
        }
    }

    /// Header checks: all three headers present, a secret configured for
    /// the public key, and the timestamp within the freshness window.
    pub fn begin(&self, headers: &HeaderMap) -> Result<HmacRequest<'_>, AppError> {
        let public_key = required_header(headers, API_KEY_HEADER, "Missing API key.")?;
        let timestamp = required_header(headers, TIMESTAMP_HEADER, "Missing request timestamp.")?;
        let signature = required_header(headers, SIGNATURE_HEADER, "Missing request signature.")?;

        // A key without a configured secret is a deployment problem, not a
        // caller problem.
        let secret = self.secrets.get(public_key).ok_or_else(|| {
            AppError::Internal("No signing secret configured for this API key.".to_string())
        })?;

        let ts: i64 = timestamp.parse().map_err(|_| {
            AppError::Unauthorized("Invalid request timestamp.".to_string())
        })?;
        let now = Utc::now().timestamp();
        if (now - ts).abs() > self.clock_skew_secs {
            return Err(AppError::Unauthorized(
                "Request timestamp outside the allowed window.".to_string(),
            ));
        }

        Ok(HmacRequest {
            secret,
            timestamp: timestamp.to_string(),
            signature: signature.to_string(),
            key_prefix: key_prefix(public_key),
        })
    }
}

impl HmacRequest<'_> {
    /// Recompute the signature over the resolved code and file bytes and
    /// compare constant-time against the one presented.
    pub fn verify(&self, code: &str, file: &[u8]) -> Result<(), AppError> {
        let file_hash = hex::encode(Sha256::digest(file));

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key size");
        mac.update(format!("{}:{}:{}", self.timestamp, code, file_hash).as_bytes());

        let provided = hex::decode(&self.signature).map_err(|_| {
            AppError::Unauthorized("Invalid request signature.".to_string())
        })?;

        mac.verify_slice(&provided)
            .map_err(|_| AppError::Unauthorized("Invalid request signature.".to_string()))
    }
}

fn required_header<'h>(
    headers: &'h HeaderMap,
    name: &str,
    missing_message: &str,
) -> Result<&'h str, AppError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Unauthorized(missing_message.to_string()))
}
