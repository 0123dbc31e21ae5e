//! Upload authentication strategies.
//!
//! The trust boundary of the upload path: either a shared static key from
//! a fixed allow-list, or a per-key HMAC-SHA256 signature binding the
//! request to its timestamp, code, and file content. The active strategy
//! is chosen once at startup from `AUTH_MODE`.

pub mod hmac;
pub mod static_key;

pub use hmac::{HmacAuth, HmacRequest};
pub use static_key::StaticKeyAuth;

use scenedrop_core::{AuthMode, Config};

/// Header carrying the static key (static mode) or public key (hmac mode).
pub const API_KEY_HEADER: &str = "x-api-key";
/// Unix-seconds request timestamp (hmac mode).
pub const TIMESTAMP_HEADER: &str = "x-api-timestamp";
/// Hex HMAC-SHA256 request signature (hmac mode).
pub const SIGNATURE_HEADER: &str = "x-api-signature";

/// Number of credential characters recorded on catalog entries for
/// attribution.
const KEY_PREFIX_LEN: usize = 3;

pub enum AuthStrategy {
    StaticKey(StaticKeyAuth),
    Hmac(HmacAuth),
}

impl AuthStrategy {
    pub fn from_config(config: &Config) -> Self {
        match config.auth_mode {
            AuthMode::StaticKey => {
                AuthStrategy::StaticKey(StaticKeyAuth::new(config.api_keys.clone()))
            }
            AuthMode::Hmac => AuthStrategy::Hmac(HmacAuth::new(
                config.signing_keys.clone(),
                config.hmac_clock_skew_secs,
            )),
        }
    }
}

/// Attribution prefix recorded on the catalog entry; never the whole
/// credential.
pub(crate) fn key_prefix(key: &str) -> String {
    key.chars().take(KEY_PREFIX_LEN).collect()
}
