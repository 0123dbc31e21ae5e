//! Configuration module
//!
//! Environment-derived configuration for the relay service: server port,
//! CORS origins, the active auth strategy and its key material, storage
//! paths, size limits, and the retention window.

use std::collections::HashMap;
use std::env;

/// Which upload authentication strategy the deployment runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    /// Shared static keys from a fixed allow-list (`API_KEYS`).
    StaticKey,
    /// Per-key HMAC-SHA256 signed requests (`SIGNING_KEYS`).
    Hmac,
}

impl AuthMode {
    fn parse(value: &str) -> Result<Self, anyhow::Error> {
        match value.to_lowercase().as_str() {
            "static" => Ok(AuthMode::StaticKey),
            "hmac" => Ok(AuthMode::Hmac),
            other => Err(anyhow::anyhow!(
                "AUTH_MODE must be 'static' or 'hmac', got '{}'",
                other
            )),
        }
    }
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub cors_origins: Vec<String>,
    pub auth_mode: AuthMode,
    /// Static key allow-list (static mode).
    pub api_keys: Vec<String>,
    /// public key -> signing secret (hmac mode). Secrets never leave config.
    pub signing_keys: HashMap<String, String>,
    /// Accepted clock drift for signed requests, in seconds either way.
    pub hmac_clock_skew_secs: i64,
    /// Content directory holding artifacts and the manifest.
    pub storage_path: String,
    /// URL base the stored filenames are appended to in `file_url`.
    pub base_public_url: String,
    pub max_file_size_bytes: usize,
    /// Accepted artifact extension, without the dot.
    pub artifact_extension: String,
    /// Entries older than this many days are swept after each upload.
    pub retention_days: i64,
}

impl Config {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        const MAX_FILE_SIZE_MB: usize = 200;
        const RETENTION_DAYS: i64 = 7;
        const HMAC_CLOCK_SKEW_SECS: i64 = 120;

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let is_production = environment.to_lowercase() == "production"
            || environment.to_lowercase() == "prod";
        if is_production && cors_origins_str.trim() == "*" {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let server_port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8088".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?;

        let auth_mode = AuthMode::parse(
            &env::var("AUTH_MODE").unwrap_or_else(|_| "static".to_string()),
        )?;

        let api_keys: Vec<String> = env::var("API_KEYS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let signing_keys =
            parse_signing_keys(&env::var("SIGNING_KEYS").unwrap_or_default())?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let config = Config {
            environment,
            cors_origins,
            auth_mode,
            api_keys,
            signing_keys,
            hmac_clock_skew_secs: env::var("HMAC_CLOCK_SKEW_SECS")
                .unwrap_or_else(|_| HMAC_CLOCK_SKEW_SECS.to_string())
                .parse()
                .unwrap_or(HMAC_CLOCK_SKEW_SECS),
            storage_path: env::var("STORAGE_PATH").unwrap_or_else(|_| "uploads".to_string()),
            base_public_url: env::var("BASE_PUBLIC_URL")
                .unwrap_or_else(|_| format!("http://localhost:{}/artifacts", server_port)),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            artifact_extension: env::var("ARTIFACT_EXTENSION")
                .unwrap_or_else(|_| "glb".to_string())
                .trim_start_matches('.')
                .to_lowercase(),
            retention_days: env::var("RETENTION_DAYS")
                .unwrap_or_else(|_| RETENTION_DAYS.to_string())
                .parse()
                .unwrap_or(RETENTION_DAYS),
            server_port,
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.auth_mode == AuthMode::StaticKey && self.api_keys.is_empty() {
            return Err(anyhow::anyhow!(
                "API_KEYS must contain at least one key when AUTH_MODE=static"
            ));
        }
        if self.auth_mode == AuthMode::Hmac && self.signing_keys.is_empty() {
            return Err(anyhow::anyhow!(
                "SIGNING_KEYS must contain at least one public:secret pair when AUTH_MODE=hmac"
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than zero"));
        }
        if self.artifact_extension.is_empty() {
            return Err(anyhow::anyhow!("ARTIFACT_EXTENSION must not be empty"));
        }
        if self.retention_days <= 0 {
            return Err(anyhow::anyhow!("RETENTION_DAYS must be greater than zero"));
        }
        if self.hmac_clock_skew_secs <= 0 {
            return Err(anyhow::anyhow!(
                "HMAC_CLOCK_SKEW_SECS must be greater than zero"
            ));
        }
        Ok(())
    }
}

/// Parse `SIGNING_KEYS`: comma-separated `public:secret` pairs.
pub fn parse_signing_keys(raw: &str) -> Result<HashMap<String, String>, anyhow::Error> {
    let mut keys = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (public, secret) = pair.split_once(':').ok_or_else(|| {
            anyhow::anyhow!("SIGNING_KEYS entries must be 'public:secret' pairs")
        })?;
        let (public, secret) = (public.trim(), secret.trim());
        if public.is_empty() || secret.is_empty() {
            return Err(anyhow::anyhow!(
                "SIGNING_KEYS entries must have a non-empty public key and secret"
            ));
        }
        keys.insert(public.to_string(), secret.to_string());
    }
    Ok(keys)
}
