//! Test helpers: build config, app, and multipart forms for integration tests.
//!
//! Run from workspace root: `cargo test -p scenedrop-api` or
//! `cargo test -p scenedrop-api --test upload_test`.

#![allow(dead_code)]

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use hmac::{Hmac, Mac};
use scenedrop_api::setup;
use scenedrop_core::{AuthMode, Config};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tempfile::TempDir;

pub const TEST_API_KEY: &str = "relay-test-key-1";
pub const SECOND_API_KEY: &str = "other-test-key-2";
pub const TEST_PUBLIC_KEY: &str = "pubkey-1";
pub const TEST_SECRET: &str = "super-secret";

pub struct TestApp {
    pub server: TestServer,
    pub storage_dir: TempDir,
}

pub fn test_config(storage_path: &str, auth_mode: AuthMode) -> Config {
    let mut signing_keys = HashMap::new();
    signing_keys.insert(TEST_PUBLIC_KEY.to_string(), TEST_SECRET.to_string());

    Config {
        server_port: 0,
        environment: "test".to_string(),
        cors_origins: vec!["*".to_string()],
        auth_mode,
        api_keys: vec![TEST_API_KEY.to_string(), SECOND_API_KEY.to_string()],
        signing_keys,
        hmac_clock_skew_secs: 120,
        storage_path: storage_path.to_string(),
        base_public_url: "http://localhost:8088/artifacts".to_string(),
        max_file_size_bytes: 1024 * 1024,
        artifact_extension: "glb".to_string(),
        retention_days: 7,
    }
}

/// Build the app on top of an existing storage directory (for tests that
/// seed the manifest or content dir before startup).
pub async fn spawn_app_in(storage_dir: TempDir, auth_mode: AuthMode) -> TestApp {
    let config = test_config(storage_dir.path().to_str().unwrap(), auth_mode);
    let (_state, router) = setup::initialize_app(config).await.unwrap();
    let server = TestServer::new(router).unwrap();
    TestApp {
        server,
        storage_dir,
    }
}

pub async fn spawn_app(auth_mode: AuthMode) -> TestApp {
    spawn_app_in(TempDir::new().unwrap(), auth_mode).await
}

/// Multipart form with an optional `code` field and a GLB `file` field.
pub fn glb_form(code: Option<&str>, data: &[u8]) -> MultipartForm {
    glb_form_named(code, data, "scene.glb")
}

pub fn glb_form_named(code: Option<&str>, data: &[u8], file_name: &str) -> MultipartForm {
    let part = Part::bytes(data.to_vec())
        .file_name(file_name)
        .mime_type("model/gltf-binary");
    let mut form = MultipartForm::new();
    if let Some(code) = code {
        form = form.add_text("code", code);
    }
    form.add_part("file", part)
}

/// Client-side counterpart of the server's signature check.
pub fn sign(secret: &str, timestamp: i64, code: &str, file: &[u8]) -> String {
    let file_hash = hex::encode(Sha256::digest(file));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key size");
    mac.update(format!("{}:{}:{}", timestamp, code, file_hash).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Names of all files currently in the storage directory.
pub fn stored_files(app: &TestApp) -> Vec<String> {
    std::fs::read_dir(app.storage_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}
