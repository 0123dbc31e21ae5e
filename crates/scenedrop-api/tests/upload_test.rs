//! Upload API integration tests (static-key mode).

mod helpers;

use helpers::{glb_form, glb_form_named, spawn_app, stored_files, TEST_API_KEY};
use scenedrop_core::code::is_valid_code;
use scenedrop_core::AuthMode;

const PAYLOAD: &[u8] = b"glTF fake payload";

#[tokio::test]
async fn test_upload_with_supplied_code() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("XA1B"), PAYLOAD))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);

    let entry = &body["data"];
    assert_eq!(entry["code"], "XA1B");
    assert_eq!(entry["size_bytes"], PAYLOAD.len() as u64);
    assert_eq!(entry["filter"], "rel");
    assert!(entry.get("server_generated_code").is_none());

    let file_name = entry["file_name"].as_str().unwrap();
    assert!(file_name.starts_with("XA1B_"));
    assert!(file_name.ends_with(".glb"));
    assert!(entry["file_url"].as_str().unwrap().ends_with(file_name));

    // The backing file exists with the declared size.
    let metadata = std::fs::metadata(app.storage_dir.path().join(file_name)).unwrap();
    assert_eq!(metadata.len(), PAYLOAD.len() as u64);
}

#[tokio::test]
async fn test_upload_without_code_generates_one() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(None, PAYLOAD))
        .await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    let entry = &body["data"];
    assert_eq!(entry["server_generated_code"], true);
    assert!(is_valid_code(entry["code"].as_str().unwrap()));
}

#[tokio::test]
async fn test_upload_with_malformed_code_generates_one() {
    let app = spawn_app(AuthMode::StaticKey).await;

    for bad_code in ["xa1b", "TOOLONG", "AB!", "AB1"] {
        let response = app
            .server
            .post("/upload")
            .add_header("X-API-Key", TEST_API_KEY)
            .multipart(glb_form(Some(bad_code), PAYLOAD))
            .await;

        assert_eq!(response.status_code(), 200);
        let body: serde_json::Value = response.json();
        let entry = &body["data"];
        assert_eq!(entry["server_generated_code"], true);
        assert!(is_valid_code(entry["code"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn test_upload_rejects_unknown_key_without_side_effects() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", "not-a-configured-key")
        .multipart(glb_form(Some("XA1B"), PAYLOAD))
        .await;

    assert_eq!(response.status_code(), 403);
    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], false);

    // No file written, no manifest created.
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn test_upload_rejects_missing_key() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .multipart(glb_form(Some("XA1B"), PAYLOAD))
        .await;

    assert_eq!(response.status_code(), 403);
}

#[tokio::test]
async fn test_upload_rejects_missing_file_field() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let form = axum_test::multipart::MultipartForm::new().add_text("code", "XA1B");
    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Missing file field.");
}

#[tokio::test]
async fn test_upload_rejects_empty_file() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("XA1B"), b""))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(stored_files(&app).is_empty());
}

#[tokio::test]
async fn test_upload_rejects_wrong_extension() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form_named(Some("XA1B"), PAYLOAD, "scene.gltf"))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "Only .glb files are accepted.");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    // Test config caps uploads at 1 MB.
    let app = spawn_app(AuthMode::StaticKey).await;

    let oversized = vec![0u8; 1024 * 1024 + 1];
    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("XA1B"), &oversized))
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(stored_files(&app).is_empty());
}

/// Two simultaneous uploads must both survive in the catalog: the manifest
/// guard serializes the load/save cycles.
#[tokio::test]
async fn test_concurrent_uploads_keep_all_entries() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let first = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("AAAA"), PAYLOAD));
    let second = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("BBBB"), PAYLOAD));

    let (first, second) = tokio::join!(async { first.await }, async { second.await });
    assert_eq!(first.status_code(), 200);
    assert_eq!(second.status_code(), 200);

    let listing = app.server.get("/files").await;
    let body: serde_json::Value = listing.json();
    let files = body["data"]["files"].as_array().unwrap();
    assert_eq!(files.len(), 2);

    let codes: Vec<&str> = files.iter().map(|f| f["code"].as_str().unwrap()).collect();
    assert!(codes.contains(&"AAAA"));
    assert!(codes.contains(&"BBBB"));
}

#[tokio::test]
async fn test_uploaded_artifact_is_served() {
    let app = spawn_app(AuthMode::StaticKey).await;

    let response = app
        .server
        .post("/upload")
        .add_header("X-API-Key", TEST_API_KEY)
        .multipart(glb_form(Some("XA1B"), PAYLOAD))
        .await;
    let body: serde_json::Value = response.json();
    let file_name = body["data"]["file_name"].as_str().unwrap();

    let fetched = app.server.get(&format!("/artifacts/{}", file_name)).await;
    assert_eq!(fetched.status_code(), 200);
    assert_eq!(fetched.into_bytes().as_ref(), PAYLOAD);
}
