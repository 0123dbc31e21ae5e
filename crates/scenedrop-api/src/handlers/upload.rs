//! Artifact upload handler.

use crate::auth::{AuthStrategy, HmacRequest};
use crate::error::HttpAppError;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::utils::upload::{extract_upload_form, validate_file_extension, validate_file_size};
use axum::{
    extract::{Multipart, State},
    http::HeaderMap,
    Json,
};
use chrono::{SecondsFormat, Utc};
use scenedrop_core::code::{generate_code, is_valid_code, CODE_LENGTH};
use scenedrop_core::models::ArtifactEntry;
use scenedrop_core::AppError;
use scenedrop_storage::retention;
use std::sync::Arc;

/// Credential state after the header phase, before the body is touched.
/// Static keys verify fully from headers; signed requests still owe a
/// content check once the code and file bytes are known.
enum Credential<'a> {
    Static { key_prefix: String },
    Signed(HmacRequest<'a>),
}

/// Accept a binary artifact under a short code.
///
/// Multipart fields: `code` (optional 4-char alphanumeric) and `file`.
/// On the static-key path a missing or malformed code is replaced by a
/// server-generated one; on the signed path the code is part of the
/// signature and therefore mandatory.
#[utoipa::path(
    post,
    path = "/upload",
    tag = "artifacts",
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Artifact stored; the created catalog entry is echoed back", body = ApiResponse),
        (status = 400, description = "Missing, empty, oversized, or wrong-type file; bad code", body = ApiResponse),
        (status = 403, description = "Missing or invalid credentials", body = ApiResponse),
        (status = 500, description = "Storage or configuration failure", body = ApiResponse)
    )
)]
pub async fn upload_artifact(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<ApiResponse>, HttpAppError> {
    let credential = match &state.auth {
        AuthStrategy::StaticKey(auth) => Credential::Static {
            key_prefix: auth.verify(&headers)?,
        },
        AuthStrategy::Hmac(auth) => Credential::Signed(auth.begin(&headers)?),
    };

    let form = extract_upload_form(multipart).await?;

    if form.data.is_empty() {
        return Err(AppError::InvalidInput("Uploaded file is empty.".to_string()).into());
    }
    validate_file_size(form.data.len(), state.config.max_file_size_bytes)?;
    let extension = validate_file_extension(
        &form.original_filename,
        &state.config.artifact_extension,
    )?;

    let (code, server_generated, key_prefix) = match credential {
        Credential::Static { key_prefix } => {
            let (code, generated) = resolve_code(form.code.as_deref());
            (code, generated, key_prefix)
        }
        Credential::Signed(request) => {
            let code = match form.code.as_deref() {
                Some(code) if is_valid_code(code) => code.to_string(),
                _ => {
                    return Err(AppError::InvalidInput(
                        "Signed uploads must include a pre-generated 4-character code."
                            .to_string(),
                    )
                    .into())
                }
            };
            request.verify(&code, &form.data)?;
            let key_prefix = request.key_prefix;
            (code, false, key_prefix)
        }
    };

    let now = Utc::now();
    let file_name = format!("{}_{}.{}", code, now.format("%Y%m%d_%H%M%S"), extension);
    let file_url = state.content.store(&file_name, &form.data).await?;

    let entry = ArtifactEntry {
        code,
        file_name,
        file_url,
        size_bytes: form.data.len() as u64,
        uploaded_at: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        filter: Some(key_prefix),
        server_generated_code: server_generated.then_some(true),
    };

    let guard = state.manifest.lock().await;
    let mut entries = guard.load().await;
    entries.push(entry.clone());
    guard.save(&entries).await?;

    // Every successful upload pays for a sweep, under the same guard so it
    // cannot interleave with another upload's load/save cycle.
    let removed = retention::sweep(&guard, &state.content, state.config.retention_days).await;
    drop(guard);

    tracing::info!(
        code = %entry.code,
        file_name = %entry.file_name,
        size_bytes = entry.size_bytes,
        removed_expired = removed,
        "Artifact stored"
    );

    Ok(Json(ApiResponse::ok(
        "Upload stored.",
        serde_json::json!(entry),
    )))
}

/// Use a well-formed caller code verbatim; generate one otherwise.
fn resolve_code(supplied: Option<&str>) -> (String, bool) {
    match supplied {
        Some(code) if is_valid_code(code) => (code.to_string(), false),
        _ => (generate_code(CODE_LENGTH), true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_code_uses_valid_supplied_code() {
        assert_eq!(resolve_code(Some("XA1B")), ("XA1B".to_string(), false));
    }

    #[test]
    fn test_resolve_code_generates_on_missing_or_invalid() {
        for supplied in [None, Some(""), Some("xa1b"), Some("TOOLONG"), Some("AB!")] {
            let (code, generated) = resolve_code(supplied);
            assert!(generated);
            assert!(is_valid_code(&code));
        }
    }
}
