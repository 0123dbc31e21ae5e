//! Catalog listing handler.

use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{extract::State, Json};
use std::cmp::Reverse;
use std::sync::Arc;

/// List all catalog entries, newest first.
///
/// Entries whose timestamp does not parse sort as epoch zero, i.e. at the
/// old end of the listing. The stable sort preserves manifest order among
/// ties, so colliding codes keep last-write-wins order.
#[utoipa::path(
    get,
    path = "/files",
    tag = "artifacts",
    responses(
        (status = 200, description = "All catalog entries, newest first", body = ApiResponse)
    )
)]
pub async fn list_files(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    let mut entries = state.manifest.load().await;
    entries.sort_by_key(|entry| Reverse(entry.sort_timestamp()));

    Json(ApiResponse::ok(
        "File listing.",
        serde_json::json!({ "files": entries }),
    ))
}
