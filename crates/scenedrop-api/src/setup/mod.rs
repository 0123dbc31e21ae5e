//! Application setup: stores, auth strategy, routes, server.

pub mod routes;
pub mod server;

use crate::auth::AuthStrategy;
use crate::state::AppState;
use axum::Router;
use scenedrop_core::Config;
use scenedrop_storage::{ContentStore, ManifestStore, MANIFEST_FILE_NAME};
use std::path::Path;
use std::sync::Arc;

/// Build the application state and router from a validated configuration.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    config.validate()?;

    let content = ContentStore::new(&config.storage_path, config.base_public_url.clone()).await?;
    let manifest = ManifestStore::new(Path::new(&config.storage_path).join(MANIFEST_FILE_NAME));
    let auth = AuthStrategy::from_config(&config);

    let state = Arc::new(AppState {
        content,
        manifest,
        auth,
        config,
    });

    let router = routes::setup_routes(&state.config, state.clone())?;

    Ok((state, router))
}
