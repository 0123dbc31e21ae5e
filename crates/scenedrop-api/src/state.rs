//! Shared application state.

use crate::auth::AuthStrategy;
use scenedrop_core::Config;
use scenedrop_storage::{ContentStore, ManifestStore};

pub struct AppState {
    pub config: Config,
    pub content: ContentStore,
    pub manifest: ManifestStore,
    pub auth: AuthStrategy,
}
