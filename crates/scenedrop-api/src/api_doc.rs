//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers;
use crate::response;
use scenedrop_core::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Scenedrop API",
        version = "0.1.0",
        description = "Code-addressed relay for exported 3D scenes: upload a GLB under a short code, list the catalog, fetch artifacts until the retention window reclaims them."
    ),
    paths(
        handlers::upload::upload_artifact,
        handlers::files::list_files,
        handlers::health::liveness_check,
    ),
    components(schemas(models::ArtifactEntry, response::ApiResponse)),
    tags(
        (name = "artifacts", description = "Artifact upload and listing"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
