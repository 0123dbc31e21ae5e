//! Scenedrop storage
//!
//! Filesystem persistence for the relay: the content directory of artifact
//! files, the JSON manifest cataloguing them, and the retention sweep that
//! reclaims both.

mod content;
mod error;
mod manifest;
pub mod retention;

pub use content::ContentStore;
pub use error::{StorageError, StorageResult};
pub use manifest::{ManifestGuard, ManifestStore, MANIFEST_FILE_NAME};
