//! Retention sweep: reclaim artifacts older than the configured window.

use crate::content::ContentStore;
use crate::manifest::ManifestGuard;
use chrono::{Duration, Utc};

/// Remove catalog entries (and their backing files) older than
/// `max_age_days`.
///
/// Runs under an already-held manifest guard so it cannot interleave with
/// a concurrent upload's load/save cycle. File deletion is best-effort: a
/// failed or missing file never aborts the sweep, the catalog entry is
/// dropped regardless. Entries whose timestamp is absent or unparseable
/// are never swept — unknown age means "not yet expired".
///
/// Persists the surviving entries (order preserved) only when something
/// was removed. Returns the number of removed entries.
pub async fn sweep(
    guard: &ManifestGuard<'_>,
    content: &ContentStore,
    max_age_days: i64,
) -> usize {
    let entries = guard.load().await;
    let cutoff = Utc::now() - Duration::days(max_age_days);

    let mut survivors = Vec::with_capacity(entries.len());
    let mut removed = 0usize;

    for entry in entries {
        let expired = entry
            .parsed_uploaded_at()
            .map(|ts| ts.with_timezone(&Utc) < cutoff)
            .unwrap_or(false);

        if !expired {
            survivors.push(entry);
            continue;
        }

        if let Err(e) = content.delete(&entry.file_name).await {
            tracing::warn!(
                error = %e,
                file_name = %entry.file_name,
                "Failed to delete expired artifact; dropping its catalog entry anyway"
            );
        }
        tracing::info!(
            code = %entry.code,
            file_name = %entry.file_name,
            uploaded_at = %entry.uploaded_at,
            "Expired artifact swept"
        );
        removed += 1;
    }

    if removed > 0 {
        if let Err(e) = guard.save(&survivors).await {
            tracing::error!(error = %e, "Failed to persist catalog after retention sweep");
        }
    }

    removed
}
