use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One stored artifact, as recorded in the catalog and echoed to clients.
///
/// Entries are created on upload, never mutated, and removed by the
/// retention sweep. Codes may collide across entries; `file_name` stays
/// unique because it embeds a second-resolution upload timestamp.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArtifactEntry {
    /// 4-character uppercase alphanumeric retrieval code.
    #[schema(example = "XA1B")]
    pub code: String,

    /// Storage filename: `<code>_<YYYYMMDD_HHMMSS>.<ext>`.
    #[schema(example = "XA1B_20260807_142530.glb")]
    pub file_name: String,

    /// Public URL the artifact can be fetched from.
    pub file_url: String,

    /// Source file size at upload time.
    pub size_bytes: u64,

    /// RFC 3339 upload timestamp; doubles as the retention clock.
    ///
    /// Kept as a string on purpose: one foreign or corrupt timestamp must
    /// not make the whole catalog undeserializable. Consumers parse via
    /// [`ArtifactEntry::parsed_uploaded_at`] and fall back per use site.
    #[serde(default)]
    pub uploaded_at: String,

    /// First 3 characters of the credential that uploaded the artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// `true` only when the server generated the code; absent otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_generated_code: Option<bool>,
}

impl ArtifactEntry {
    /// Parse `uploaded_at`, `None` when absent or not RFC 3339.
    pub fn parsed_uploaded_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.uploaded_at).ok()
    }

    /// Unix seconds for ordering; unparseable timestamps sort as epoch zero
    /// so they land at the oldest end of a newest-first listing.
    pub fn sort_timestamp(&self) -> i64 {
        self.parsed_uploaded_at()
            .map(|ts| ts.timestamp())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(uploaded_at: &str) -> ArtifactEntry {
        ArtifactEntry {
            code: "XA1B".to_string(),
            file_name: "XA1B_20260807_142530.glb".to_string(),
            file_url: "http://localhost:8088/artifacts/XA1B_20260807_142530.glb".to_string(),
            size_bytes: 42,
            uploaded_at: uploaded_at.to_string(),
            filter: None,
            server_generated_code: None,
        }
    }

    #[test]
    fn test_optional_fields_absent_from_json_when_none() {
        let json = serde_json::to_value(entry("2026-08-07T14:25:30+00:00")).unwrap();
        assert!(json.get("filter").is_none());
        assert!(json.get("server_generated_code").is_none());
    }

    #[test]
    fn test_optional_fields_present_when_set() {
        let mut e = entry("2026-08-07T14:25:30+00:00");
        e.filter = Some("rel".to_string());
        e.server_generated_code = Some(true);
        let json = serde_json::to_value(e).unwrap();
        assert_eq!(json["filter"], "rel");
        assert_eq!(json["server_generated_code"], true);
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let e: ArtifactEntry = serde_json::from_str(
            r#"{
                "code": "XA1B",
                "file_name": "XA1B_20260807_142530.glb",
                "file_url": "http://localhost/artifacts/XA1B_20260807_142530.glb",
                "size_bytes": 42
            }"#,
        )
        .unwrap();
        assert_eq!(e.uploaded_at, "");
        assert!(e.parsed_uploaded_at().is_none());
    }

    #[test]
    fn test_sort_timestamp_fallback() {
        assert_eq!(entry("not-a-date").sort_timestamp(), 0);
        assert_eq!(entry("").sort_timestamp(), 0);
        assert!(entry("2026-08-07T14:25:30+00:00").sort_timestamp() > 0);
    }

    #[test]
    fn test_parses_offset_timestamps() {
        let e = entry("2026-08-07T14:25:30+02:00");
        let parsed = e.parsed_uploaded_at().unwrap();
        let same_instant_utc = DateTime::parse_from_rfc3339("2026-08-07T12:25:30+00:00").unwrap();
        assert_eq!(parsed.timestamp(), same_instant_utc.timestamp());
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
    }
}
