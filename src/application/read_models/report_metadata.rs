use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

/// Metadata stamped on every rendered snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMetadata {
    /// RFC 3339 generation time
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    /// Unique id of this rendering
    pub report_id: String,
}

impl ReportMetadata {
    pub fn new(
        timestamp: String,
        tool_name: String,
        tool_version: String,
        report_id: String,
    ) -> Self {
        Self {
            timestamp,
            tool_name,
            tool_version,
            report_id,
        }
    }

    /// Generates metadata with the current time and a fresh report id
    pub fn generate(tool_name: &str, tool_version: &str) -> Self {
        Self::new(
            Utc::now().to_rfc3339(),
            tool_name.to_string(),
            tool_version.to_string(),
            format!("urn:uuid:{}", Uuid::new_v4()),
        )
    }

    /// Uses the compile-time version from Cargo.toml
    pub fn generate_default() -> Self {
        Self::generate("depsnap", env!("CARGO_PKG_VERSION"))
    }
}
