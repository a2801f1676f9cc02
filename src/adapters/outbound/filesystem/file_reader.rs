use crate::application::dto::ChangeLog;
use crate::ports::outbound::ChangeLogReader;
use crate::shared::error::SnapshotError;
use crate::shared::security::{inspect_regular_file, MAX_FILE_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading change logs from the file system
///
/// Files ending in `.json` are decoded as JSON; everything else as YAML.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a file after the symlink, regular-file and size checks
    fn safe_read_file(&self, path: &Path, file_description: &str) -> Result<String> {
        inspect_regular_file(path, file_description, MAX_FILE_SIZE)?;

        fs::read_to_string(path).map_err(|e| {
            SnapshotError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn is_json(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }

    fn parse(path: &Path, content: &str) -> Result<ChangeLog> {
        let parsed: std::result::Result<ChangeLog, String> = if Self::is_json(path) {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_yaml_ng::from_str(content).map_err(|e| e.to_string())
        };

        parsed.map_err(|details| {
            SnapshotError::ChangeLogParseError {
                path: path.to_path_buf(),
                details,
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLogReader for FileSystemReader {
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog> {
        if fs::symlink_metadata(path).is_err() {
            return Err(SnapshotError::ChangeLogNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass the path of a YAML or JSON change log with --input".to_string(),
            }
            .into());
        }

        let content = self.safe_read_file(path, "Change log")?;
        let change_log = Self::parse(path, &content)?;
        change_log.validate()?;

        tracing::debug!(
            path = %path.display(),
            batches = change_log.batches.len(),
            "Read change log"
        );
        Ok(change_log)
    }
}
