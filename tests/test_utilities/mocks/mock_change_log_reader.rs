use dependency_snapshots::application::dto::ChangeLog;
use dependency_snapshots::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock ChangeLogReader serving an in-memory change log
///
/// Records every path it was asked for so tests can check the request
/// reached the reader.
#[derive(Clone)]
pub struct MockChangeLogReader {
    yaml: String,
    fail_with: Option<String>,
    pub requested_paths: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockChangeLogReader {
    pub fn from_yaml(yaml: &str) -> Self {
        Self {
            yaml: yaml.to_string(),
            fail_with: None,
            requested_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            yaml: String::new(),
            fail_with: Some(message.to_string()),
            requested_paths: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requested_paths.lock().unwrap().len()
    }
}

impl ChangeLogReader for MockChangeLogReader {
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog> {
        self.requested_paths.lock().unwrap().push(path.to_path_buf());

        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }

        let change_log: ChangeLog = serde_yaml_ng::from_str(&self.yaml)?;
        change_log.validate()?;
        Ok(change_log)
    }
}
