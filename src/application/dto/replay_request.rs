use std::path::PathBuf;

/// ReplayRequest - Internal request DTO for the change-log replay use case
#[derive(Debug, Clone)]
pub struct ReplayRequest {
    /// Path to the YAML or JSON change log
    pub change_log_path: PathBuf,
    /// Names of snapshot filters to leave out of the pipeline
    pub disabled_filters: Vec<String>,
}

impl ReplayRequest {
    pub fn new(change_log_path: PathBuf, disabled_filters: Vec<String>) -> Self {
        Self {
            change_log_path,
            disabled_filters,
        }
    }
}
