use crate::application::dto::ChangeLog;
use crate::shared::Result;
use std::path::Path;

/// ChangeLogReader port for loading recorded dependency changes
///
/// This port abstracts where change logs come from and how they are
/// decoded, so the replay use case only sees the parsed `ChangeLog`.
pub trait ChangeLogReader {
    /// Reads and parses the change log at `path`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The change log does not exist
    /// - The file fails the security checks (symlink, size, not a regular file)
    /// - The content is not a valid YAML or JSON change log
    fn read_change_log(&self, path: &Path) -> Result<ChangeLog>;
}
