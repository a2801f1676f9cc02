use crate::shared::error::SnapshotError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
/// Change logs larger than this are refused before reading
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// A path that does not exist passes; callers check existence separately.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => {
            return Err(SnapshotError::FileReadError {
                path: path.to_path_buf(),
                details: format!("Failed to read metadata for {} operation: {}", operation, e),
            }
            .into())
        }
    };

    if metadata.is_symlink() {
        return Err(SnapshotError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} operations on symbolic links are not allowed", operation),
            hint: "Point the tool at the real file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Checks that `path` is an existing regular file within the size limit
///
/// # Returns
/// The file size in bytes
///
/// # Errors
/// - `FileReadError` if metadata cannot be read or the path is not a regular file
/// - `SecurityError` if the path is a symbolic link or exceeds `max_size`
pub fn inspect_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path).map_err(|e| SnapshotError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(SnapshotError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Use a regular file instead".to_string(),
        }
        .into());
    }

    if !metadata.is_file() {
        return Err(SnapshotError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    let file_size = metadata.len();
    if file_size > max_size {
        return Err(SnapshotError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes.",
                file_description, file_size, max_size
            ),
            hint: "Split the change log into smaller files".to_string(),
        }
        .into());
    }

    Ok(file_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("changes.yml");
        fs::write(&file_path, "batches: []").unwrap();

        assert!(validate_not_symlink(&file_path, "write").is_ok());
    }

    #[test]
    fn test_validate_not_symlink_nonexistent_is_ok() {
        let path = PathBuf::from("/nonexistent/output.txt");
        assert!(validate_not_symlink(&path, "write").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_not_symlink_rejects_link() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("target.txt");
        let link = temp_dir.path().join("link.txt");
        fs::write(&target, "x").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = validate_not_symlink(&link, "write").unwrap_err();
        assert!(err.to_string().contains("Security violation"));
    }

    #[test]
    fn test_inspect_regular_file_returns_size() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("changes.yml");
        fs::write(&file_path, "12345").unwrap();

        let size = inspect_regular_file(&file_path, "change log", MAX_FILE_SIZE).unwrap();
        assert_eq!(size, 5);
    }

    #[test]
    fn test_inspect_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = inspect_regular_file(temp_dir.path(), "change log", MAX_FILE_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_inspect_regular_file_exceeds_limit() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("changes.yml");
        fs::write(&file_path, "0123456789").unwrap();

        let result = inspect_regular_file(&file_path, "change log", 4);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_max_file_size_constant() {
        assert_eq!(MAX_FILE_SIZE, 100 * 1024 * 1024);
    }
}
