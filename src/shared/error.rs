use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish a clean snapshot from one
/// that still carries unresolved dependencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - snapshot built, or unresolved dependencies tolerated
    Success = 0,
    /// Visible unresolved dependencies remain and `--fail-on-unresolved` was set
    UnresolvedDependencies = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (change log, config, file I/O, snapshot invariant)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UnresolvedDependencies => write!(f, "Unresolved Dependencies (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors raised while loading change logs or building snapshots.
///
/// The snapshot variants (`ActiveTargetFrameworkMissing`, `DuplicateDependency`)
/// are invariant violations: they point at a bug in the caller, not at user input.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Change log not found: {path}\n\n💡 Hint: {suggestion}")]
    ChangeLogNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse change log: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the change log is valid YAML or JSON")]
    ChangeLogParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Active target framework '{target_framework}' has no snapshot\nKnown target frameworks: {known}")]
    ActiveTargetFrameworkMissing {
        target_framework: String,
        known: String,
    },

    #[error("Dependency '{id}' appears more than once in the snapshot for '{target_framework}'")]
    DuplicateDependency { id: String, target_framework: String },

    #[error("Unknown snapshot filter: '{name}'\n\n💡 Hint: Known filters are {known}")]
    UnknownFilter { name: String, known: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::UnresolvedDependencies.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::UnresolvedDependencies),
            "Unresolved Dependencies (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_change_log_not_found_display() {
        let error = SnapshotError::ChangeLogNotFound {
            path: PathBuf::from("/test/changes.yml"),
            suggestion: "Pass the change log with --input".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Change log not found"));
        assert!(display.contains("/test/changes.yml"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("--input"));
    }

    #[test]
    fn test_change_log_parse_error_display() {
        let error = SnapshotError::ChangeLogParseError {
            path: PathBuf::from("/test/changes.yml"),
            details: "missing field `batches`".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse change log"));
        assert!(display.contains("missing field `batches`"));
    }

    #[test]
    fn test_active_target_framework_missing_display() {
        let error = SnapshotError::ActiveTargetFrameworkMissing {
            target_framework: "net8.0".to_string(),
            known: "net6.0, net7.0".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("net8.0"));
        assert!(display.contains("net6.0, net7.0"));
    }

    #[test]
    fn test_unknown_filter_display() {
        let error = SnapshotError::UnknownFilter {
            name: "bogus".to_string(),
            known: "unresolved-guard".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Unknown snapshot filter: 'bogus'"));
        assert!(display.contains("unresolved-guard"));
    }

    #[test]
    fn test_security_error_display() {
        let error = SnapshotError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }

    #[test]
    fn test_snapshot_error_survives_anyhow() {
        let error: anyhow::Error = SnapshotError::Validation {
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(
            error.downcast_ref::<SnapshotError>(),
            Some(SnapshotError::Validation { .. })
        ));
    }
}
