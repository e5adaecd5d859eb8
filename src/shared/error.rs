use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no findings, or all findings below threshold
    Success = 0,
    /// Audit findings were detected (non-compliant licenses or vulnerabilities)
    FindingsDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (registry error, network error, file I/O error, etc.)
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
            ExitCode::FindingsDetected => write!(f, "Findings Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for dependency auditing.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("package.json not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse package.json: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest is valid JSON")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Failed to parse policy document: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the policy file is valid JSON or YAML")]
    PolicyParseError { path: PathBuf, details: String },

    #[error("Circular policy inheritance detected: {cycle}\n\n💡 Hint: Remove one of the extends references to break the cycle")]
    PolicyCycle { cycle: String },

    #[error("Policy '{policy}' extends unknown policy '{parent}'\n\n💡 Hint: Define '{parent}' or remove it from the extends list")]
    PolicyMissingParent { policy: String, parent: String },

    #[error("Duplicate policy name '{name}' in {path}\n\n💡 Hint: Policy names must be unique across all loaded documents")]
    DuplicatePolicy { name: String, path: PathBuf },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory")]
    InvalidProjectPath { path: PathBuf, reason: String },

    /// Validation error for builder patterns
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::FindingsDetected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::FindingsDetected),
            "Findings Detected (1)"
        );
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_manifest_not_found_display() {
        let error = AuditError::ManifestNotFound {
            path: PathBuf::from("/test/path/package.json"),
            suggestion: "Run from the project root".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("package.json not found"));
        assert!(display.contains("/test/path/package.json"));
        assert!(display.contains("💡 Hint:"));
        assert!(display.contains("Run from the project root"));
    }

    #[test]
    fn test_manifest_parse_error_display() {
        let error = AuditError::ManifestParseError {
            path: PathBuf::from("/test/package.json"),
            details: "expected `,` at line 4".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse package.json"));
        assert!(display.contains("expected `,` at line 4"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_policy_cycle_display() {
        let error = AuditError::PolicyCycle {
            cycle: "base -> strict -> base".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Circular policy inheritance"));
        assert!(display.contains("base -> strict -> base"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_policy_missing_parent_display() {
        let error = AuditError::PolicyMissingParent {
            policy: "frontend".to_string(),
            parent: "corporate".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("'frontend'"));
        assert!(display.contains("unknown policy 'corporate'"));
    }

    #[test]
    fn test_duplicate_policy_display() {
        let error = AuditError::DuplicatePolicy {
            name: "base".to_string(),
            path: PathBuf::from("/policies/extra.yml"),
        };
        let display = format!("{}", error);
        assert!(display.contains("Duplicate policy name 'base'"));
        assert!(display.contains("/policies/extra.yml"));
    }

    #[test]
    fn test_file_read_error_display() {
        let error = AuditError::FileReadError {
            path: PathBuf::from("/test/file.txt"),
            details: "File not found".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to read file"));
        assert!(display.contains("/test/file.txt"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_security_error_display() {
        let error = AuditError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("Symbolic links are not allowed"));
        assert!(display.contains("Use a regular file instead"));
    }
}
