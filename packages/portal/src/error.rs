//! Error types for the portal.
//!
//! The parser itself never fails: missing sections and malformed rows are
//! recovered locally. Errors only come from the edges of the pipeline
//! (reading the source, writing output, validating the rendered page).

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the portal library.
#[derive(Debug, Error)]
pub enum PortalError {
    /// The source markdown file does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The source markdown file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The output location cannot be used as a directory.
    #[error("Invalid output directory: {0}")]
    InvalidOutputDir(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization or deserialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The rendered page is missing required structure.
    #[error("HTML validation failed: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),
}

/// Result type alias for portal operations.
pub type Result<T> = std::result::Result<T, PortalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_not_found_display() {
        let err = PortalError::InputNotFound(PathBuf::from("input/missing.md"));
        assert_eq!(err.to_string(), "Input file not found: input/missing.md");
    }

    #[test]
    fn test_read_input_keeps_source() {
        let err = PortalError::ReadInput {
            path: PathBuf::from("bible.md"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().starts_with("Failed to read bible.md"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_validation_failed_lists_checks() {
        let err = PortalError::ValidationFailed(vec!["Search".to_string(), "CSS".to_string()]);
        assert_eq!(err.to_string(), "HTML validation failed: Search, CSS");
    }
}
