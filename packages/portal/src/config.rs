//! Configuration constants and validation functions for the portal.

use std::fs;
use std::path::Path;

use crate::error::{PortalError, Result};

/// Default location of the source markdown document.
pub const DEFAULT_INPUT: &str = "input/operations_bible.md";

/// Default directory for generated files.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// File name of the structured data file (extension added per format).
pub const DATA_FILE_STEM: &str = "data";

/// File name of the rendered portal page.
pub const HTML_FILE_NAME: &str = "index.html";

/// Version stamped into the document metadata.
pub const DOCUMENT_VERSION: &str = "2.0";

/// Title shown in the page header and home section.
pub const PORTAL_TITLE: &str = "Operations Bible";

/// Glyph that marks a department heading (`# 1. 🔷 Finance`).
pub const DEPARTMENT_MARKER: &str = "🔷";

/// Glyph that marks an area heading (`## 📍 Area: Payables`).
pub const AREA_MARKER: &str = "📍";

/// Glyph that marks a RACI cell as set.
pub const CHECK_MARK: &str = "✅";

/// Decorative pictographs stripped before building identifiers.
pub const DECORATIVE_GLYPHS: &[char] = &['🔷', '📍', '✅'];

/// Rendered pages above this size get a warning in the build report (10 MB).
pub const HTML_SIZE_WARNING_BYTES: u64 = 10 * 1024 * 1024;

/// Format of the `last_updated` metadata field, e.g. "November 2025".
pub const LAST_UPDATED_FORMAT: &str = "%B %Y";

/// Check that the source document exists and is a regular file.
///
/// # Examples
/// ```
/// use opsbible_portal::config::validate_input_file;
///
/// assert!(validate_input_file(std::path::Path::new("does/not/exist.md")).is_err());
/// ```
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PortalError::InputNotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(PortalError::ReadInput {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a regular file"),
        });
    }
    Ok(())
}

/// Make sure the output directory exists, creating it when missing.
///
/// Fails when the path exists but is not a directory.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        if !dir.is_dir() {
            return Err(PortalError::InvalidOutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Label for the `last_updated` metadata field, based on the local date.
#[must_use]
pub fn last_updated_label() -> String {
    chrono::Local::now().format(LAST_UPDATED_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_validate_input_file_missing() {
        let dir = tempdir().unwrap();
        let err = validate_input_file(&dir.path().join("missing.md")).unwrap_err();
        assert!(matches!(err, PortalError::InputNotFound(_)));
    }

    #[test]
    fn test_validate_input_file_directory() {
        let dir = tempdir().unwrap();
        let err = validate_input_file(dir.path()).unwrap_err();
        assert!(matches!(err, PortalError::ReadInput { .. }));
    }

    #[test]
    fn test_validate_input_file_ok() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bible.md");
        fs::write(&file, "# 1. 🔷 Finance\n").unwrap();
        assert!(validate_input_file(&file).is_ok());
    }

    #[test]
    fn test_prepare_output_dir_creates_nested() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("a").join("b");
        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
    }

    #[test]
    fn test_prepare_output_dir_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("taken");
        fs::write(&file, "x").unwrap();
        let err = prepare_output_dir(&file).unwrap_err();
        assert!(matches!(err, PortalError::InvalidOutputDir(_)));
    }

    #[test]
    fn test_last_updated_label_format() {
        let label = last_updated_label();
        let (month, year) = label.split_once(' ').unwrap();
        assert!(month.chars().all(char::is_alphabetic));
        assert_eq!(year.len(), 4);
    }
}
