//! Portal build service that ties parsing, data output and rendering together.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{
    prepare_output_dir, DEFAULT_INPUT, DEFAULT_OUTPUT_DIR, HTML_FILE_NAME,
    HTML_SIZE_WARNING_BYTES,
};
use crate::error::Result;
use crate::output::{load_json, render_html, save_data, write_atomic, DataFormat};
use crate::parser::parse_file;
use crate::types::DocumentMetadata;

/// Markers every rendered page must contain, with a readable check name.
const REQUIRED_MARKERS: &[(&str, &str)] = &[
    ("DOCTYPE declaration", "<!DOCTYPE html>"),
    ("Sidebar navigation", "class=\"sidebar\""),
    ("Main content", "class=\"content\""),
    ("Search input", "id=\"search-input\""),
    ("Embedded data", "const OPERATIONS_DATA"),
    ("Workstream sections", "class=\"workstream-section\""),
];

/// Inputs of a portal build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Source markdown document.
    pub input: PathBuf,

    /// Directory receiving the data file and `index.html`.
    pub output_dir: PathBuf,

    /// Format of the data file.
    pub format: DataFormat,

    /// Render and validate `index.html` after writing the data file.
    pub render_html: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: DataFormat::default(),
            render_html: true,
        }
    }
}

/// Result of one structural check on a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationCheck {
    pub name: &'static str,
    pub passed: bool,
}

/// What a build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Totals of the parsed document.
    pub metadata: DocumentMetadata,

    pub data_path: PathBuf,
    pub data_bytes: u64,

    /// Set when the HTML page was rendered.
    pub html_path: Option<PathBuf>,
    pub html_bytes: Option<u64>,

    /// Page checks; empty when no HTML was rendered.
    pub checks: Vec<ValidationCheck>,

    /// True when the page exceeds [`HTML_SIZE_WARNING_BYTES`].
    pub size_warning: bool,
}

impl BuildReport {
    /// Names of the checks that failed.
    #[must_use]
    pub fn failed_checks(&self) -> Vec<String> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name.to_string())
            .collect()
    }
}

/// Run the structural checks on a rendered page.
///
/// # Examples
/// ```
/// use opsbible_portal::portal::validate_html;
///
/// let checks = validate_html("<!DOCTYPE html><nav class=\"sidebar\"></nav>");
/// assert!(checks[0].passed);
/// assert!(!checks.iter().all(|c| c.passed));
/// ```
#[must_use]
pub fn validate_html(html: &str) -> Vec<ValidationCheck> {
    REQUIRED_MARKERS
        .iter()
        .map(|&(name, marker)| ValidationCheck {
            name,
            passed: html.contains(marker),
        })
        .collect()
}

/// Build the portal: parse the input, save the data file, then optionally
/// render and check `index.html`.
///
/// Failed checks are reported, not raised; callers decide how to treat them.
///
/// # Errors
///
/// Returns an error if the input cannot be read or an output cannot be written.
pub fn build_portal(options: &BuildOptions) -> Result<BuildReport> {
    tracing::info!(input = %options.input.display(), "Parsing document");
    let doc = parse_file(&options.input)?;
    tracing::info!(
        departments = doc.metadata.total_departments,
        areas = doc.metadata.total_areas,
        workstreams = doc.metadata.total_workstreams,
        "Parsed document"
    );

    prepare_output_dir(&options.output_dir)?;
    let data_path = save_data(&doc, &options.output_dir, options.format)?;
    let data_bytes = fs::metadata(&data_path)?.len();

    let mut report = BuildReport {
        metadata: doc.metadata.clone(),
        data_path,
        data_bytes,
        html_path: None,
        html_bytes: None,
        checks: Vec::new(),
        size_warning: false,
    };

    if options.render_html {
        let html = render_html(&doc)?;
        let html_path = options.output_dir.join(HTML_FILE_NAME);
        write_atomic(&html_path, &html)?;
        let html_bytes = html.len() as u64;
        tracing::info!(path = %html_path.display(), bytes = html_bytes, "Wrote portal page");

        report.checks = validate_html(&html);
        report.size_warning = html_bytes > HTML_SIZE_WARNING_BYTES;
        if report.size_warning {
            tracing::warn!(bytes = html_bytes, "Portal page is unusually large");
        }
        report.html_path = Some(html_path);
        report.html_bytes = Some(html_bytes);
    }

    Ok(report)
}

/// Render `index.html` from a previously saved JSON data file.
///
/// # Returns
/// Number of bytes written
pub fn render_from_data(data_path: &Path, html_path: &Path) -> Result<u64> {
    let doc = load_json(data_path)?;
    let html = render_html(&doc)?;
    if let Some(parent) = html_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        prepare_output_dir(parent)?;
    }
    write_atomic(html_path, &html)?;
    tracing::info!(path = %html_path.display(), bytes = html.len(), "Wrote portal page");
    Ok(html.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortalError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    const SOURCE: &str = "# 1. 🔷 Finance\n## 📍 Area: Payables\n### Workstream: Invoices\n**Frequency:** Daily\n";

    fn options(dir: &Path) -> BuildOptions {
        let input = dir.join("bible.md");
        fs::write(&input, SOURCE).unwrap();
        BuildOptions {
            input,
            output_dir: dir.join("output"),
            ..BuildOptions::default()
        }
    }

    #[test]
    fn test_validate_html_all_markers() {
        let html = "<!DOCTYPE html><nav class=\"sidebar\"></nav><main class=\"content\">\
                    <input id=\"search-input\"><section class=\"workstream-section\"></section>\
                    </main><script>const OPERATIONS_DATA = {};</script>";
        assert!(validate_html(html).iter().all(|c| c.passed));
    }

    #[test]
    fn test_validate_html_reports_missing() {
        let checks = validate_html("<html></html>");
        assert_eq!(checks.len(), REQUIRED_MARKERS.len());
        assert!(checks.iter().all(|c| !c.passed));
    }

    #[test]
    fn test_build_portal_writes_outputs() {
        let dir = tempdir().unwrap();
        let report = build_portal(&options(dir.path())).unwrap();

        assert_eq!(report.metadata.total_workstreams, 1);
        assert_eq!(report.data_path, dir.path().join("output").join("data.json"));
        assert!(report.data_bytes > 0);
        let html_path = report.html_path.clone().unwrap();
        assert!(html_path.ends_with("index.html"));
        assert_eq!(report.html_bytes, Some(fs::metadata(&html_path).unwrap().len()));
        assert!(report.failed_checks().is_empty());
        assert!(!report.size_warning);
    }

    #[test]
    fn test_build_portal_without_html() {
        let dir = tempdir().unwrap();
        let opts = BuildOptions {
            format: DataFormat::Yaml,
            render_html: false,
            ..options(dir.path())
        };
        let report = build_portal(&opts).unwrap();
        assert!(report.data_path.ends_with("data.yaml"));
        assert!(report.html_path.is_none());
        assert!(report.checks.is_empty());
        assert!(!dir.path().join("output").join("index.html").exists());
    }

    #[test]
    fn test_build_portal_empty_document_fails_section_check() {
        let dir = tempdir().unwrap();
        let opts = options(dir.path());
        fs::write(&opts.input, "No headers here\n").unwrap();
        let report = build_portal(&opts).unwrap();
        assert_eq!(report.failed_checks(), vec!["Workstream sections"]);
    }

    #[test]
    fn test_build_portal_missing_input() {
        let dir = tempdir().unwrap();
        let opts = BuildOptions {
            input: dir.path().join("missing.md"),
            output_dir: dir.path().join("output"),
            ..BuildOptions::default()
        };
        assert!(matches!(
            build_portal(&opts).unwrap_err(),
            PortalError::InputNotFound(_)
        ));
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_render_from_data() {
        let dir = tempdir().unwrap();
        let opts = BuildOptions {
            render_html: false,
            ..options(dir.path())
        };
        let report = build_portal(&opts).unwrap();
        let html_path = dir.path().join("site").join("portal.html");
        let bytes = render_from_data(&report.data_path, &html_path).unwrap();
        assert_eq!(bytes, fs::metadata(&html_path).unwrap().len());
        let html = fs::read_to_string(&html_path).unwrap();
        assert!(validate_html(&html).iter().all(|c| c.passed));
    }
}
