//! Markdown parser for operations documents.
//!
//! The parser is split into small stages that share one line classifier:
//!
//! - [`line`]: classifies a source line into a [`Line`]
//! - [`slug`]: normalizes display names into identifiers
//! - [`hierarchy`]: bounds departments, areas and workstreams
//! - [`content`]: dispatches a workstream body to field extractors
//! - [`extract`]: bullet lists, dependencies and RACI rows
//! - [`steps`]: the "Process Steps" sub-parser
//!
//! Parsing never fails: malformed input produces a smaller record, not an
//! error. Only reading the file can fail.

pub mod content;
pub mod extract;
pub mod hierarchy;
pub mod line;
pub mod slug;
pub mod steps;

use std::fs;
use std::path::Path;

pub use content::{parse_workstream_content, Field};
pub use extract::parse_dependency;
pub use line::{classify, split_cells, Line};
pub use slug::slugify;
pub use steps::{parse_process_steps, StepSection};

use crate::config::{last_updated_label, validate_input_file, DOCUMENT_VERSION};
use crate::error::{PortalError, Result};
use crate::types::Document;

/// Parse a markdown document, stamping the current month as `last_updated`.
#[must_use]
pub fn parse_markdown(source: &str) -> Document {
    parse_markdown_with(source, &last_updated_label())
}

/// Parse a markdown document with an explicit `last_updated` label.
///
/// # Examples
/// ```
/// use opsbible_portal::parser::parse_markdown_with;
///
/// let doc = parse_markdown_with(
///     "# 1. 🔷 Finance\n## 📍 Area: Payables\n### Workstream: Invoices\n**Frequency:** Daily\n",
///     "November 2025",
/// );
/// assert_eq!(doc.metadata.total_workstreams, 1);
/// assert_eq!(doc.departments[0].areas[0].workstreams[0].content.frequency, "Daily");
/// ```
#[must_use]
pub fn parse_markdown_with(source: &str, last_updated: &str) -> Document {
    let lines: Vec<&str> = source.lines().collect();
    let departments = hierarchy::walk(&lines);
    let doc = Document::new(departments, DOCUMENT_VERSION, last_updated);
    tracing::debug!(
        departments = doc.metadata.total_departments,
        areas = doc.metadata.total_areas,
        workstreams = doc.metadata.total_workstreams,
        "Parsed document"
    );
    doc
}

/// Read and parse a markdown file.
///
/// # Errors
///
/// Returns an error if the file is missing or cannot be read as UTF-8 text.
pub fn parse_file(path: &Path) -> Result<Document> {
    validate_input_file(path)?;
    let source = fs::read_to_string(path).map_err(|source| PortalError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parse_markdown(&source))
}
