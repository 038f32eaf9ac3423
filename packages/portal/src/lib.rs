//! Operations Bible portal - Turn an operations markdown document into
//! structured data and a static HTML portal.
//!
//! The source document is organized as departments (`# 1. 🔷 Name`),
//! areas (`## 📍 Area: Name`) and workstreams (`### Workstream: Name`),
//! each workstream carrying bold-labelled sections such as
//! `**Description:**`, `**RACI:**` and `**Process Steps:**`.
//!
//! # Example
//!
//! ```
//! use opsbible_portal::parse_markdown_with;
//!
//! let doc = parse_markdown_with(
//!     "# 1. 🔷 Finance\n## 📍 Area: Payables\n### Workstream: Invoices\n",
//!     "November 2025",
//! );
//! assert_eq!(doc.departments[0].areas[0].workstreams[0].key, "finance/payables/invoices");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: The document tree (Department, Area, Workstream, ...)
//! - [`error`]: Error types and Result alias
//! - [`parser`]: Line classifier, hierarchy walker and content extractors
//! - [`output`]: JSON/YAML data files and the HTML renderer
//! - [`portal`]: Build service tying parsing and output together
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod portal;
pub mod types;

// Re-export main functions
pub use parser::{parse_file, parse_markdown, parse_markdown_with};
pub use portal::{build_portal, validate_html, BuildOptions, BuildReport};

// Re-export commonly used items
pub use error::{PortalError, Result};
pub use output::{render_html, DataFormat};
pub use types::{Area, Department, Document, DocumentMetadata, Workstream, WorkstreamContent};
