//! Line classifier.
//!
//! This is the only place where the document's syntax is defined. Every
//! other component works on [`Line`] values instead of testing prefixes.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{AREA_MARKER, DEPARTMENT_MARKER};

/// `# 1. 🔷 Finance & Accounting`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEPARTMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^#\s+(\d+)\.\s*({})\s*(.*)$",
        regex::escape(DEPARTMENT_MARKER)
    ))
    .expect("valid regex")
});

/// `## 📍 Area: Accounts Payable`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static AREA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^##\s+({})\s*Area:\s*(.*)$",
        regex::escape(AREA_MARKER)
    ))
    .expect("valid regex")
});

/// `### Workstream: Vendor Invoices`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WORKSTREAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^###\s+Workstream:\s*(.*)$").expect("valid regex"));

/// `####1. Intake`: subheadings tolerate a missing space after the hashes.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SUBHEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{4,6})\s*([^#\s].*)?$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,3})(?:\s+(.*))?$").expect("valid regex"));

/// `**Label:** rest of line`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BOLD_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*([^*]+?):\*\*\s*(.*)$").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s+(.*)$").expect("valid regex"));

/// Name used for department headings that carry a number but no name.
pub const UNNAMED: &str = "Unknown";

/// A classified source line. Borrowed text is already trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    /// Horizontal rule (`---`).
    Rule,
    DepartmentHeader {
        number: u32,
        marker: &'a str,
        name: &'a str,
    },
    AreaHeader {
        marker: &'a str,
        name: &'a str,
    },
    WorkstreamHeader {
        name: &'a str,
    },
    /// Heading of level four or deeper, used inside "Process Steps".
    Subheading {
        level: u8,
        title: &'a str,
    },
    /// Any other heading of level one to three.
    Heading {
        level: u8,
        text: &'a str,
    },
    BoldLabel {
        label: &'a str,
        rest: &'a str,
    },
    /// Pipe-delimited row with the enclosing empty cells removed.
    TableRow(Vec<&'a str>),
    /// Bullet item with the marker stripped.
    Bullet(&'a str),
    Text(&'a str),
}

impl<'a> Line<'a> {
    /// True for lines that end a field block: bold labels, headings and rules.
    #[must_use]
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Self::BoldLabel { .. }
                | Self::Rule
                | Self::DepartmentHeader { .. }
                | Self::AreaHeader { .. }
                | Self::WorkstreamHeader { .. }
                | Self::Subheading { .. }
                | Self::Heading { .. }
        )
    }

    /// Heading level, if this line is any kind of heading.
    #[must_use]
    pub fn heading_level(&self) -> Option<u8> {
        match self {
            Self::DepartmentHeader { .. } => Some(1),
            Self::AreaHeader { .. } => Some(2),
            Self::WorkstreamHeader { .. } => Some(3),
            Self::Subheading { level, .. } | Self::Heading { level, .. } => Some(*level),
            _ => None,
        }
    }

    /// Text of a bullet or plain text line.
    #[must_use]
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Self::Bullet(text) | Self::Text(text) => Some(*text),
            _ => None,
        }
    }
}

/// Classify a single source line.
///
/// # Examples
/// ```
/// use opsbible_portal::parser::{classify, Line};
///
/// assert_eq!(
///     classify("**Frequency:** Weekly"),
///     Line::BoldLabel { label: "Frequency", rest: "Weekly" }
/// );
/// assert_eq!(classify("- Finance Team"), Line::Bullet("Finance Team"));
/// ```
#[must_use]
pub fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();

    if line.is_empty() {
        return Line::Blank;
    }

    if line.len() >= 3 && line.bytes().all(|b| b == b'-') {
        return Line::Rule;
    }

    if line.starts_with('#') {
        if let Some(heading) = classify_heading(line) {
            return heading;
        }
    }

    if let Some(caps) = BOLD_LABEL_RE.captures(line) {
        if let (Some(label), Some(rest)) = (caps.get(1), caps.get(2)) {
            return Line::BoldLabel {
                label: label.as_str().trim(),
                rest: rest.as_str().trim(),
            };
        }
    }

    if line.starts_with('|') {
        return Line::TableRow(split_cells(line));
    }

    if let Some(item) = BULLET_RE.captures(line).and_then(|c| c.get(1)) {
        return Line::Bullet(item.as_str().trim());
    }

    Line::Text(line)
}

fn classify_heading(line: &str) -> Option<Line<'_>> {
    if let Some(caps) = DEPARTMENT_RE.captures(line) {
        // Numbers too large for u32 fall through to a plain heading.
        if let Some(number) = caps.get(1).and_then(|m| m.as_str().parse().ok()) {
            let marker = caps.get(2).map_or("", |m| m.as_str());
            let name = caps.get(3).map_or("", |m| m.as_str().trim());
            return Some(Line::DepartmentHeader {
                number,
                marker,
                name: if name.is_empty() { UNNAMED } else { name },
            });
        }
    }

    if let Some(caps) = AREA_RE.captures(line) {
        return Some(Line::AreaHeader {
            marker: caps.get(1).map_or("", |m| m.as_str()),
            name: caps.get(2).map_or("", |m| m.as_str().trim()),
        });
    }

    if let Some(caps) = WORKSTREAM_RE.captures(line) {
        return Some(Line::WorkstreamHeader {
            name: caps.get(1).map_or("", |m| m.as_str().trim()),
        });
    }

    if let Some(caps) = SUBHEADING_RE.captures(line) {
        let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
        let title = caps.get(2).map_or("", |m| m.as_str().trim());
        return Some(Line::Subheading { level, title });
    }

    let caps = HEADING_RE.captures(line)?;
    let level = u8::try_from(caps.get(1)?.as_str().len()).ok()?;
    let text = caps.get(2).map_or("", |m| m.as_str().trim());
    Some(Line::Heading { level, text })
}

/// Split a pipe-delimited row into trimmed cells.
///
/// At most one empty cell is dropped on each side (the ones produced by the
/// enclosing pipes); interior empty cells are kept so columns stay aligned.
#[must_use]
pub fn split_cells(row: &str) -> Vec<&str> {
    let mut cells: Vec<&str> = row.split('|').map(str::trim).collect();
    if cells.first().is_some_and(|c| c.is_empty()) {
        cells.remove(0);
    }
    if cells.last().is_some_and(|c| c.is_empty()) {
        cells.pop();
    }
    cells
}
