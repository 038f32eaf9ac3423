//! Inline extractors for bullet lists, dependency pairs and RACI tables.
//!
//! Each extractor works on already-classified lines of a bounded block, so
//! the caller decides where the block ends.

use std::sync::LazyLock;

use regex::Regex;

use super::line::Line;
use crate::config::CHECK_MARK;
use crate::types::{Dependency, RaciEntry};

/// `Team Name (reason)`: team is everything before the first parenthesized pair.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DEPENDENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?)\s*\((.+?)\)").expect("valid regex"));

/// Header cell that marks a repeated table header row.
const RACI_HEADER_CELL: &str = "Role";

/// Collect bullet items, folding plain text lines into the previous item.
///
/// Text that appears before the first bullet has nothing to continue and is
/// dropped.
#[must_use]
pub fn bullet_items(lines: &[Line<'_>]) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for line in lines {
        match line {
            Line::Bullet(item) => items.push((*item).to_string()),
            Line::Text(text) => {
                if let Some(last) = items.last_mut() {
                    last.push(' ');
                    last.push_str(text);
                }
            }
            _ => {}
        }
    }
    items
}

/// Parse one dependency item.
///
/// # Examples
/// ```
/// use opsbible_portal::parser::parse_dependency;
///
/// let dep = parse_dependency("Finance Team (needs signoff)");
/// assert_eq!(dep.team, "Finance Team");
/// assert_eq!(dep.reason, "needs signoff");
///
/// let dep = parse_dependency("Legal Team");
/// assert_eq!(dep.team, "Legal Team");
/// assert_eq!(dep.reason, "");
/// ```
#[must_use]
pub fn parse_dependency(item: &str) -> Dependency {
    match DEPENDENCY_RE.captures(item) {
        Some(caps) => Dependency::new(
            caps.get(1).map_or("", |m| m.as_str()).trim(),
            caps.get(2).map_or("", |m| m.as_str()).trim(),
        ),
        None => Dependency::new(item.trim(), ""),
    }
}

/// Parse every bullet of a block as a dependency.
#[must_use]
pub fn dependencies(lines: &[Line<'_>]) -> Vec<Dependency> {
    lines
        .iter()
        .filter_map(|line| match line {
            Line::Bullet(item) => Some(parse_dependency(item)),
            _ => None,
        })
        .collect()
}

/// Parse the table rows of a block into RACI entries.
///
/// Separator rows and repeated header rows are skipped, as are rows with
/// fewer than two cells. Missing status columns count as unset.
#[must_use]
pub fn raci_rows(lines: &[Line<'_>]) -> Vec<RaciEntry> {
    lines
        .iter()
        .filter_map(|line| match line {
            Line::TableRow(cells) => parse_raci_row(cells),
            _ => None,
        })
        .collect()
}

fn parse_raci_row(cells: &[&str]) -> Option<RaciEntry> {
    if cells.len() < 2 || is_separator_row(cells) || cells[0].starts_with(RACI_HEADER_CELL) {
        return None;
    }
    let checked = |idx: usize| cells.get(idx).is_some_and(|c| c.contains(CHECK_MARK));
    Some(RaciEntry {
        role: cells[0].to_string(),
        responsible: checked(1),
        accountable: checked(2),
        consulted: checked(3),
        informed: checked(4),
    })
}

/// `|---|:---:|` style rows.
fn is_separator_row(cells: &[&str]) -> bool {
    cells
        .first()
        .is_some_and(|c| c.starts_with("---") || c.starts_with(":-"))
}
