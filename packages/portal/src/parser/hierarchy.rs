//! Hierarchy walker.
//!
//! Bounds departments, then areas inside each department, then workstreams
//! inside each area. Each level is found the same way: a header line opens a
//! node whose body runs up to the next header of the same level (or the end
//! of the enclosing body). Lines before the first header of a level belong
//! to no node and are ignored.

use std::collections::HashSet;
use std::ops::Range;

use super::content::parse_workstream_content;
use super::line::{classify, Line};
use super::slug::slugify;
use crate::types::{Area, Department, Workstream};

/// A header found by [`sections`] together with its body range.
struct Section<T> {
    header: T,
    body: Range<usize>,
}

/// Split `range` of `lines` at every header accepted by `select`.
///
/// Bodies are half-open: `[header + 1, next_header)`.
fn sections<'a, T>(
    lines: &[&'a str],
    range: Range<usize>,
    select: impl Fn(Line<'a>) -> Option<T>,
) -> Vec<Section<T>> {
    let end = range.end;
    let mut found: Vec<(usize, T)> = Vec::new();
    for idx in range {
        if let Some(header) = select(classify(lines[idx])) {
            found.push((idx, header));
        }
    }

    let starts: Vec<usize> = found.iter().map(|(idx, _)| *idx).collect();
    found
        .into_iter()
        .enumerate()
        .map(|(n, (idx, header))| Section {
            header,
            body: idx + 1..starts.get(n + 1).copied().unwrap_or(end),
        })
        .collect()
}

/// Slugs seen under one parent; repeats and empty names are logged.
struct SiblingIds<'p> {
    kind: &'static str,
    parent: &'p str,
    seen: HashSet<String>,
}

impl<'p> SiblingIds<'p> {
    fn new(kind: &'static str, parent: &'p str) -> Self {
        Self {
            kind,
            parent,
            seen: HashSet::new(),
        }
    }

    fn check(&mut self, id: &str, name: &str) {
        if name.is_empty() {
            tracing::warn!(kind = self.kind, parent = self.parent, "Header without a name");
        }
        if !self.seen.insert(id.to_string()) {
            tracing::warn!(
                kind = self.kind,
                parent = self.parent,
                id,
                "Duplicate sibling identifier"
            );
        }
    }
}

/// Walk the full line sequence into the department tree.
#[must_use]
pub fn walk(lines: &[&str]) -> Vec<Department> {
    let departments = sections(lines, 0..lines.len(), |line| match line {
        Line::DepartmentHeader { marker, name, .. } => Some((marker, name)),
        _ => None,
    });

    let mut ids = SiblingIds::new("department", "");
    departments
        .into_iter()
        .map(|Section { header: (marker, name), body }| {
            let id = slugify(name);
            ids.check(&id, name);
            tracing::debug!(id = %id, lines = body.len(), "Parsed department");
            let areas = walk_areas(lines, body, &id);
            Department {
                id,
                name: name.to_string(),
                marker: marker.to_string(),
                areas,
            }
        })
        .collect()
}

fn walk_areas(lines: &[&str], body: Range<usize>, dept_id: &str) -> Vec<Area> {
    let areas = sections(lines, body, |line| match line {
        Line::AreaHeader { marker, name } => Some((marker, name)),
        _ => None,
    });

    let mut ids = SiblingIds::new("area", dept_id);
    areas
        .into_iter()
        .map(|Section { header: (marker, name), body }| {
            let id = slugify(name);
            ids.check(&id, name);
            tracing::debug!(department = dept_id, id = %id, "Parsed area");
            let parent = format!("{dept_id}/{id}");
            let workstreams = walk_workstreams(lines, body, &parent);
            Area {
                id,
                name: name.to_string(),
                marker: marker.to_string(),
                workstreams,
            }
        })
        .collect()
}

fn walk_workstreams(lines: &[&str], body: Range<usize>, area_key: &str) -> Vec<Workstream> {
    let workstreams = sections(lines, body, |line| match line {
        Line::WorkstreamHeader { name } => Some(name),
        _ => None,
    });

    let mut ids = SiblingIds::new("workstream", area_key);
    workstreams
        .into_iter()
        .map(|Section { header: name, body }| {
            let id = slugify(name);
            ids.check(&id, name);
            let key = format!("{area_key}/{id}");
            let content = parse_workstream_content(&lines[body]);
            tracing::debug!(key = %key, empty = content.is_empty(), "Parsed workstream");
            Workstream {
                id,
                key,
                name: name.to_string(),
                content,
            }
        })
        .collect()
}
