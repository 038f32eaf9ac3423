//! Core data types for the portal.
//!
//! The record is a strictly downward-owned tree:
//! `Document → Department → Area → Workstream`. Every node is built once
//! from a bounded slice of source lines and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::config::{AREA_MARKER, DEPARTMENT_MARKER};

/// Summary metadata for a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Document version label.
    pub version: String,

    /// Human-readable generation date (e.g. "November 2025").
    pub last_updated: String,

    /// Number of departments.
    pub total_departments: usize,

    /// Number of areas across all departments.
    pub total_areas: usize,

    /// Number of workstreams across all areas.
    pub total_workstreams: usize,
}

/// Root of the parsed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Departments in source order.
    pub departments: Vec<Department>,

    /// Summary counts and version information.
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document, deriving the totals from the department tree.
    #[must_use]
    pub fn new(
        departments: Vec<Department>,
        version: impl Into<String>,
        last_updated: impl Into<String>,
    ) -> Self {
        let total_areas = departments.iter().map(|d| d.areas.len()).sum();
        let total_workstreams = departments.iter().map(Department::workstream_count).sum();
        let metadata = DocumentMetadata {
            version: version.into(),
            last_updated: last_updated.into(),
            total_departments: departments.len(),
            total_areas,
            total_workstreams,
        };
        Self {
            departments,
            metadata,
        }
    }

    /// Check that the metadata totals match the actual tree.
    ///
    /// Always true for documents built with [`Document::new`]; useful for
    /// documents loaded back from a data file.
    #[must_use]
    pub fn counts_consistent(&self) -> bool {
        let areas: usize = self.departments.iter().map(|d| d.areas.len()).sum();
        let workstreams: usize = self
            .departments
            .iter()
            .map(Department::workstream_count)
            .sum();
        self.metadata.total_departments == self.departments.len()
            && self.metadata.total_areas == areas
            && self.metadata.total_workstreams == workstreams
    }

    /// Iterate over every workstream with its department and area.
    pub fn workstreams(&self) -> impl Iterator<Item = (&Department, &Area, &Workstream)> {
        self.departments.iter().flat_map(|dept| {
            dept.areas
                .iter()
                .flat_map(move |area| area.workstreams.iter().map(move |ws| (dept, area, ws)))
        })
    }
}

/// Outermost organizational level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Slug of the display name.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Decorative glyph from the heading.
    #[serde(default = "default_department_marker")]
    pub marker: String,

    /// Areas in source order.
    pub areas: Vec<Area>,
}

impl Department {
    /// Total number of workstreams in this department.
    #[must_use]
    pub fn workstream_count(&self) -> usize {
        self.areas.iter().map(|a| a.workstreams.len()).sum()
    }
}

fn default_department_marker() -> String {
    DEPARTMENT_MARKER.to_string()
}

/// Second organizational level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Slug of the display name.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Decorative glyph from the heading.
    #[serde(default = "default_area_marker")]
    pub marker: String,

    /// Workstreams in source order.
    pub workstreams: Vec<Workstream>,
}

fn default_area_marker() -> String {
    AREA_MARKER.to_string()
}

/// Innermost organizational level, carrying the actual content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstream {
    /// Bare slug of the display name (not unique across areas).
    pub id: String,

    /// Hierarchical identifier: `department/area/workstream` slugs.
    pub key: String,

    /// Display name.
    pub name: String,

    /// Parsed content sections.
    #[serde(flatten)]
    pub content: WorkstreamContent,
}

/// Content sections of a workstream.
///
/// Every field defaults to empty, so a workstream without any recognized
/// label still produces a complete record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkstreamContent {
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub frequency: String,

    #[serde(default)]
    pub output: Vec<String>,

    #[serde(default)]
    pub dependencies: Vec<Dependency>,

    #[serde(default)]
    pub raci: Vec<RaciEntry>,

    #[serde(default)]
    pub notes: Vec<Note>,

    /// Present only when the workstream has a "Process Steps" block.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_steps: Option<ProcessSteps>,

    /// Raw body lines, kept for debugging.
    #[serde(default)]
    pub content_raw: String,
}

impl WorkstreamContent {
    /// True when no section produced any value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.description.is_empty()
            && self.frequency.is_empty()
            && self.output.is_empty()
            && self.dependencies.is_empty()
            && self.raci.is_empty()
            && self.notes.is_empty()
            && self.process_steps.is_none()
    }

    /// Roles that are responsible or accountable, in table order.
    pub fn owners(&self) -> impl Iterator<Item = &str> {
        self.raci
            .iter()
            .filter(|r| r.responsible || r.accountable)
            .map(|r| r.role.as_str())
    }
}

/// Another team this workstream relies on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub team: String,

    /// Parenthesized reason; empty when the source gives none.
    #[serde(default)]
    pub reason: String,
}

impl Dependency {
    #[must_use]
    pub fn new(team: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            team: team.into(),
            reason: reason.into(),
        }
    }
}

/// One row of a RACI matrix. The four flags are independent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaciEntry {
    pub role: String,
    pub responsible: bool,
    pub accountable: bool,
    pub consulted: bool,
    pub informed: bool,
}

/// A titled free-form section such as "Key Process Notes".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub content: NoteContent,
}

/// Body of a [`Note`]: a bullet list or one block of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteContent {
    Items(Vec<String>),
    Text(String),
}

impl NoteContent {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Items(items) => items.is_empty(),
            Self::Text(text) => text.is_empty(),
        }
    }
}

/// Parsed "Process Steps" block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSteps {
    #[serde(default)]
    pub steps: Vec<Step>,

    #[serde(default)]
    pub decision_points: Vec<DecisionPoint>,

    #[serde(default)]
    pub common_issues: Vec<CommonIssue>,

    /// Tools, access requirements and key thresholds.
    #[serde(default)]
    pub tools: Vec<String>,

    #[serde(default)]
    pub related_workstreams: Vec<String>,
}

/// A numbered step. `number` is kept exactly as written in the source;
/// numbers are neither renumbered nor checked for order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub number: u32,
    pub title: String,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionPoint {
    pub condition: String,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonIssue {
    pub issue: String,

    /// Empty when no solution line directly follows the issue.
    #[serde(default)]
    pub solution: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn workstream(id: &str) -> Workstream {
        Workstream {
            id: id.to_string(),
            key: format!("finance/payables/{id}"),
            name: id.to_string(),
            content: WorkstreamContent::default(),
        }
    }

    fn sample_departments() -> Vec<Department> {
        vec![
            Department {
                id: "finance".to_string(),
                name: "Finance".to_string(),
                marker: DEPARTMENT_MARKER.to_string(),
                areas: vec![
                    Area {
                        id: "payables".to_string(),
                        name: "Payables".to_string(),
                        marker: AREA_MARKER.to_string(),
                        workstreams: vec![workstream("invoices"), workstream("payments")],
                    },
                    Area {
                        id: "payroll".to_string(),
                        name: "Payroll".to_string(),
                        marker: AREA_MARKER.to_string(),
                        workstreams: vec![workstream("salaries")],
                    },
                ],
            },
            Department {
                id: "people".to_string(),
                name: "People".to_string(),
                marker: DEPARTMENT_MARKER.to_string(),
                areas: Vec::new(),
            },
        ]
    }

    #[test]
    fn test_document_counts() {
        let doc = Document::new(sample_departments(), "2.0", "November 2025");
        assert_eq!(doc.metadata.total_departments, 2);
        assert_eq!(doc.metadata.total_areas, 2);
        assert_eq!(doc.metadata.total_workstreams, 3);
        assert!(doc.counts_consistent());
    }

    #[test]
    fn test_counts_consistent_detects_tampering() {
        let mut doc = Document::new(sample_departments(), "2.0", "November 2025");
        doc.metadata.total_workstreams = 7;
        assert!(!doc.counts_consistent());
    }

    #[test]
    fn test_workstreams_iterator_order() {
        let doc = Document::new(sample_departments(), "2.0", "November 2025");
        let ids: Vec<&str> = doc.workstreams().map(|(_, _, ws)| ws.id.as_str()).collect();
        assert_eq!(ids, vec!["invoices", "payments", "salaries"]);
    }

    #[test]
    fn test_empty_content() {
        assert!(WorkstreamContent::default().is_empty());
    }

    #[test]
    fn test_owners_filters_by_flags() {
        let content = WorkstreamContent {
            raci: vec![
                RaciEntry {
                    role: "Ana".to_string(),
                    responsible: true,
                    ..RaciEntry::default()
                },
                RaciEntry {
                    role: "Bo".to_string(),
                    informed: true,
                    ..RaciEntry::default()
                },
                RaciEntry {
                    role: "Cy".to_string(),
                    accountable: true,
                    ..RaciEntry::default()
                },
            ],
            ..WorkstreamContent::default()
        };
        assert_eq!(content.owners().collect::<Vec<_>>(), vec!["Ana", "Cy"]);
    }

    #[test]
    fn test_process_steps_omitted_when_absent() {
        let json = serde_json::to_value(workstream("invoices")).unwrap();
        assert!(json.get("process_steps").is_none());
        assert_eq!(json["key"], "finance/payables/invoices");
        // content is flattened into the workstream object
        assert_eq!(json["description"], "");
    }

    #[test]
    fn test_note_content_untagged() {
        let items = Note {
            title: "Key Notes".to_string(),
            content: NoteContent::Items(vec!["a".to_string()]),
        };
        let text = Note {
            title: "Implementation Note".to_string(),
            content: NoteContent::Text("plain".to_string()),
        };
        assert_eq!(
            serde_json::to_string(&items).unwrap(),
            r#"{"title":"Key Notes","content":["a"]}"#
        );
        assert_eq!(
            serde_json::to_string(&text).unwrap(),
            r#"{"title":"Implementation Note","content":"plain"}"#
        );
        let back: Note = serde_json::from_str(r#"{"title":"t","content":"plain"}"#).unwrap();
        assert_eq!(back.content, NoteContent::Text("plain".to_string()));
    }

    #[test]
    fn test_marker_defaults_when_missing() {
        let dept: Department =
            serde_json::from_str(r#"{"id":"finance","name":"Finance","areas":[]}"#).unwrap();
        assert_eq!(dept.marker, DEPARTMENT_MARKER);
    }
}
