//! Workstream content parser.
//!
//! Scans a workstream body and dispatches each recognized `**Label:**` line
//! to its extractor. An extractor owns the lines up to the next terminator
//! (bold label, heading or rule); the terminator itself is left for the
//! dispatch loop. "Process Steps" is the exception and brings its own
//! termination rules.

use super::extract::{bullet_items, dependencies, raci_rows};
use super::line::{classify, Line};
use super::steps::parse_process_steps;
use crate::types::{Note, NoteContent, WorkstreamContent};

/// Field a bold label dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Description,
    Frequency,
    Output,
    Dependencies,
    Raci,
    ProcessSteps,
    /// Any "... Notes", "... Requirements" or "Implementation Note" label.
    Note,
}

impl Field {
    /// Look up the field for a label, `None` for labels without an extractor.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Description" => Some(Self::Description),
            "Frequency" => Some(Self::Frequency),
            "Output" => Some(Self::Output),
            "Dependencies" => Some(Self::Dependencies),
            "RACI" => Some(Self::Raci),
            "Process Steps" => Some(Self::ProcessSteps),
            l if l.ends_with("Notes")
                || l.ends_with("Requirements")
                || l == "Implementation Note" =>
            {
                Some(Self::Note)
            }
            _ => None,
        }
    }
}

/// Parse the body lines of one workstream.
///
/// Repeated labels overwrite earlier values, except notes which accumulate.
/// A body without recognized labels yields an empty record.
#[must_use]
pub fn parse_workstream_content(lines: &[&str]) -> WorkstreamContent {
    let mut content = WorkstreamContent {
        content_raw: lines.join("\n"),
        ..WorkstreamContent::default()
    };

    let mut i = 0;
    while i < lines.len() {
        let Line::BoldLabel { label, rest } = classify(lines[i]) else {
            i += 1;
            continue;
        };
        let Some(field) = Field::from_label(label) else {
            tracing::debug!(label, "Skipping unrecognized field label");
            i += 1;
            continue;
        };

        i = match field {
            Field::Frequency => {
                content.frequency = rest.to_string();
                i + 1
            }
            Field::ProcessSteps => {
                let (steps, next) = parse_process_steps(lines, i + 1);
                content.process_steps = Some(steps);
                next
            }
            _ => {
                let end = block_end(lines, i + 1);
                let block = &lines[i + 1..end];
                match field {
                    Field::Description => content.description = join_text(rest, block, " "),
                    Field::Output => content.output = bullet_items(&with_inline(rest, block)),
                    Field::Dependencies => {
                        content.dependencies = dependencies(&with_inline(rest, block));
                    }
                    Field::Raci => content.raci = raci_rows(&classify_all(block)),
                    Field::Note => content.notes.push(parse_note(label, rest, block)),
                    Field::Frequency | Field::ProcessSteps => {}
                }
                end
            }
        };
    }

    content
}

/// Index of the first terminator line at or after `start`.
fn block_end(lines: &[&str], start: usize) -> usize {
    lines[start..]
        .iter()
        .position(|line| classify(line).is_terminator())
        .map_or(lines.len(), |offset| start + offset)
}

fn classify_all<'a>(block: &[&'a str]) -> Vec<Line<'a>> {
    block.iter().map(|line| classify(*line)).collect()
}

/// Classified block with the label's same-line remainder as a leading item.
fn with_inline<'a>(rest: &'a str, block: &[&'a str]) -> Vec<Line<'a>> {
    let mut lines = Vec::with_capacity(block.len() + 1);
    if !rest.is_empty() {
        lines.push(Line::Bullet(rest));
    }
    lines.extend(classify_all(block));
    lines
}

/// Non-blank trimmed lines, starting with the same-line remainder.
fn join_text(rest: &str, block: &[&str], separator: &str) -> String {
    std::iter::once(rest)
        .chain(block.iter().map(|line| line.trim()))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

fn parse_note(label: &str, rest: &str, block: &[&str]) -> Note {
    let lines = classify_all(block);
    let content = if lines.iter().any(|line| matches!(line, Line::Bullet(_))) {
        let items = std::iter::once(rest)
            .filter(|r| !r.is_empty())
            .chain(lines.iter().filter_map(|line| match line {
                Line::Bullet(item) => Some(*item),
                _ => None,
            }))
            .map(str::to_string)
            .collect();
        NoteContent::Items(items)
    } else {
        NoteContent::Text(join_text(rest, block, "\n"))
    };
    Note {
        title: label.to_string(),
        content,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Dependency, RaciEntry};
    use pretty_assertions::assert_eq;

    fn parse(src: &str) -> WorkstreamContent {
        let lines: Vec<&str> = src.lines().collect();
        parse_workstream_content(&lines)
    }

    #[test]
    fn test_field_from_label() {
        assert_eq!(Field::from_label("RACI"), Some(Field::Raci));
        assert_eq!(Field::from_label("Key Process Notes"), Some(Field::Note));
        assert_eq!(Field::from_label("Notes"), Some(Field::Note));
        assert_eq!(
            Field::from_label("Critical Implementation Requirements"),
            Some(Field::Note)
        );
        assert_eq!(Field::from_label("Implementation Note"), Some(Field::Note));
        assert_eq!(Field::from_label("Owner"), None);
        assert_eq!(Field::from_label("description"), None);
    }

    #[test]
    fn test_no_labels_gives_empty_record() {
        let content = parse("Just some prose.\n\n- a stray bullet\n| a | b |");
        assert!(content.is_empty());
        assert_eq!(content.content_raw, "Just some prose.\n\n- a stray bullet\n| a | b |");
    }

    #[test]
    fn test_description_multiline() {
        let content = parse("**Description:** Handles vendor\ninvoices end to end.\n\n  Including credit notes.\n**Frequency:** Daily");
        assert_eq!(
            content.description,
            "Handles vendor invoices end to end. Including credit notes."
        );
        assert_eq!(content.frequency, "Daily");
    }

    #[test]
    fn test_description_stops_at_heading_and_rule() {
        let content = parse("**Description:**\nFirst.\n---\nAfter rule.");
        assert_eq!(content.description, "First.");
        let content = parse("**Description:** A\n#### Aside\nB");
        assert_eq!(content.description, "A");
    }

    #[test]
    fn test_frequency_single_line() {
        let content = parse("**Frequency:** Weekly (Mondays)\nnot part of it");
        assert_eq!(content.frequency, "Weekly (Mondays)");
    }

    #[test]
    fn test_output_list() {
        let content = parse("**Output:**\n- Approved invoice\n- Payment voucher\n  signed by CFO\n**RACI:**");
        assert_eq!(
            content.output,
            vec!["Approved invoice", "Payment voucher signed by CFO"]
        );
    }

    #[test]
    fn test_output_inline_remainder() {
        let content = parse("**Output:** Monthly report\n- Dashboard");
        assert_eq!(content.output, vec!["Monthly report", "Dashboard"]);
    }

    #[test]
    fn test_dependencies() {
        let content = parse("**Dependencies:**\n- Finance Team (needs signoff)\n- Legal Team");
        assert_eq!(
            content.dependencies,
            vec![
                Dependency::new("Finance Team", "needs signoff"),
                Dependency::new("Legal Team", ""),
            ]
        );
    }

    #[test]
    fn test_raci_table() {
        let content = parse(
            "**RACI:**\n\n| Role | R | A | C | I |\n|------|---|---|---|---|\n| Ana | ✅ | | ✅ | |\n| Bo | | ✅ | | |\n\n**Key Process Notes:**\n- Keep receipts",
        );
        assert_eq!(content.raci.len(), 2);
        assert_eq!(
            content.raci[0],
            RaciEntry {
                role: "Ana".to_string(),
                responsible: true,
                accountable: false,
                consulted: true,
                informed: false,
            }
        );
        assert_eq!(content.notes.len(), 1);
    }

    #[test]
    fn test_notes_list_and_text() {
        let content = parse(
            "**Key Process Notes:**\n- One\nprose is dropped\n- Two\n**Implementation Note:** Use the shared drive.\nAsk IT for access.",
        );
        assert_eq!(
            content.notes,
            vec![
                Note {
                    title: "Key Process Notes".to_string(),
                    content: NoteContent::Items(vec!["One".to_string(), "Two".to_string()]),
                },
                Note {
                    title: "Implementation Note".to_string(),
                    content: NoteContent::Text(
                        "Use the shared drive.\nAsk IT for access.".to_string()
                    ),
                },
            ]
        );
    }

    #[test]
    fn test_repeated_labels() {
        let content = parse(
            "**Frequency:** Daily\n**Frequency:** Weekly\n**Output:**\n- old\n**Output:**\n- new\n**Team Notes:**\n- a\n**Team Notes:**\n- b",
        );
        assert_eq!(content.frequency, "Weekly");
        assert_eq!(content.output, vec!["new"]);
        assert_eq!(content.notes.len(), 2);
    }

    #[test]
    fn test_unrecognized_label_body_absorbed_nowhere() {
        let content = parse("**Owner:** Ana\n- stray\n**Frequency:** Daily");
        assert_eq!(content.frequency, "Daily");
        assert!(content.output.is_empty());
    }

    #[test]
    fn test_process_steps_resume_at_terminator() {
        let content = parse(
            "**Process Steps:**\n\n#### 1. Intake\n- Log request\n\n#### 3. Approve\n**RACI:**\n| Ana | ✅ |",
        );
        let steps = content.process_steps.unwrap();
        let numbers: Vec<u32> = steps.steps.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 3]);
        assert_eq!(content.raci.len(), 1);
    }

    #[test]
    fn test_process_steps_absent_by_default() {
        let content = parse("**Description:** No steps here.");
        assert!(content.process_steps.is_none());
    }
}
