//! Process-step sub-parser.
//!
//! A "Process Steps" block is its own small grammar: numbered `####`
//! steps with bullet details, followed by optional subsections for
//! decision points, common issues, tools and related workstreams. The scan
//! state lives in [`StepScan`], threaded through one function call, so the
//! parser holds no state between invocations.

use std::sync::LazyLock;

use regex::Regex;

use super::line::{classify, Line};
use crate::types::{CommonIssue, DecisionPoint, ProcessSteps, Step};

/// `1. Receive and Verify Invoice`
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STEP_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\.\s+(.+)$").expect("valid regex"));

/// Inline marker that pairs a solution with the preceding issue.
const SOLUTION_MARKER: &str = "**Solution:**";

/// Subsection of a process-step block currently being filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepSection {
    #[default]
    Steps,
    DecisionPoints,
    CommonIssues,
    Tools,
    RelatedWorkstreams,
}

impl StepSection {
    /// Map a `####` title to the subsection it opens, if any.
    ///
    /// Key thresholds share the tools bucket.
    #[must_use]
    pub fn from_title(title: &str) -> Option<Self> {
        if title.contains("Decision Points") {
            Some(Self::DecisionPoints)
        } else if title.contains("Common Issues") {
            Some(Self::CommonIssues)
        } else if title.contains("Tools")
            || title.contains("Access")
            || title.contains("Key Thresholds")
        {
            Some(Self::Tools)
        } else if title.contains("Related Workstreams") {
            Some(Self::RelatedWorkstreams)
        } else {
            None
        }
    }
}

/// Scan state: the active subsection, the step still collecting details,
/// and everything emitted so far.
#[derive(Debug, Default)]
struct StepScan {
    section: StepSection,
    current_step: Option<Step>,
    record: ProcessSteps,
}

impl StepScan {
    fn flush_step(&mut self) {
        if let Some(step) = self.current_step.take() {
            self.record.steps.push(step);
        }
    }

    fn finish(mut self) -> ProcessSteps {
        self.flush_step();
        self.record
    }
}

/// Labels that belong to the process-step vocabulary and must not end the block.
fn is_step_vocabulary(label: &str) -> bool {
    label.starts_with("If") || label == "Issue" || label == "Solution"
}

/// True when `line` ends the process-step block.
fn ends_block(line: &Line<'_>) -> bool {
    match line {
        Line::BoldLabel { label, .. } => !is_step_vocabulary(label),
        other => other.heading_level().is_some_and(|level| level < 4),
    }
}

/// Parse a process-step block.
///
/// `start` is the index of the first line after the `**Process Steps:**`
/// label. Returns the record and the index of the line that stopped the
/// scan (or `lines.len()`), which the caller resumes from.
#[must_use]
pub fn parse_process_steps(lines: &[&str], start: usize) -> (ProcessSteps, usize) {
    let mut scan = StepScan::default();
    let mut i = start;

    while i < lines.len() {
        let line = classify(lines[i]);
        if ends_block(&line) {
            break;
        }

        match line {
            Line::Subheading { title, .. } => handle_subheading(&mut scan, title),
            Line::Bullet(item) => handle_bullet(&mut scan, item),
            Line::BoldLabel { label, rest } => match scan.section {
                StepSection::DecisionPoints if !rest.is_empty() => {
                    scan.record.decision_points.push(DecisionPoint {
                        condition: label.to_string(),
                        action: rest.to_string(),
                    });
                }
                StepSection::CommonIssues if label == "Issue" => {
                    let solution = lines
                        .get(i + 1)
                        .filter(|next| next.contains(SOLUTION_MARKER))
                        .map(|next| next.replace(SOLUTION_MARKER, "").trim().to_string());
                    if solution.is_some() {
                        i += 1;
                    }
                    scan.record.common_issues.push(CommonIssue {
                        issue: rest.to_string(),
                        solution: solution.unwrap_or_default(),
                    });
                }
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }

    (scan.finish(), i)
}

/// Section keywords win over step numbering: `#### 2. Grant System Access`
/// opens the tools section.
fn handle_subheading(scan: &mut StepScan, title: &str) {
    if let Some(section) = StepSection::from_title(title) {
        scan.section = section;
    } else if scan.section == StepSection::Steps {
        if let Some(step) = parse_step_title(title) {
            scan.flush_step();
            scan.current_step = Some(step);
        }
    }
}

fn handle_bullet(scan: &mut StepScan, item: &str) {
    match scan.section {
        StepSection::Steps => {
            if let Some(step) = scan.current_step.as_mut() {
                step.details.push(item.to_string());
            }
        }
        StepSection::DecisionPoints => {
            if let Some((condition, action)) = item.split_once(':') {
                scan.record.decision_points.push(DecisionPoint {
                    condition: condition.trim().to_string(),
                    action: action.trim().to_string(),
                });
            }
        }
        StepSection::Tools => scan.record.tools.push(item.to_string()),
        StepSection::RelatedWorkstreams => {
            scan.record.related_workstreams.push(item.to_string());
        }
        StepSection::CommonIssues => {}
    }
}

/// `3. Approve` → step 3 titled "Approve". Numbers are kept as written.
fn parse_step_title(title: &str) -> Option<Step> {
    let caps = STEP_TITLE_RE.captures(title)?;
    let number = caps.get(1)?.as_str().parse().ok()?;
    Some(Step {
        number,
        title: caps.get(2)?.as_str().trim().to_string(),
        details: Vec::new(),
    })
}
