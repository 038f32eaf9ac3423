//! Static HTML portal renderer.
//!
//! Produces one self-contained page: header with search, sidebar tree,
//! home section, one section per workstream, and the document embedded as
//! JSON for the navigation and search script. Missing fields render as
//! nothing; rendering only fails if the document cannot be serialized.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CHECK_MARK, PORTAL_TITLE};
use crate::error::Result;
use crate::types::{
    Area, Department, Document, DocumentMetadata, Note, NoteContent, ProcessSteps, RaciEntry,
    Workstream,
};

const STYLES: &str = include_str!("assets/portal.css");
const SCRIPT: &str = include_str!("assets/portal.js");

/// Number of owners shown in a workstream's meta tags.
const MAX_OWNERS: usize = 2;

/// `**bold**` span inside already-escaped text.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("valid regex"));

/// Escape text for use in element content and double-quoted attributes.
///
/// # Examples
/// ```
/// use opsbible_portal::output::escape_html;
///
/// assert_eq!(escape_html(r#"<a href="x">R&D</a>"#), "&lt;a href=&quot;x&quot;&gt;R&amp;D&lt;/a&gt;");
/// ```
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    html_escape::encode_double_quoted_attribute(text)
}

/// Escape text, then turn `**bold**` spans into `<strong>` elements.
///
/// # Examples
/// ```
/// use opsbible_portal::output::convert_bold;
///
/// assert_eq!(convert_bold("Get **CFO** approval"), "Get <strong>CFO</strong> approval");
/// assert_eq!(convert_bold("<b>"), "&lt;b&gt;");
/// ```
#[must_use]
pub fn convert_bold(text: &str) -> String {
    BOLD_RE
        .replace_all(&escape_html(text), "<strong>$1</strong>")
        .into_owned()
}

/// Serialize the document for an inline `<script>` block.
///
/// `<`, `>` and `&` only occur inside JSON strings, so their `\uXXXX` forms
/// decode to the same data while `</script>` and `<!--` cannot appear.
fn script_safe_json(doc: &Document) -> Result<String> {
    let json = serde_json::to_string(doc)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

/// Render the full portal page.
pub fn render_html(doc: &Document) -> Result<String> {
    let data = script_safe_json(doc)?;
    let version = escape_html(&doc.metadata.version);

    let mut sections = String::new();
    for (dept, area, ws) in doc.workstreams() {
        sections.push_str(&render_workstream(dept, area, ws));
    }

    let page = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{PORTAL_TITLE} v{version}</title>
<style>
{STYLES}
</style>
</head>
<body>
<header class="header">
  <div class="header-title">📘 {PORTAL_TITLE} <span class="header-version">v{version}</span></div>
  <button id="mobile-menu-btn" class="mobile-menu-btn" aria-label="Toggle menu">☰</button>
  <div class="search-container">
    <input type="text" id="search-input" class="search-input" placeholder="Search workstreams, owners, departments..." autocomplete="off">
    <button id="search-clear" class="search-clear" aria-label="Clear search">×</button>
  </div>
</header>
<div class="container">
<nav class="sidebar">
{nav}</nav>
<main class="content">
<div id="breadcrumbs" class="breadcrumbs"><span class="breadcrumb-item">Home</span></div>
{home}{sections}</main>
</div>
<script>
const OPERATIONS_DATA = {data};
{SCRIPT}
</script>
</body>
</html>
"#,
        nav = render_navigation(&doc.departments),
        home = render_home(&doc.metadata),
    );

    tracing::debug!(bytes = page.len(), "Rendered portal page");
    Ok(page)
}

fn render_navigation(departments: &[Department]) -> String {
    let mut out = String::from("<ul class=\"nav-tree\">\n");
    for dept in departments {
        out.push_str(&format!(
            "<li class=\"nav-department\" data-dept-id=\"{}\">\n\
             <div class=\"nav-department-header\"><span class=\"toggle-icon\">▶</span> {} <strong>{}</strong></div>\n\
             <ul class=\"nav-areas\">\n",
            escape_html(&dept.id),
            escape_html(&dept.marker),
            escape_html(&dept.name),
        ));
        for area in &dept.areas {
            out.push_str(&format!(
                "<li class=\"nav-area\" data-area-id=\"{}\">\n\
                 <div class=\"nav-area-header\"><span class=\"toggle-icon\">▶</span> {} {} <span class=\"badge-count\">{}</span></div>\n\
                 <ul class=\"nav-workstreams\">\n",
                escape_html(&area.id),
                escape_html(&area.marker),
                escape_html(&area.name),
                area.workstreams.len(),
            ));
            for ws in &area.workstreams {
                let key = escape_html(&ws.key);
                out.push_str(&format!(
                    "<li class=\"nav-workstream\"><a href=\"#ws-{key}\" class=\"nav-workstream-link\" data-workstream-key=\"{key}\">{}</a></li>\n",
                    escape_html(&ws.name),
                ));
            }
            out.push_str("</ul>\n</li>\n");
        }
        out.push_str("</ul>\n</li>\n");
    }
    out.push_str("</ul>\n");
    out
}

fn render_home(metadata: &DocumentMetadata) -> String {
    format!(
        r#"<section id="home-section" class="home-section">
<h1>{PORTAL_TITLE} v{version}</h1>
<p class="text-muted">Operational reference for every department, area and workstream.</p>
<h2>How to Use This Portal</h2>
<ul>
<li>Browse departments, areas and workstreams in the <strong>sidebar</strong>.</li>
<li>Use the <strong>search bar</strong> to find workstreams, roles or teams.</li>
<li>Open a workstream to see its RACI matrix, dependencies, outputs and process steps.</li>
</ul>
<h2>RACI Key</h2>
<ul class="raci-key">
<li><strong>R</strong> = Responsible (does the work)</li>
<li><strong>A</strong> = Accountable (final authority)</li>
<li><strong>C</strong> = Consulted (provides input)</li>
<li><strong>I</strong> = Informed (kept in the loop)</li>
</ul>
<div class="stats-grid">
<div class="stat-card"><div class="stat-value">{departments}</div><div class="stat-label">Departments</div></div>
<div class="stat-card"><div class="stat-value">{areas}</div><div class="stat-label">Areas</div></div>
<div class="stat-card"><div class="stat-value">{workstreams}</div><div class="stat-label">Workstreams</div></div>
</div>
<p class="text-muted last-updated">Last updated: {last_updated}</p>
</section>
"#,
        version = escape_html(&metadata.version),
        departments = metadata.total_departments,
        areas = metadata.total_areas,
        workstreams = metadata.total_workstreams,
        last_updated = escape_html(&metadata.last_updated),
    )
}

/// Opening markup of a titled content block.
fn section_open(anchor: &str, part: &str, title: &str) -> String {
    format!(
        "<div class=\"content-section\" id=\"{anchor}-{part}\">\n\
         <h2 class=\"section-title\">{title}</h2>\n\
         <div class=\"section-content\">\n"
    )
}

const SECTION_CLOSE: &str = "</div>\n</div>\n";

fn list_items<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    let mut out = String::from("<ul>\n");
    for item in items {
        out.push_str(&format!("<li>{}</li>\n", convert_bold(item)));
    }
    out.push_str("</ul>\n");
    out
}

fn render_workstream(dept: &Department, area: &Area, ws: &Workstream) -> String {
    let content = &ws.content;
    let anchor = format!("ws-{}", escape_html(&ws.key));
    let mut out = format!(
        "<section class=\"workstream-section\" id=\"{anchor}\" data-dept-id=\"{}\" data-area-id=\"{}\">\n\
         <div class=\"workstream-header\">\n\
         <div class=\"workstream-path\">{} {} › {} {}</div>\n\
         <h1 class=\"workstream-title\">{}</h1>\n\
         <div class=\"workstream-meta\">\n",
        escape_html(&dept.id),
        escape_html(&area.id),
        escape_html(&dept.marker),
        escape_html(&dept.name),
        escape_html(&area.marker),
        escape_html(&area.name),
        escape_html(&ws.name),
    );

    if !content.frequency.is_empty() {
        out.push_str(&format!(
            "<span class=\"meta-tag\"><strong>Frequency:</strong> {}</span>\n",
            escape_html(&content.frequency)
        ));
    }
    let owners: Vec<&str> = content.owners().take(MAX_OWNERS).collect();
    if !owners.is_empty() {
        out.push_str(&format!(
            "<span class=\"meta-tag\"><strong>Owner:</strong> {}</span>\n",
            escape_html(&owners.join(", "))
        ));
    }
    out.push_str("</div>\n</div>\n");

    out.push_str(&render_quick_jump(&anchor, ws));

    if !content.description.is_empty() {
        out.push_str(&section_open(&anchor, "description", "Description"));
        out.push_str(&format!("<p>{}</p>\n", convert_bold(&content.description)));
        out.push_str(SECTION_CLOSE);
    }

    if !content.output.is_empty() {
        out.push_str(&section_open(&anchor, "output", "Output"));
        out.push_str(&list_items(&content.output));
        out.push_str(SECTION_CLOSE);
    }

    if !content.dependencies.is_empty() {
        out.push_str(&section_open(&anchor, "dependencies", "Dependencies"));
        out.push_str("<ul class=\"dependency-list\">\n");
        for dep in &content.dependencies {
            out.push_str(&format!(
                "<li class=\"dependency-item\"><span class=\"dependency-team\">{}</span>",
                convert_bold(&dep.team)
            ));
            if !dep.reason.is_empty() {
                out.push_str(&format!(
                    " <span class=\"dependency-reason\">({})</span>",
                    convert_bold(&dep.reason)
                ));
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ul>\n");
        out.push_str(SECTION_CLOSE);
    }

    out.push_str(&section_open(&anchor, "raci", "RACI Matrix"));
    out.push_str(&render_raci_table(&content.raci));
    out.push_str(SECTION_CLOSE);

    if let Some(steps) = &content.process_steps {
        out.push_str(&section_open(&anchor, "steps", "Process Steps"));
        out.push_str(&render_process_steps(steps));
        out.push_str(SECTION_CLOSE);
    }

    if !content.notes.is_empty() {
        out.push_str(&format!("<div class=\"notes\" id=\"{anchor}-notes\">\n"));
        for note in &content.notes {
            out.push_str(&render_note(note));
        }
        out.push_str("</div>\n");
    }

    out.push_str("</section>\n");
    out
}

fn render_quick_jump(anchor: &str, ws: &Workstream) -> String {
    let content = &ws.content;
    let entries = [
        (!content.description.is_empty(), "description", "Description"),
        (!content.output.is_empty(), "output", "Output"),
        (!content.dependencies.is_empty(), "dependencies", "Dependencies"),
        (!content.raci.is_empty(), "raci", "RACI Matrix"),
        (content.process_steps.is_some(), "steps", "Process Steps"),
        (!content.notes.is_empty(), "notes", "Notes"),
    ];
    let links: Vec<String> = entries
        .iter()
        .filter(|(present, _, _)| *present)
        .map(|(_, part, title)| {
            format!("<li><a href=\"#{anchor}-{part}\" class=\"toc-link\">{title}</a></li>")
        })
        .collect();
    if links.is_empty() {
        return String::new();
    }
    format!(
        "<nav class=\"workstream-toc\">\n<div class=\"toc-header\">Quick Jump:</div>\n<ul class=\"toc-list\">\n{}\n</ul>\n</nav>\n",
        links.join("\n")
    )
}

fn render_raci_table(raci: &[RaciEntry]) -> String {
    if raci.is_empty() {
        return "<p class=\"text-muted\">No RACI information available.</p>\n".to_string();
    }
    let mark = |set: bool| if set { CHECK_MARK } else { "" };
    let mut out = String::from(
        "<div class=\"raci-table-container\">\n<table class=\"raci-table\">\n\
         <thead><tr><th>Role</th><th>R</th><th>A</th><th>C</th><th>I</th></tr></thead>\n<tbody>\n",
    );
    for entry in raci {
        out.push_str(&format!(
            "<tr><td>{}</td><td class=\"raci-check\">{}</td><td class=\"raci-check\">{}</td><td class=\"raci-check\">{}</td><td class=\"raci-check\">{}</td></tr>\n",
            escape_html(&entry.role),
            mark(entry.responsible),
            mark(entry.accountable),
            mark(entry.consulted),
            mark(entry.informed),
        ));
    }
    out.push_str("</tbody>\n</table>\n</div>\n");
    out
}

fn render_process_steps(steps: &ProcessSteps) -> String {
    let mut out = String::new();

    if !steps.steps.is_empty() {
        out.push_str("<ol class=\"process-steps\">\n");
        for step in &steps.steps {
            out.push_str(&format!(
                "<li class=\"process-step\" value=\"{}\"><div class=\"step-title\">{}</div>\n",
                step.number,
                convert_bold(&step.title)
            ));
            if !step.details.is_empty() {
                out.push_str(&list_items(&step.details));
            }
            out.push_str("</li>\n");
        }
        out.push_str("</ol>\n");
    }

    if !steps.decision_points.is_empty() {
        out.push_str("<h3>Decision Points</h3>\n<ul class=\"decision-points\">\n");
        for point in &steps.decision_points {
            out.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                escape_html(&point.condition),
                convert_bold(&point.action)
            ));
        }
        out.push_str("</ul>\n");
    }

    if !steps.common_issues.is_empty() {
        out.push_str("<h3>Common Issues</h3>\n<dl class=\"common-issues\">\n");
        for issue in &steps.common_issues {
            out.push_str(&format!("<dt>{}</dt>\n", convert_bold(&issue.issue)));
            if !issue.solution.is_empty() {
                out.push_str(&format!("<dd>{}</dd>\n", convert_bold(&issue.solution)));
            }
        }
        out.push_str("</dl>\n");
    }

    if !steps.tools.is_empty() {
        out.push_str("<h3>Tools &amp; Access</h3>\n");
        out.push_str(&list_items(&steps.tools));
    }

    if !steps.related_workstreams.is_empty() {
        out.push_str("<h3>Related Workstreams</h3>\n");
        out.push_str(&list_items(&steps.related_workstreams));
    }

    out
}

fn render_note(note: &Note) -> String {
    let body = match &note.content {
        NoteContent::Items(items) => list_items(items),
        NoteContent::Text(text) => text
            .lines()
            .map(|line| format!("<p>{}</p>\n", convert_bold(line)))
            .collect(),
    };
    format!(
        "<div class=\"notes-section\">\n<div class=\"notes-title\">{}</div>\n<div class=\"notes-content\">\n{body}</div>\n</div>\n",
        convert_bold(&note.title)
    )
}
