//! Identifier normalization.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::config::DECORATIVE_GLYPHS;

/// Characters outside the word/space/hyphen class.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid regex"));

/// Runs of separators that collapse into a single hyphen.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SLUG_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+").expect("valid regex"));

/// Generate a URL-safe slug from display text.
///
/// The result matches `[a-z0-9]+(-[a-z0-9]+)*`, or is empty when the text
/// has no alphanumeric content. Applying `slugify` to a slug returns it
/// unchanged.
///
/// # Examples
/// ```
/// use opsbible_portal::parser::slugify;
///
/// assert_eq!(slugify("Lead Sourcing & Tracking"), "lead-sourcing-tracking");
/// assert_eq!(slugify("🔷 Finance"), "finance");
/// assert_eq!(slugify("Café Opérations"), "cafe-operations");
/// assert_eq!(slugify("✅ !!"), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let text: String = text
        .chars()
        .filter(|c| !DECORATIVE_GLYPHS.contains(c))
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();
    let text = SLUG_NON_WORD.replace_all(&text, "");
    let text = SLUG_SEPARATORS.replace_all(&text, "-");
    text.trim_matches('-').to_string()
}
