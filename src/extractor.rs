/*!
 * First-heading extraction from fetched page text.
 *
 * Finds the first `<h1>` element in decoded HTML, strips any nested markup
 * from its inner text and collapses whitespace. Absence of a heading is a
 * normal outcome, not an error.
 */

use once_cell::sync::Lazy;
use regex::Regex;

// Non-greedy and dot-matches-newline so a heading split across lines still
// matches, and only the first heading's span is captured.
static H1_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("static regex must compile"));

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("static regex must compile"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Extract the first `<h1>` heading's flattened text from page HTML
///
/// Returns an empty string when the page has no heading, or when the heading
/// contains nothing but markup. Nested tags become single spaces and runs of
/// whitespace (including newlines) collapse to one space.
pub fn extract_first_heading(html: &str) -> String {
    let Some(captures) = H1_RE.captures(html) else {
        return String::new();
    };
    let inner = captures.get(1).map_or("", |m| m.as_str());
    let stripped = TAG_RE.replace_all(inner, " ");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}
