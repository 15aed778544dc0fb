//! String helpers for emitting TypeScript source

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier pattern is valid"));

/// Whether `name` can be used as a bare TypeScript property key
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name)
}

/// Render `name` as a property key, single-quoting it when it is not a plain identifier
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quoted(name)
    }
}

/// Wrap `name` in single quotes, escaping embedded quotes and backslashes
pub fn quoted(name: &str) -> String {
    format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Make text safe to place inside a `/** ... */` block
pub fn sanitize_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}

/// Render a doc comment line, or nothing for an absent or empty comment
pub fn doc_comment(comment: Option<&str>) -> Option<String> {
    comment
        .filter(|c| !c.is_empty())
        .map(|c| format!("/** {} */", sanitize_comment(c)))
}
