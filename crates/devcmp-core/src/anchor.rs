//! Anchor ids for render targets

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();
static DISALLOWED: OnceLock<Regex> = OnceLock::new();

/// Turn an object name into a string usable as an element id
///
/// Runs of whitespace become `_`, then everything outside `[A-Za-z0-9_-]` is
/// dropped. Distinct names can collapse to the same id.
pub fn sanitize_anchor_id(name: &str) -> String {
    let whitespace = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    let disallowed =
        DISALLOWED.get_or_init(|| Regex::new(r"[^a-zA-Z0-9_-]").expect("valid regex"));

    let underscored = whitespace.replace_all(name, "_");
    disallowed.replace_all(&underscored, "").into_owned()
}

/// Full anchor id of `name` inside `container`
pub fn anchor_id(container: &str, name: &str) -> String {
    format!("{}_{}", container, sanitize_anchor_id(name))
}
