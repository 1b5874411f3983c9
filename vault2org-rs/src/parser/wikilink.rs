//! Wikilink parsing and rewriting to Org-roam `id:` links.

use crate::types::LinkReference;
use regex::{Captures, Regex};
use std::sync::LazyLock;

// Wikilink pattern: [[target]] or [[target|alias]]
// ([^\]|]+)        - Target (group 1), stops at ] or |
// (?:\|([^\]]+))?  - Alias (group 2)
static WIKILINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]").unwrap());

/// Parse all wikilinks from content, in order of appearance.
pub fn parse_links(content: &str) -> Vec<LinkReference> {
    WIKILINK
        .captures_iter(content)
        .map(|cap| link_from_captures(&cap))
        .collect()
}

/// Rewrite every `[[target]]` / `[[target|alias]]` into `[[id:<slug>][<display>]]`.
///
/// This is one left-to-right substitution pass, so identical targets with
/// different aliases are each rewritten from their own match.
pub fn rewrite_links(content: &str) -> String {
    WIKILINK
        .replace_all(content, |cap: &Captures<'_>| {
            format_org_link(&link_from_captures(cap))
        })
        .into_owned()
}

/// Format a link as an Org-roam id link.
pub fn format_org_link(link: &LinkReference) -> String {
    format!("[[id:{}][{}]]", link.id(), link.display_text())
}

fn link_from_captures(cap: &Captures<'_>) -> LinkReference {
    LinkReference {
        target: cap[1].to_string(),
        alias: cap.get(2).map(|m| m.as_str().to_string()),
    }
}
