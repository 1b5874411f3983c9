//! Org-roam file header synthesis.

use crate::org::properties::{PROPERTIES_CLOSE, PROPERTIES_OPEN};
use crate::types::{Alias, Frontmatter};

/// Startup directive enabling inline LaTeX previews.
pub const MATH_STARTUP: &str = "#+STARTUP: latexpreview";

/// The header written at the top of every generated file.
///
/// Rendered layout:
///
/// ```text
/// :PROPERTIES:
/// :ID:    <id>
/// :ROAM_ALIASES: <aliases>
/// :END:
/// #+STARTUP: latexpreview
/// #+filetags: :a:b:
/// #+title: <title>
/// ```
///
/// The startup and filetags lines sit directly under the drawer and are
/// optional; the title line always comes last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgHeader {
    pub id: String,
    /// Rendered `ROAM_ALIASES` value, empty when there are none.
    pub aliases: String,
    pub filetags: Option<String>,
    pub math: bool,
    pub title: String,
}

impl OrgHeader {
    /// Build the header for a note.
    pub fn from_frontmatter(frontmatter: &Frontmatter, math: bool) -> Self {
        Self {
            id: node_id(&frontmatter.title),
            aliases: frontmatter
                .usable_aliases()
                .map(|aliases| format_aliases(&aliases))
                .unwrap_or_default(),
            filetags: frontmatter.usable_tags().map(|tags| format_filetags(&tags)),
            math,
            title: frontmatter.title.clone(),
        }
    }

    /// The property drawer alone, including its trailing newline.
    pub fn property_block(&self) -> String {
        format!(
            "{}\n:ID:    {}\n:ROAM_ALIASES: {}\n{}\n",
            PROPERTIES_OPEN, self.id, self.aliases, PROPERTIES_CLOSE
        )
    }

    /// The `#+title:` directive, including its trailing newline.
    pub fn title_line(&self) -> String {
        format!("#+title: {}\n", self.title)
    }

    /// Render the full header.
    pub fn render(&self) -> String {
        let mut header = self.property_block();
        if self.math {
            header.push_str(MATH_STARTUP);
            header.push('\n');
        }
        if let Some(ref tags) = self.filetags {
            header.push_str(tags);
            header.push('\n');
        }
        header.push_str(&self.title_line());
        header
    }
}

/// Org-roam node id for a title: lowercased, spaces as hyphens, a trailing
/// `.md` dropped.
pub fn node_id(title: &str) -> String {
    let slug = title.to_lowercase().replace(' ', "-");
    match slug.strip_suffix(".md") {
        Some(stripped) => stripped.to_string(),
        None => slug,
    }
}

/// Render one alias for `ROAM_ALIASES`.
///
/// Mappings become comma-joined `"key: value"` strings, strings with a space
/// are double-quoted, everything else is left bare.
pub fn format_alias(alias: &Alias) -> String {
    match alias {
        Alias::Pairs(pairs) => pairs
            .iter()
            .map(|(key, value)| format!("\"{}: {}\"", key, value))
            .collect::<Vec<_>>()
            .join(", "),
        Alias::Text(text) if text.contains(' ') => format!("\"{}\"", text),
        Alias::Text(text) => text.clone(),
    }
}

/// Render the full `ROAM_ALIASES` value.
pub fn format_aliases(aliases: &[&Alias]) -> String {
    aliases
        .iter()
        .map(|alias| format_alias(alias))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render a `#+filetags:` directive.
pub fn format_filetags(tags: &[&String]) -> String {
    let joined = tags
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(":");
    format!("#+filetags: :{}:", joined)
}
