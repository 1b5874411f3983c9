//! Shared types for vault2org.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Typed view of a note's YAML frontmatter.
///
/// Only `title` and `created` are required. Unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub created: NaiveDateTime,
    /// `None` when the key is absent. Entries are `None` for YAML nulls.
    pub aliases: Option<Vec<Option<Alias>>>,
    /// `None` when the key is absent. Entries are `None` for YAML nulls.
    pub tags: Option<Vec<Option<String>>>,
}

impl Frontmatter {
    /// Aliases to render, if the list is present, non-empty and null-free.
    pub fn usable_aliases(&self) -> Option<Vec<&Alias>> {
        usable(self.aliases.as_deref())
    }

    /// Tags to render, if the list is present, non-empty and null-free.
    pub fn usable_tags(&self) -> Option<Vec<&String>> {
        usable(self.tags.as_deref())
    }
}

/// The single presence predicate shared by aliases and tags.
fn usable<T>(entries: Option<&[Option<T>]>) -> Option<Vec<&T>> {
    let entries = entries?;
    if entries.is_empty() {
        return None;
    }
    entries.iter().map(Option::as_ref).collect()
}

/// A single entry of the `aliases` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alias {
    /// A plain alias string.
    Text(String),
    /// A mapping alias; key order is preserved from the source.
    Pairs(Vec<(String, String)>),
}

/// A `[[target]]` or `[[target|alias]]` cross-reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkReference {
    /// Text inside the brackets, before any `|`.
    pub target: String,

    /// Optional display alias (the part after `|`).
    pub alias: Option<String>,
}

impl LinkReference {
    /// Returns the display text for this link.
    pub fn display_text(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.target)
    }

    /// Org-roam node id this link points at.
    pub fn id(&self) -> String {
        self.target.to_lowercase().replace(' ', "-")
    }
}

/// One document queued for conversion.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ConversionJob {
    /// Path relative to the input root.
    pub relative_path: PathBuf,
    /// Absolute (or root-joined) path on disk.
    pub source_path: PathBuf,
}

impl ConversionJob {
    pub fn new(root: &Path, relative_path: impl Into<PathBuf>) -> Self {
        let relative_path = relative_path.into();
        Self {
            source_path: root.join(&relative_path),
            relative_path,
        }
    }
}

/// A document that was written (or would be, on a dry run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedNote {
    pub source: PathBuf,
    pub target: PathBuf,
}

/// A document that failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedNote {
    pub source: PathBuf,
    pub kind: String,
    pub reason: String,
}

/// Aggregate result of converting a whole vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub dry_run: bool,
    pub converted: Vec<ConvertedNote>,
    pub failed: Vec<FailedNote>,
}

impl BatchReport {
    /// True when no document failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Total number of documents attempted.
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }

    pub(crate) fn sort(&mut self) {
        self.converted.sort_by(|a, b| a.source.cmp(&b.source));
        self.failed.sort_by(|a, b| a.source.cmp(&b.source));
    }
}
