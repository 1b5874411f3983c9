//! Vault traversal.

use crate::config::Config;
use crate::error::{ConvertError, Result};
use crate::types::ConversionJob;
use glob::{glob_with, MatchOptions, Pattern};
use std::path::{Path, PathBuf};

/// Result of walking a vault.
#[derive(Debug, Clone, Default)]
pub struct VaultListing {
    /// Note paths relative to the vault root, sorted.
    pub notes: Vec<PathBuf>,
    /// Paths that could not be read during the walk, with the reason.
    pub unreadable: Vec<(PathBuf, String)>,
}

/// An Obsidian vault used as conversion input.
#[derive(Debug, Clone)]
pub struct Vault {
    /// Root path of the vault.
    pub root: PathBuf,
    extensions: Vec<String>,
    skip_hidden: bool,
}

impl Vault {
    /// Open a vault with the default settings: `md` / `markdown` extensions,
    /// hidden entries included.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.is_dir() {
            return Err(ConvertError::InputNotFound(root));
        }

        let defaults = Config::default();
        Ok(Self {
            root,
            extensions: defaults.normalized_extensions(),
            skip_hidden: defaults.skip_hidden,
        })
    }

    /// Open a vault using the extension and hidden-file settings of `config`.
    pub fn from_config(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        Ok(Self::new(root)?
            .with_extensions(config.normalized_extensions())
            .with_skip_hidden(config.skip_hidden))
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_skip_hidden(mut self, skip_hidden: bool) -> Self {
        self.skip_hidden = skip_hidden;
        self
    }

    /// Whether `path` has one of the recognized source extensions.
    pub fn is_note_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_lowercase();
                self.extensions.iter().any(|ext| *ext == e)
            })
            .unwrap_or(false)
    }

    fn is_hidden(relative: &Path) -> bool {
        relative
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
    }

    /// Recursively list every note under the root.
    ///
    /// Extensions match case-insensitively. Directories and other files are
    /// skipped silently; unreadable entries are reported in the listing.
    pub fn list_notes(&self) -> Result<VaultListing> {
        let options = MatchOptions {
            case_sensitive: false,
            require_literal_separator: false,
            require_literal_leading_dot: false,
        };
        let root = Pattern::escape(&self.root.to_string_lossy());

        let mut listing = VaultListing::default();

        for ext in &self.extensions {
            let pattern = Path::new(&root).join(format!("**/*.{}", Pattern::escape(ext)));

            for entry in glob_with(&pattern.to_string_lossy(), options)? {
                match entry {
                    Ok(path) => {
                        if !path.is_file() || !self.is_note_file(&path) {
                            continue;
                        }
                        if let Ok(relative) = path.strip_prefix(&self.root) {
                            if self.skip_hidden && Self::is_hidden(relative) {
                                continue;
                            }
                            listing.notes.push(relative.to_path_buf());
                        }
                    }
                    Err(e) => {
                        let path = e.path().to_path_buf();
                        if self.skip_hidden {
                            if let Ok(relative) = path.strip_prefix(&self.root) {
                                if Self::is_hidden(relative) {
                                    continue;
                                }
                            }
                        }
                        listing.unreadable.push((path, e.error().to_string()));
                    }
                }
            }
        }

        listing.notes.sort();
        listing.notes.dedup();
        listing.unreadable.sort();
        listing.unreadable.dedup();

        Ok(listing)
    }

    /// One conversion job per note, sorted by relative path.
    pub fn jobs(&self, listing: &VaultListing) -> Vec<ConversionJob> {
        listing
            .notes
            .iter()
            .map(|relative| ConversionJob::new(&self.root, relative))
            .collect()
    }
}
