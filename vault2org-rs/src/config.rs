//! Configuration loaded from `config.toml`.

use crate::error::{ConvertError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which body converter to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    /// Convert Markdown bodies to Org with pandoc.
    #[default]
    Pandoc,
    /// Copy bodies through unchanged.
    Passthrough,
}

/// Settings for the pandoc converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PandocConfig {
    /// Program to execute.
    pub program: String,
    /// Extra arguments appended after the built-in ones.
    pub extra_args: Vec<String>,
}

impl Default for PandocConfig {
    fn default() -> Self {
        Self {
            program: "pandoc".to_string(),
            extra_args: Vec::new(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Worker threads. `None` uses the available hardware parallelism.
    pub jobs: Option<usize>,
    /// Add `#+STARTUP: latexpreview` to every file.
    pub math: bool,
    /// Source extensions, matched case-insensitively, without the dot.
    pub extensions: Vec<String>,
    /// Skip files and directories whose name starts with a dot.
    pub skip_hidden: bool,
    pub converter: ConverterKind,
    pub pandoc: PandocConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            jobs: None,
            math: false,
            extensions: vec!["md".to_string(), "markdown".to_string()],
            skip_hidden: false,
            converter: ConverterKind::default(),
            pandoc: PandocConfig::default(),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/vault2org/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("vault2org").join("config.toml"))
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from_path(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load and validate a config file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConvertError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the pipeline can't run with.
    pub fn validate(&self) -> Result<()> {
        if self.jobs == Some(0) {
            return Err(ConvertError::ConfigError("jobs must be at least 1".to_string()));
        }
        if self.extensions.is_empty() {
            return Err(ConvertError::ConfigError(
                "at least one source extension is required".to_string(),
            ));
        }
        if self.pandoc.program.trim().is_empty() {
            return Err(ConvertError::ConfigError("pandoc.program is empty".to_string()));
        }
        Ok(())
    }

    /// Worker count to use, resolved once.
    pub fn worker_count(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Extensions normalized for comparison: lowercase, no leading dot.
    pub fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_lowercase())
            .collect()
    }
}
