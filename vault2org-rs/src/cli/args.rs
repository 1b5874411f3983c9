//! CLI argument definitions using clap.

use crate::config::{Config, ConverterKind};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vault2org")]
#[command(author, version, about = "Convert an Obsidian vault to Org-roam compatible org files", long_about = None)]
pub struct Cli {
    /// Your Obsidian vault (remember to back it up)
    pub input: PathBuf,

    /// Folder the org files are written to
    pub output: PathBuf,

    /// Add `#+STARTUP: latexpreview` to the header of every file
    #[arg(long)]
    pub math: bool,

    /// Number of worker threads (defaults to available parallelism)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Path to a config file (defaults to <config dir>/vault2org/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip files and folders whose name starts with a dot (e.g. `.obsidian`, `.trash`).
    /// Hidden notes are converted by default
    #[arg(long)]
    pub skip_hidden: bool,

    /// Body converter to use
    #[arg(long, value_enum)]
    pub converter: Option<ConverterKind>,

    /// Pandoc executable
    #[arg(long, value_name = "PROGRAM")]
    pub pandoc: Option<String>,

    /// Run the conversion without writing any files
    #[arg(long)]
    pub dry_run: bool,

    /// Output the report as JSON (default)
    #[arg(long, conflicts_with_all = ["yaml", "toml"])]
    pub json: bool,

    /// Output the report as YAML
    #[arg(long, conflicts_with_all = ["json", "toml"])]
    pub yaml: bool,

    /// Output the report as TOML
    #[arg(long, conflicts_with_all = ["json", "yaml"])]
    pub toml: bool,

    /// Suppress non-essential output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.yaml {
            OutputFormat::Yaml
        } else if self.toml {
            OutputFormat::Toml
        } else {
            OutputFormat::Json
        }
    }

    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_to(&self, config: &mut Config) {
        if self.math {
            config.math = true;
        }
        if self.skip_hidden {
            config.skip_hidden = true;
        }
        if let Some(jobs) = self.jobs {
            config.jobs = Some(jobs);
        }
        if let Some(converter) = self.converter {
            config.converter = converter;
        }
        if let Some(ref program) = self.pandoc {
            config.pandoc.program = program.clone();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_and_math() {
        let cli = Cli::try_parse_from(["vault2org", "vault", "out", "--math"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("vault"));
        assert_eq!(cli.output, PathBuf::from("out"));
        assert!(cli.math);
        assert_eq!(cli.output_format(), OutputFormat::Json);
    }

    #[test]
    fn test_missing_output_rejected() {
        assert!(Cli::try_parse_from(["vault2org", "vault"]).is_err());
    }

    #[test]
    fn test_format_flags_conflict() {
        assert!(Cli::try_parse_from(["vault2org", "v", "o", "--json", "--yaml"]).is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "vault2org",
            "v",
            "o",
            "--jobs",
            "2",
            "--converter",
            "passthrough",
            "--pandoc",
            "/opt/pandoc",
            "--skip-hidden",
        ])
        .unwrap();

        let mut config = Config::default();
        cli.apply_to(&mut config);
        assert_eq!(config.jobs, Some(2));
        assert_eq!(config.converter, ConverterKind::Passthrough);
        assert_eq!(config.pandoc.program, "/opt/pandoc");
        assert!(config.skip_hidden);
        assert!(!config.math);
    }
}
