//! vault2org - Convert an Obsidian-style vault into Org-roam files.
//!
//! # Overview
//!
//! Every Markdown note with a `title` / `created` frontmatter block becomes
//! one `.org` file directly under the output folder:
//! - File name `<created:YYYYMMDDHHMMSS>-<slugified name>.org`
//! - A property drawer with `ID` and `ROAM_ALIASES`, plus `#+title:`,
//!   optional `#+filetags:` and `#+STARTUP: latexpreview`
//! - Body converted to Org by an external tool (pandoc)
//! - `[[Note]]` / `[[Note|alias]]` rewritten to `[[id:note][...]]`
//!
//! Notes are processed in parallel; a failing note is reported and skipped
//! without affecting the rest of the batch.
//!
//! # Example
//!
//! ```no_run
//! use vault2org::cli::{args::OutputFormat, Output};
//! use vault2org::convert::PandocConverter;
//! use vault2org::pipeline::{ConvertOptions, Orchestrator};
//! use vault2org::Vault;
//!
//! let vault = Vault::new("/path/to/vault").unwrap();
//! let output = Output::new(OutputFormat::Json, false, false);
//! let converter = PandocConverter::default();
//! let options = ConvertOptions { jobs: 4, ..ConvertOptions::new("/path/to/org") };
//!
//! let report = Orchestrator::new(&converter, options, &output).run(&vault).unwrap();
//! for failed in &report.failed {
//!     println!("{}: {}", failed.source.display(), failed.reason);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod convert;
pub mod error;
pub mod note;
pub mod org;
pub mod parser;
pub mod pipeline;
pub mod types;
pub mod vault;

// Re-export main types at crate root
pub use config::Config;
pub use error::{ConvertError, Result};
pub use note::{SourceDocument, TargetDocument};
pub use pipeline::{ConvertOptions, Orchestrator};
pub use types::*;
pub use vault::Vault;
