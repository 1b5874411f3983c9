//! Error types and exit codes for vault2org.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const INPUT_NOT_FOUND: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOCUMENTS_FAILED: i32 = 4;
}

/// Main error type for vault2org operations.
///
/// Variants carrying a `path` are per-document failures: the orchestrator
/// records them in the batch report and keeps going.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("No frontmatter block found in {path}")]
    MissingFrontmatter { path: PathBuf },

    #[error("Malformed frontmatter in {path}: {message}")]
    MalformedMetadata { path: PathBuf, message: String },

    #[error("Missing required frontmatter field '{field}' in {path}")]
    MissingRequiredField { path: PathBuf, field: &'static str },

    #[error("Body conversion failed for {path}: {message}")]
    Conversion { path: PathBuf, message: String },

    #[error("File system error on {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Output name collision for {path}: {target} is already produced by {claimed_by}")]
    OutputCollision {
        path: PathBuf,
        target: PathBuf,
        claimed_by: PathBuf,
    },

    #[error("Worker panicked while converting {path}: {message}")]
    TaskPanicked { path: PathBuf, message: String },

    #[error("Input vault not found at: {0}")]
    InputNotFound(PathBuf),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl ConvertError {
    /// Build a `FileSystem` error for `path`.
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConvertError::FileSystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConvertError::InputNotFound(_) => exit_code::INPUT_NOT_FOUND,
            ConvertError::ConfigError(_) | ConvertError::TomlParse(_) => exit_code::CONFIG_ERROR,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// Short machine-readable name of the failure, used in batch reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::MissingFrontmatter { .. } => "missing_frontmatter",
            ConvertError::MalformedMetadata { .. } => "malformed_metadata",
            ConvertError::MissingRequiredField { .. } => "missing_required_field",
            ConvertError::Conversion { .. } => "conversion",
            ConvertError::FileSystem { .. } => "file_system",
            ConvertError::OutputCollision { .. } => "output_collision",
            ConvertError::TaskPanicked { .. } => "task_panicked",
            ConvertError::InputNotFound(_) => "input_not_found",
            ConvertError::ConfigError(_)
            | ConvertError::TomlParse(_)
            | ConvertError::TomlSerialize(_) => "config",
            _ => "other",
        }
    }
}

/// Result type alias for vault2org operations.
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    InputNotFound,
    ConfigError,
    DocumentsFailed,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::InputNotFound => exit_code::INPUT_NOT_FOUND,
            ExitCode::ConfigError => exit_code::CONFIG_ERROR,
            ExitCode::DocumentsFailed => exit_code::DOCUMENTS_FAILED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(
            ConvertError::InputNotFound(PathBuf::from("vault")).exit_code(),
            exit_code::INPUT_NOT_FOUND
        );
        assert_eq!(
            ConvertError::ConfigError("bad".to_string()).exit_code(),
            exit_code::CONFIG_ERROR
        );
        assert_eq!(
            ConvertError::MissingFrontmatter {
                path: PathBuf::from("a.md")
            }
            .exit_code(),
            exit_code::GENERAL_ERROR
        );
        assert_eq!(ExitCode::DocumentsFailed.code(), 4);
    }

    #[test]
    fn test_message_names_path_and_field() {
        let err = ConvertError::MissingRequiredField {
            path: PathBuf::from("notes/a.md"),
            field: "created",
        };
        let message = err.to_string();
        assert!(message.contains("notes/a.md"));
        assert!(message.contains("created"));
        assert_eq!(err.kind(), "missing_required_field");
    }
}
