//! Error types and exit codes for chatsort.

use std::path::PathBuf;
use thiserror::Error;

/// Process exit codes used by the CLI.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const DOCUMENT_NOT_FOUND: i32 = 2;
    pub const INVALID_FRONTMATTER: i32 = 5;
    pub const WRITE_BACK_FAILED: i32 = 6;
}

/// Main error type for archive and engine operations.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("Document not found: {0}")]
    DocumentNotFound(PathBuf),

    #[error("Archive not found at: {0}")]
    ArchiveNotFound(PathBuf),

    #[error("Invalid frontmatter in {path}: {message}")]
    InvalidFrontmatter { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Failed to write tags to {path}: {message}")]
    WriteBack { path: PathBuf, message: String },

    #[error("Failed to load content of {path}: {message}")]
    ContentLoad { path: PathBuf, message: String },

    #[error("Settings store error: {0}")]
    Settings(String),

    #[error("Tag editor for {0} is not open")]
    EditorClosed(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("{0}")]
    Other(String),
}

impl ArchiveError {
    /// Returns the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ArchiveError::DocumentNotFound(_) => exit_code::DOCUMENT_NOT_FOUND,
            ArchiveError::InvalidFrontmatter { .. } => exit_code::INVALID_FRONTMATTER,
            ArchiveError::WriteBack { .. } => exit_code::WRITE_BACK_FAILED,
            _ => exit_code::GENERAL_ERROR,
        }
    }

    /// I/O failures against the document store that the user may simply retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ArchiveError::WriteBack { .. } | ArchiveError::ContentLoad { .. }
        )
    }
}

/// Result type alias for chatsort operations.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    GeneralError,
    DocumentNotFound,
    InvalidFrontmatter,
    WriteBackFailed,
}

impl ExitCode {
    /// Convert to exit code integer.
    pub fn code(self) -> i32 {
        match self {
            ExitCode::Success => exit_code::SUCCESS,
            ExitCode::GeneralError => exit_code::GENERAL_ERROR,
            ExitCode::DocumentNotFound => exit_code::DOCUMENT_NOT_FOUND,
            ExitCode::InvalidFrontmatter => exit_code::INVALID_FRONTMATTER,
            ExitCode::WriteBackFailed => exit_code::WRITE_BACK_FAILED,
        }
    }
}
