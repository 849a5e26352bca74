//! Error types for the property audit.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for audit operations.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors that abort an audit run.
///
/// Findings (missing or undocumented keys) are never errors; they are the
/// report's content. Errors are reserved for conditions where no trustworthy
/// report can be produced at all.
#[derive(Error, Debug)]
pub enum AuditError {
    /// A manual exclusion list file does not exist.
    #[error("exclusion list not found: {path}")]
    ExclusionFileNotFound {
        /// Path that was supposed to hold the list.
        path: PathBuf,
    },

    /// A file could not be read, either an exclusion list or a scanned file.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A default-value rule line has no `=` separator.
    #[error("malformed default-value rule at {path}:{line}: `{text}` (expected `key=value`)")]
    MalformedDefaultRule {
        /// File the rule was read from.
        path: PathBuf,
        /// 1-based line number of the offending rule.
        line: usize,
        /// The offending line, trimmed.
        text: String,
    },

    /// An include glob or gitignore-style exclusion pattern failed to compile.
    #[error("invalid file pattern `{pattern}`: {details}")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// Compiler diagnostic.
        details: String,
    },

    /// A search regex failed to compile.
    #[error("invalid search regex `{pattern}`: {source}")]
    InvalidRegex {
        /// The regex as written.
        pattern: String,
        /// Underlying regex failure.
        #[source]
        source: regex::Error,
    },

    /// A search regex has no `key` named capture group.
    #[error("search regex `{pattern}` has no `key` capture group")]
    MissingKeyGroup {
        /// The regex as written.
        pattern: String,
    },

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Report serialization failed.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}
