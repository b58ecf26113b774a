//! Domain-specific error types for git-file-state.
//!
//! This module defines [`GitStateError`], the single error type returned by fallible
//! operations in the crate. It uses `thiserror` for ergonomic error definitions and
//! includes constructor helpers for variants that carry a payload.
//!
//! # Public API
//! - [`GitStateError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, GitStateError>`
//!
//! # Error Categories
//! - **History lookups**: indexed access outside the stored history
//! - **Conversions**: unrecognized names for status dimensions
//! - **Git provider**: repository not found, git2 library errors, paths outside the work tree
//! - **Configuration**: unreadable or malformed config files
//!
//! Absence (no history entry, no lock owner, no branch descriptor) is modelled with
//! `Option` and stale refreshes with [`crate::core::state::RefreshOutcome`]; neither is
//! an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitStateError {
    // History errors
    #[error("History position {position} is out of range ({size} entries available)")]
    HistoryOutOfRange { position: usize, size: usize },

    // Conversion errors
    #[error("Unknown {kind} value: '{value}'")]
    InvalidVariant { kind: &'static str, value: String },

    // Git provider errors
    #[error("Not in a git repository")]
    NotInGitRepo,

    #[error("Git repository error: {0}")]
    GitRepo(#[from] git2::Error),

    #[error("Path is outside the repository work tree: {path}")]
    PathOutsideRepo { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using GitStateError
pub type Result<T> = std::result::Result<T, GitStateError>;

impl GitStateError {
    /// Create a history out of range error
    pub fn history_out_of_range(position: usize, size: usize) -> Self {
        Self::HistoryOutOfRange { position, size }
    }

    /// Create an invalid variant error for the named status dimension
    pub fn invalid_variant(kind: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidVariant {
            kind,
            value: value.into(),
        }
    }

    /// Create a path outside repository error
    pub fn path_outside_repo(path: impl Into<PathBuf>) -> Self {
        Self::PathOutsideRepo { path: path.into() }
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GitStateError::NotInGitRepo;
        assert_eq!(err.to_string(), "Not in a git repository");
    }

    #[test]
    fn test_history_out_of_range_error() {
        let err = GitStateError::history_out_of_range(5, 3);
        assert_eq!(
            err.to_string(),
            "History position 5 is out of range (3 entries available)"
        );
    }

    #[test]
    fn test_invalid_variant_error() {
        let err = GitStateError::invalid_variant("lock state", "sideways");
        assert_eq!(err.to_string(), "Unknown lock state value: 'sideways'");
    }

    #[test]
    fn test_path_outside_repo_error() {
        let err = GitStateError::path_outside_repo("/elsewhere/file.uasset");
        assert!(err.to_string().contains("/elsewhere/file.uasset"));
    }

    #[test]
    fn test_config_read_failed() {
        let path = std::path::PathBuf::from("/test/config.json");
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = GitStateError::config_read_failed(&path, io_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_config_parse_failed() {
        let path = std::path::PathBuf::from("/test/config.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = GitStateError::config_parse_failed(&path, json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
