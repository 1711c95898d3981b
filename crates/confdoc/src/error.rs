//! Error types for settings document generation.

use std::path::PathBuf;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocsError>;

/// Errors that abort a settings document build.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Persist {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse registry {path}: {message}")]
    RegistryParse { path: PathBuf, message: String },

    #[error("unsupported registry format for {path} (expected .yaml, .yml or .json)")]
    UnsupportedRegistry { path: PathBuf },

    #[error("cannot retrieve source of '{routine}' (default of setting '{setting}'): {reason}")]
    SourceUnavailable {
        setting: String,
        routine: String,
        reason: String,
    },

    #[error("template rendering failed: {0}")]
    Rendering(String),
}
