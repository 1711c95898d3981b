//! Error type for `confdoc-ctl` commands.

use std::path::PathBuf;

use confdoc::DocsError;

pub(crate) type CtlResult<T> = Result<T, CtlError>;

#[derive(Debug, thiserror::Error)]
pub(crate) enum CtlError {
    #[error(transparent)]
    Docs(#[from] DocsError),

    #[error("no registry export given (pass --registry or set `registry` in .confdoc.toml)")]
    MissingRegistry,

    #[error("{path} is out of date; run `confdoc-ctl generate` to refresh it")]
    Stale { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },

    #[error("template rendering failed: {0}")]
    Template(#[from] askama::Error),
}
