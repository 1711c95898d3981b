//! CLI configuration: where the registry export lives, where the reference is
//! written, and the preamble values for the project being documented.

pub(crate) mod loader;

pub(crate) use loader::{expand_path, load_cli_config};

use confdoc::Preamble;
use serde::Deserialize;

/// Contents of `.confdoc.toml`. Command-line flags override every field.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub(crate) struct CliConfig {
    /// Registry export (YAML or JSON) listing the setting descriptors.
    pub registry: Option<String>,

    /// Documentation source directory receiving the generated reference.
    pub srcdir: Option<String>,

    /// Generated file name inside `srcdir` (default `settings.rst`).
    pub output: Option<String>,

    /// Language tag for code blocks of computed defaults (default `python`).
    pub code_language: Option<String>,

    /// Overrides for the reference's introductory text.
    #[serde(default)]
    pub preamble: Preamble,
}
