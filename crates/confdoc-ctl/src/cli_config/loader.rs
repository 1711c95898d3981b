//! Config file discovery and loading for `.confdoc.toml`.
//!
//! An explicit `--config` path is read strictly. Otherwise two locations are
//! checked in precedence order and problems fall back to defaults:
//! 1. `./.confdoc.toml` (project-local)
//! 2. `~/.config/confdoc.toml` (user-global)

use std::path::{Path, PathBuf};

use super::CliConfig;
use crate::error::{CtlError, CtlResult};

pub(crate) const CONFIG_FILENAME: &str = ".confdoc.toml";
const GLOBAL_CONFIG_DIR: &str = ".config";
const GLOBAL_CONFIG_FILENAME: &str = "confdoc.toml";

/// Load the CLI config from `explicit`, or from the first discovered location.
pub(crate) fn load_cli_config(explicit: Option<&Path>) -> CtlResult<CliConfig> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    if let Some(path) = find_config_file() {
        match read_config(&path) {
            Ok(config) => {
                tracing::debug!(?path, "Loaded CLI config");
                return Ok(config);
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "Ignoring CLI config, using defaults");
            }
        }
    }
    Ok(CliConfig::default())
}

fn read_config(path: &Path) -> CtlResult<CliConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| CtlError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&contents).map_err(|e| CtlError::Config {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Search for a config file in precedence order.
fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILENAME);
    if local.is_file() {
        return Some(local);
    }

    let global = home_dir()?
        .join(GLOBAL_CONFIG_DIR)
        .join(GLOBAL_CONFIG_FILENAME);
    global.is_file().then_some(global)
}

/// Expand a configured path, resolving `~` to the home directory.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
