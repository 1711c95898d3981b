//! Command handlers for `confdoc-ctl`.

pub(crate) mod expand;
pub(crate) mod generate;
pub(crate) mod init;
pub(crate) mod sections;

pub(crate) use expand::handle_expand_command;
pub(crate) use generate::handle_generate_command;
pub(crate) use init::handle_init_command;
pub(crate) use sections::handle_sections_command;

use std::path::PathBuf;

use confdoc::Registry;

use crate::cli_config::{expand_path, CliConfig};
use crate::error::{CtlError, CtlResult};

/// Load the registry named on the command line, falling back to the config.
fn load_registry(flag: Option<PathBuf>, config: &CliConfig) -> CtlResult<Registry> {
    let path = flag
        .or_else(|| config.registry.as_deref().map(expand_path))
        .ok_or(CtlError::MissingRegistry)?;
    Ok(Registry::load(&path)?)
}
