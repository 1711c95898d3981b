//! `confdoc-ctl sections`: list the sections the reference will contain.

use super::load_registry;
use crate::cli_config::CliConfig;
use crate::error::CtlResult;
use crate::output;
use crate::SectionsArgs;

pub(crate) fn handle_sections_command(args: SectionsArgs, config: &CliConfig) -> CtlResult<()> {
    let registry = load_registry(args.registry, config)?;
    let sections = registry.sections();

    output::header("Sections");
    for section in &sections {
        output::section_row(&section.name, section.count);
    }
    output::hint(format!(
        "{} settings in {} sections",
        registry.len(),
        sections.len()
    ));
    Ok(())
}
