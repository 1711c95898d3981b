//! `confdoc-ctl generate`: run the settings extension inside a local host.

use std::path::PathBuf;

use confdoc::{
    BuildContext, BuildEvent, SettingFormatter, SettingsDocument, SettingsExtension,
    format::DEFAULT_CODE_LANGUAGE,
};

use super::load_registry;
use crate::cli_config::{expand_path, CliConfig};
use crate::error::{CtlError, CtlResult};
use crate::host::LocalHost;
use crate::output;
use crate::GenerateArgs;

pub(crate) fn handle_generate_command(args: GenerateArgs, config: &CliConfig) -> CtlResult<()> {
    let registry = load_registry(args.registry, config)?;
    let setting_count = registry.len();

    let srcdir = args
        .srcdir
        .or_else(|| config.srcdir.as_deref().map(expand_path))
        .unwrap_or_else(|| PathBuf::from("."));
    let code_language = config
        .code_language
        .as_deref()
        .unwrap_or(DEFAULT_CODE_LANGUAGE);

    let document = SettingsDocument::new(
        config.preamble.clone(),
        SettingFormatter::new(code_language),
    );
    let mut extension = SettingsExtension::new(registry, document);
    if let Some(name) = args.output.or_else(|| config.output.clone()) {
        extension = extension.with_output_name(name);
    }

    let ctx = BuildContext::new(&srcdir);
    let path = extension.output_path(&srcdir);

    if args.check {
        if extension.check(&ctx)? {
            output::success(format!("{} is up to date", path.display()));
            return Ok(());
        }
        output::warning(format!("{} differs from the registry", path.display()));
        return Err(CtlError::Stale { path });
    }

    let mut host = LocalHost::new();
    extension.setup(&mut host);
    host.emit(BuildEvent::BuilderInited, &ctx)?;

    output::success(format!("Wrote {}", path.display()));
    output::label("Settings", setting_count);
    output::label(
        "Roles",
        host.roles().names().collect::<Vec<_>>().join(", "),
    );
    Ok(())
}
