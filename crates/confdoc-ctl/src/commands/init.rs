//! `confdoc-ctl init`: bootstrap a `.confdoc.toml` with the default preamble.

use std::path::Path;

use askama::Template;
use confdoc::{format::DEFAULT_CODE_LANGUAGE, Preamble, SETTINGS_FILENAME};

use crate::cli_config::loader::CONFIG_FILENAME;
use crate::error::{CtlError, CtlResult};
use crate::output;
use crate::InitArgs;

/// Askama template for generating `.confdoc.toml`.
///
/// Every field is an already-quoted TOML string.
#[derive(Template, Debug)]
#[template(path = "init-config.toml", escape = "none")]
struct InitConfigTemplate {
    registry: String,
    srcdir: String,
    output: String,
    code_language: String,
    project: String,
    source_hint: String,
    env_var: String,
    binary: String,
    example_args: String,
    app: String,
    version_added: Option<String>,
}

/// Quote `value` as a TOML string, escaping as needed.
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

fn render_config(args: &InitArgs) -> CtlResult<String> {
    let preamble = Preamble::default();
    let template = InitConfigTemplate {
        registry: toml_string(&args.registry),
        srcdir: toml_string(&args.srcdir),
        output: toml_string(SETTINGS_FILENAME),
        code_language: toml_string(DEFAULT_CODE_LANGUAGE),
        project: toml_string(&preamble.project),
        source_hint: toml_string(&preamble.source_hint),
        env_var: toml_string(&preamble.env_var),
        binary: toml_string(&preamble.binary),
        example_args: toml_string(&preamble.example_args),
        app: toml_string(&preamble.app),
        version_added: preamble.version_added.as_deref().map(toml_string),
    };
    Ok(template.render()?)
}

pub(crate) fn handle_init_command(args: InitArgs) -> CtlResult<()> {
    let config_path = Path::new(CONFIG_FILENAME);

    if config_path.exists() && !args.force {
        output::hint("Remove it first or pass --force to reinitialize.");
        return Err(CtlError::AlreadyExists {
            path: config_path.to_path_buf(),
        });
    }

    let content = render_config(&args)?;
    std::fs::write(config_path, content).map_err(|e| CtlError::Write {
        path: config_path.to_path_buf(),
        source: e,
    })?;

    output::success(format!("Created {CONFIG_FILENAME}"));
    output::hint("Next steps:");
    output::hint("  confdoc-ctl sections     # Check the registry loads");
    output::hint("  confdoc-ctl generate     # Write the settings reference");
    Ok(())
}
