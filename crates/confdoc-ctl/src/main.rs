//! `confdoc-ctl`: generate and check settings reference documentation.

mod cli_config;
mod commands;
mod error;
mod host;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "confdoc-ctl",
    version,
    about = "Generate the settings reference from a configuration registry",
    styles = output::clap_styles()
)]
struct Cli {
    /// Log at debug level (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file to use instead of discovering .confdoc.toml
    #[arg(long, global = true, env = "CONFDOC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Write the settings reference into the documentation sources
    Generate(GenerateArgs),
    /// List sections and how many settings each holds
    Sections(SectionsArgs),
    /// Print a reStructuredText file with :issue: and :pr: roles expanded to links
    Expand(ExpandArgs),
    /// Create a starter .confdoc.toml in the current directory
    Init(InitArgs),
}

#[derive(Debug, Args)]
pub(crate) struct GenerateArgs {
    /// Registry export (YAML or JSON)
    #[arg(long)]
    pub registry: Option<PathBuf>,

    /// Documentation source directory
    #[arg(long)]
    pub srcdir: Option<PathBuf>,

    /// Generated file name inside the source directory
    #[arg(long)]
    pub output: Option<String>,

    /// Compare against the existing file instead of writing; fail when stale
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub(crate) struct SectionsArgs {
    /// Registry export (YAML or JSON)
    #[arg(long)]
    pub registry: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub(crate) struct ExpandArgs {
    /// reStructuredText file to expand
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    /// Registry export path to record in the config
    #[arg(long, default_value = "settings.yaml")]
    pub registry: String,

    /// Documentation source directory to record in the config
    #[arg(long, default_value = "docs/source")]
    pub srcdir: String,

    /// Overwrite an existing .confdoc.toml
    #[arg(long)]
    pub force: bool,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = cli_config::load_cli_config(cli.config.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Generate(args) => commands::handle_generate_command(args, &config),
            Commands::Sections(args) => commands::handle_sections_command(args, &config),
            Commands::Expand(args) => commands::handle_expand_command(args),
            Commands::Init(args) => commands::handle_init_command(args),
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&e);
            ExitCode::FAILURE
        }
    }
}
