//! ---
//! rome_section: "05-command-line"
//! rome_subsection: "binary"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Command-line front-end for the ROME header generator."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use rome_common::{init_tracing, log_build_event, BuildEventOutcome, VersionInfo};
use rome_config::GeneratorConfig;
use tracing::debug;

mod check;
mod generate;
mod pipeline;
mod types;

#[derive(Debug, Parser)]
#[command(
    name = "romegen",
    author,
    disable_version_flag = true,
    about = "Generate the ROME message header from a schema",
    long_about = None
)]
struct Cli {
    #[arg(
        short = 'V',
        long = "version",
        action = ArgAction::SetTrue,
        help = "Print extended version information and exit"
    )]
    version: bool,
    /// Configuration file (defaults to ROMEGEN_CONFIG, then ./romegen.toml).
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render the full header.
    Generate(generate::GenerateCommand),
    /// Validate a schema and print its layout.
    Check(check::CheckCommand),
    /// List the supported parameter types.
    Types,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if cli.version {
        println!("{}", VersionInfo::current().extended());
        return Ok(());
    }
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let loaded = GeneratorConfig::load_with_source(cli.config.as_deref())?;
    let _guard = init_tracing("romegen", &loaded.config.logging)?;
    debug!(config = ?loaded.source, "configuration resolved");

    let result = match command {
        Commands::Generate(cmd) => generate::run(cmd, &loaded.config),
        Commands::Check(cmd) => check::run(cmd, &loaded.config),
        Commands::Types => types::run(),
    };
    if let Err(err) = &result {
        log_build_event(None, "romegen.failed", &format!("{err:#}"), BuildEventOutcome::Fault);
    }
    result
}
