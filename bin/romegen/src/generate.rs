//! ---
//! rome_section: "05-command-line"
//! rome_subsection: "binary"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "The generate subcommand: render and write the header."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use rome_codegen::Generator;
use rome_common::{log_build_event, BuildEventOutcome, LogContext};
use rome_config::GeneratorConfig;
use rome_schema::is_c_identifier;
use tempfile::NamedTempFile;

use crate::pipeline::compile_schema;

#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Schema file, or a schema name looked up in the configured search paths.
    #[arg(value_name = "SCHEMA")]
    schema: Option<String>,

    /// Header to write; stdout when omitted and not configured.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Include guard macro.
    #[arg(long = "guard", value_name = "NAME")]
    guard: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    Unchanged,
}

pub fn run(command: GenerateCommand, config: &GeneratorConfig) -> Result<()> {
    let guard = command.guard.or_else(|| config.output.include_guard.clone());
    if let Some(guard) = &guard {
        if !is_c_identifier(guard) {
            bail!("include guard '{guard}' is not a valid C identifier");
        }
    }

    let compiled = compile_schema(command.schema.as_deref(), config)?;
    let generator = Generator::new(config.naming.clone())?;
    // Rendered in full before anything touches the destination.
    let header = generator.header(&compiled, guard.as_deref())?;

    let context = LogContext::new().with_schema(&compiled.source_name);
    match command.output.or_else(|| config.output.path.clone()) {
        Some(path) => {
            let outcome = write_if_changed(&path, &header)?;
            let message = match outcome {
                WriteOutcome::Written => format!("header written to {}", path.display()),
                WriteOutcome::Unchanged => format!("{} already up to date", path.display()),
            };
            log_build_event(
                Some(&context),
                "header.generated",
                &message,
                BuildEventOutcome::Success,
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(header.as_bytes())
                .context("unable to write header to stdout")?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Replace `path` with `contents` atomically, leaving it untouched when it
/// already holds exactly those bytes.
pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome> {
    if let Ok(existing) = fs::read(path) {
        if existing == contents.as_bytes() {
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("unable to create directory {}", parent.display()))?;

    let mut staged = NamedTempFile::new_in(parent)
        .with_context(|| format!("unable to stage header in {}", parent.display()))?;
    staged
        .write_all(contents.as_bytes())
        .with_context(|| format!("unable to stage header in {}", parent.display()))?;
    staged
        .persist(path)
        .with_context(|| format!("unable to replace {}", path.display()))?;
    Ok(WriteOutcome::Written)
}
