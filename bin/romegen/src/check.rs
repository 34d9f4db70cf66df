//! ---
//! rome_section: "05-command-line"
//! rome_subsection: "binary"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "The check subcommand: validate a schema and report its layout."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use anyhow::Result;
use clap::Args;
use rome_common::{log_build_event, BuildEventOutcome, LogContext};
use rome_config::GeneratorConfig;
use rome_schema::{CompiledSchema, MessageLayout};

use crate::pipeline::compile_schema;

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Schema file, or a schema name looked up in the configured search paths.
    #[arg(value_name = "SCHEMA")]
    schema: Option<String>,

    /// Print the compiled layout as JSON.
    #[arg(long)]
    json: bool,
}

pub fn run(command: CheckCommand, config: &GeneratorConfig) -> Result<()> {
    let compiled = compile_schema(command.schema.as_deref(), config)?;
    if command.json {
        println!("{}", serde_json::to_string_pretty(&compiled)?);
    } else {
        print!("{}", layout_table(&compiled));
    }
    log_build_event(
        Some(&LogContext::new().with_schema(&compiled.source_name)),
        "schema.checked",
        &format!("{} messages valid", compiled.len()),
        BuildEventOutcome::Success,
    );
    Ok(())
}

fn describe_params(message: &MessageLayout) -> String {
    if message.params.is_empty() {
        return "-".to_owned();
    }
    message
        .params
        .iter()
        .map(|p| format!("{}:{}@{}", p.name, p.ty.short_name(), p.offset))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn layout_table(compiled: &CompiledSchema) -> String {
    let name_width = compiled
        .messages
        .iter()
        .map(|m| m.name.len())
        .chain(std::iter::once("MESSAGE".len()))
        .max()
        .unwrap_or_default();

    let mut out = format!(
        "schema '{}': {} messages, max payload {} bytes\n",
        compiled.source_name,
        compiled.len(),
        compiled.max_payload_size
    );
    out.push_str(&format!("ID    {:<name_width$}  SIZE  PARAMETERS\n", "MESSAGE"));
    for message in &compiled.messages {
        out.push_str(&format!(
            "0x{:02X}  {:<name_width$}  {:<4}  {}\n",
            message.id,
            message.name,
            message.payload_size,
            describe_params(message)
        ));
    }
    out
}
