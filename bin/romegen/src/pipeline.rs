//! ---
//! rome_section: "05-command-line"
//! rome_subsection: "binary"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Schema resolution and compilation shared by the subcommands."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use anyhow::{Context, Result};
use rome_config::GeneratorConfig;
use rome_schema::{compile, CompiledSchema, SchemaSource};

/// Resolve, load and compile the schema named by `argument` (or the
/// configured environment variable).
pub fn compile_schema(argument: Option<&str>, config: &GeneratorConfig) -> Result<CompiledSchema> {
    let source = SchemaSource::resolve(argument, &config.schema.env_var)?;
    let schema = config
        .schema_loader()
        .load(&source)
        .with_context(|| format!("unable to load schema {source}"))?;
    compile(&schema).with_context(|| format!("schema {source} is invalid"))
}
