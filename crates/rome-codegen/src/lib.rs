//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "C header generation for compiled ROME schemas."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! Code generation for ROME schemas.
//!
//! A [`CompiledSchema`] is lowered into a typed [`ir::HeaderFile`] and then
//! printed. Schema validation happens in `rome-schema`; the only failures
//! here are clashes between message names and the configured frame fields.

pub mod error;
pub mod ir;
pub mod lower;
pub mod naming;
pub mod printer;

use rome_schema::CompiledSchema;
use serde::Serialize;
use tracing::debug;

pub use error::CodegenError;
pub use ir::HeaderFile;
pub use naming::{EmptyMember, NamingError, NamingScheme};

/// The four independent artifacts plus the assembled header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub identifiers: String,
    pub payload_union: String,
    pub helpers: String,
    pub disable_switches: String,
    pub header: String,
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    naming: NamingScheme,
}

impl Generator {
    pub fn new(naming: NamingScheme) -> Result<Self, NamingError> {
        naming.validate()?;
        Ok(Self { naming })
    }

    pub fn naming(&self) -> &NamingScheme {
        &self.naming
    }

    /// Reject schemas whose rendered symbols would not form valid C under
    /// this naming scheme.
    pub fn check(&self, compiled: &CompiledSchema) -> Result<(), CodegenError> {
        let header_fields = [&self.naming.id_field, &self.naming.size_field];
        for message in &compiled.messages {
            let member = self.naming.member(&message.name);
            if let Some(field) = header_fields.into_iter().find(|f| **f == member) {
                return Err(CodegenError::FrameFieldCollision {
                    message: message.name.clone(),
                    member,
                    field: field.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn lower(
        &self,
        compiled: &CompiledSchema,
        guard: Option<&str>,
    ) -> Result<HeaderFile, CodegenError> {
        self.check(compiled)?;
        Ok(lower::lower(compiled, &self.naming, guard))
    }

    /// Render the full header only.
    pub fn header(
        &self,
        compiled: &CompiledSchema,
        guard: Option<&str>,
    ) -> Result<String, CodegenError> {
        Ok(self.lower(compiled, guard)?.to_string())
    }

    pub fn generate(
        &self,
        compiled: &CompiledSchema,
        guard: Option<&str>,
    ) -> Result<Artifacts, CodegenError> {
        let header = self.lower(compiled, guard)?;
        let artifacts = Artifacts {
            identifiers: header.identifiers.to_string(),
            payload_union: header.frame.payload.to_string(),
            helpers: printer::join(&header.helpers, "\n"),
            disable_switches: printer::join(&header.disable_switches, ""),
            header: header.to_string(),
        };
        debug!(
            schema = %compiled.source_name,
            messages = compiled.len(),
            header_bytes = artifacts.header.len(),
            "header rendered"
        );
        Ok(artifacts)
    }
}
