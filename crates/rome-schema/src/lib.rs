//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Schema model, loader and layout compiler for ROME messages."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! ROME message schemas.
//!
//! A schema is a catalog of messages, each with a one-byte identifier and an
//! ordered list of typed parameters. This crate loads schemas from TOML
//! documents (or from declarations registered in code), validates them and
//! computes the byte-accurate payload layout the code generator renders.

pub mod error;
pub mod layout;
pub mod model;
pub mod source;
pub mod types;

pub use error::{Result, SchemaError};
pub use layout::{
    compile, is_c_identifier, CompiledSchema, MessageLayout, ParamLayout, MAX_MESSAGE_ID,
    MAX_PAYLOAD_BYTES,
};
pub use model::{Declarations, MessageDecl, ParameterDecl, Schema, SchemaBuilder, TypeRef};
pub use source::{SchemaDocument, SchemaLoader, SchemaSource, DEFAULT_SCHEMA_ENV};
pub use types::{PrimitiveType, UnknownTypeName};
