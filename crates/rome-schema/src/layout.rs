//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Layout compiler: validation, type resolution and payload sizing."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! Layout compiler.
//!
//! Validates a [`Schema`] and derives the frame description consumed by the
//! emitter. The wire layout of a payload is the flat concatenation of its
//! parameters in declaration order; no padding is inserted.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::model::{MessageDecl, Schema};
use crate::types::PrimitiveType;

/// Largest identifier representable by the one-byte id field.
pub const MAX_MESSAGE_ID: u8 = u8::MAX;

/// Largest payload representable by the one-byte payload-length field.
pub const MAX_PAYLOAD_BYTES: usize = u8::MAX as usize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamLayout {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: PrimitiveType,
    /// Byte offset from the start of the payload.
    pub offset: usize,
}

impl ParamLayout {
    pub fn size(&self) -> usize {
        self.ty.byte_size()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageLayout {
    pub name: String,
    pub id: u8,
    pub params: Vec<ParamLayout>,
    pub payload_size: usize,
}

/// Validated schema, messages sorted by ascending id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompiledSchema {
    pub source_name: String,
    pub messages: Vec<MessageLayout>,
    pub max_payload_size: usize,
}

impl CompiledSchema {
    pub fn message(&self, name: &str) -> Option<&MessageLayout> {
        self.messages.iter().find(|m| m.name == name)
    }

    pub fn by_id(&self, id: u8) -> Option<&MessageLayout> {
        self.messages
            .binary_search_by_key(&id, |m| m.id)
            .ok()
            .map(|idx| &self.messages[idx])
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Validate every declaration and compute layouts. Stops at the first error.
pub fn compile(schema: &Schema) -> Result<CompiledSchema> {
    let mut by_id: BTreeMap<u8, MessageLayout> = BTreeMap::new();
    let mut names: HashMap<String, String> = HashMap::new();

    for decl in schema.messages() {
        check_identifier("message", &decl.name)?;
        // The union member is emitted lowercased.
        if !is_c_identifier(&decl.name.to_ascii_lowercase()) {
            return Err(SchemaError::InvalidName {
                kind: "message",
                name: decl.name.clone(),
            });
        }
        if let Some(existing) = names.insert(decl.name.to_ascii_uppercase(), decl.name.clone()) {
            return Err(SchemaError::DuplicateMessageName {
                name: decl.name.clone(),
                existing,
            });
        }

        let id = check_id(decl)?;
        if let Some(first) = by_id.get(&id) {
            return Err(SchemaError::DuplicateMessageId {
                id,
                first: first.name.clone(),
                second: decl.name.clone(),
            });
        }

        let layout = layout_message(decl, id)?;
        debug!(
            message = %layout.name,
            id = layout.id,
            params = layout.params.len(),
            payload_size = layout.payload_size,
            "message laid out"
        );
        by_id.insert(id, layout);
    }

    let messages: Vec<MessageLayout> = by_id.into_values().collect();
    let max_payload_size = messages.iter().map(|m| m.payload_size).max().unwrap_or(0);
    info!(
        schema = %schema.source_name(),
        messages = messages.len(),
        max_payload_size,
        "schema compiled"
    );

    Ok(CompiledSchema {
        source_name: schema.source_name().to_owned(),
        messages,
        max_payload_size,
    })
}

fn check_id(decl: &MessageDecl) -> Result<u8> {
    u8::try_from(decl.id).map_err(|_| SchemaError::IdentifierOutOfRange {
        message: decl.name.clone(),
        id: decl.id,
        max: MAX_MESSAGE_ID,
    })
}

fn layout_message(decl: &MessageDecl, id: u8) -> Result<MessageLayout> {
    let mut seen = HashSet::new();
    let mut params = Vec::with_capacity(decl.params.len());
    let mut offset = 0usize;

    for param in &decl.params {
        check_identifier("parameter", &param.name)?;
        if !seen.insert(param.name.as_str()) {
            return Err(SchemaError::DuplicateParameter {
                message: decl.name.clone(),
                parameter: param.name.clone(),
            });
        }
        let ty = PrimitiveType::resolve(param.ty.as_str()).map_err(|err| {
            SchemaError::UnsupportedType {
                type_name: err.0,
                message: decl.name.clone(),
                parameter: param.name.clone(),
            }
        })?;
        params.push(ParamLayout {
            name: param.name.clone(),
            ty,
            offset,
        });
        offset += ty.byte_size();
    }

    if offset > MAX_PAYLOAD_BYTES {
        return Err(SchemaError::PayloadTooLarge {
            message: decl.name.clone(),
            size: offset,
            max: MAX_PAYLOAD_BYTES,
        });
    }

    Ok(MessageLayout {
        name: decl.name.clone(),
        id,
        params,
        payload_size: offset,
    })
}

const C_KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
    "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
    "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch", "typedef",
    "union", "unsigned", "void", "volatile", "while",
];

/// Names end up verbatim in C source, so they must be C identifiers.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !C_KEYWORDS.contains(&name)
}

fn check_identifier(kind: &'static str, name: &str) -> Result<()> {
    if is_c_identifier(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            kind,
            name: name.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SchemaBuilder;

    fn robot() -> Schema {
        let mut builder = SchemaBuilder::new("robot");
        builder
            .message("set_speed", 0x02)
            .param("left", "i16")
            .param("right", "i16");
        builder.message("ping", 0x01);
        builder.finish().unwrap()
    }

    #[test]
    fn messages_sorted_by_id_with_sizes() {
        let compiled = compile(&robot()).unwrap();
        let ids: Vec<u8> = compiled.messages.iter().map(|m| m.id).collect();
        assert_eq!(ids, [0x01, 0x02]);
        assert_eq!(compiled.message("ping").unwrap().payload_size, 0);
        assert_eq!(compiled.message("set_speed").unwrap().payload_size, 4);
        assert_eq!(compiled.max_payload_size, 4);
        assert_eq!(compiled.by_id(0x02).unwrap().name, "set_speed");
        assert!(compiled.by_id(0x03).is_none());
    }

    #[test]
    fn offsets_are_flat_concatenation() {
        let mut builder = SchemaBuilder::new("mixed");
        builder
            .message("mixed", 7)
            .param("a", "u8")
            .param("b", "u32")
            .param("c", "i16")
            .param("d", "float")
            .param("e", "u64");
        let compiled = compile(&builder.finish().unwrap()).unwrap();
        let msg = &compiled.messages[0];
        let offsets: Vec<usize> = msg.params.iter().map(|p| p.offset).collect();
        assert_eq!(offsets, [0, 1, 5, 7, 11]);
        assert_eq!(msg.payload_size, 19);
    }

    #[test]
    fn duplicate_id_names_both_messages() {
        let mut builder = SchemaBuilder::new("dup");
        builder.message("forward", 3);
        builder.message("backward", 3);
        match compile(&builder.finish().unwrap()).unwrap_err() {
            SchemaError::DuplicateMessageId { id, first, second } => {
                assert_eq!(id, 3);
                assert_eq!(first, "forward");
                assert_eq!(second, "backward");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn identifier_range_is_one_byte() {
        for bad in [-1_i64, 256, 1_000] {
            let mut builder = SchemaBuilder::new("range");
            builder.message("far", bad);
            let err = compile(&builder.finish().unwrap()).unwrap_err();
            assert!(matches!(err, SchemaError::IdentifierOutOfRange { id, .. } if id == bad));
        }
        let mut builder = SchemaBuilder::new("edges");
        builder.message("low", 0);
        builder.message("high", 255);
        assert!(compile(&builder.finish().unwrap()).is_ok());
    }

    #[test]
    fn unsupported_type_aborts_with_context() {
        let mut builder = SchemaBuilder::new("wide");
        builder.message("ok", 1).param("x", "u8");
        builder.message("huge", 2).param("value", "i128");
        match compile(&builder.finish().unwrap()).unwrap_err() {
            SchemaError::UnsupportedType {
                type_name,
                message,
                parameter,
            } => {
                assert_eq!(type_name, "i128");
                assert_eq!(message, "huge");
                assert_eq!(parameter, "value");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn upper_case_collisions_are_rejected() {
        let mut builder = SchemaBuilder::new("case");
        builder.message("stop", 1);
        builder.message("STOP", 2);
        let err = compile(&builder.finish().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateMessageName { ref existing, .. } if existing == "stop"));
    }

    #[test]
    fn repeated_parameter_is_rejected() {
        let mut builder = SchemaBuilder::new("params");
        builder.message("move", 1).param("x", "i8").param("x", "i8");
        let err = compile(&builder.finish().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateParameter { ref parameter, .. } if parameter == "x"));
    }

    #[test]
    fn names_must_be_c_identifiers() {
        assert!(is_c_identifier("set_speed"));
        assert!(is_c_identifier("_private2"));
        assert!(!is_c_identifier("2fast"));
        assert!(!is_c_identifier("set-speed"));
        assert!(!is_c_identifier(""));
        assert!(!is_c_identifier("int"));
        assert!(is_c_identifier("interval"));

        let mut builder = SchemaBuilder::new("keywords");
        builder.message("INT", 1).param("v", "u8");
        let err = compile(&builder.finish().unwrap()).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidName { kind: "message", ref name } if name == "INT"
        ));

        let mut builder = SchemaBuilder::new("names");
        builder.message("go", 1).param("max speed", "u8");
        let err = compile(&builder.finish().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName { kind: "parameter", .. }));
    }

    #[test]
    fn oversized_payload_is_rejected() {
        let mut builder = SchemaBuilder::new("big");
        let msg = builder.message("bulk", 1);
        for i in 0..32 {
            msg.param(format!("v{i}"), "u64");
        }
        let err = compile(&builder.finish().unwrap()).unwrap_err();
        assert!(matches!(err, SchemaError::PayloadTooLarge { size: 256, .. }));
    }

    #[test]
    fn compilation_is_deterministic() {
        let schema = robot();
        assert_eq!(compile(&schema).unwrap(), compile(&schema).unwrap());
    }
}
