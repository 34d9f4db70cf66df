//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Closed registry of primitive wire types."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fixed-width primitive a parameter occupies on the wire.
///
/// The set is closed: adding a variant is a protocol change and every match
/// over it must be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
}

/// Raised when a type name does not match any registered wire type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type: {0}")]
pub struct UnknownTypeName(pub String);

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 9] = [
        PrimitiveType::U8,
        PrimitiveType::U16,
        PrimitiveType::U32,
        PrimitiveType::U64,
        PrimitiveType::I8,
        PrimitiveType::I16,
        PrimitiveType::I32,
        PrimitiveType::I64,
        PrimitiveType::F32,
    ];

    /// Size on the wire, in bytes.
    pub fn byte_size(&self) -> usize {
        match self {
            PrimitiveType::U8 | PrimitiveType::I8 => 1,
            PrimitiveType::U16 | PrimitiveType::I16 => 2,
            PrimitiveType::U32 | PrimitiveType::I32 | PrimitiveType::F32 => 4,
            PrimitiveType::U64 | PrimitiveType::I64 => 8,
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            PrimitiveType::I8 | PrimitiveType::I16 | PrimitiveType::I32 | PrimitiveType::I64
        )
    }

    pub fn is_float(&self) -> bool {
        matches!(self, PrimitiveType::F32)
    }

    /// C typename used in generated declarations.
    pub fn wire_name(&self) -> &'static str {
        match self {
            PrimitiveType::U8 => "uint8_t",
            PrimitiveType::U16 => "uint16_t",
            PrimitiveType::U32 => "uint32_t",
            PrimitiveType::U64 => "uint64_t",
            PrimitiveType::I8 => "int8_t",
            PrimitiveType::I16 => "int16_t",
            PrimitiveType::I32 => "int32_t",
            PrimitiveType::I64 => "int64_t",
            PrimitiveType::F32 => "float",
        }
    }

    /// Canonical spelling accepted in schema documents.
    pub fn short_name(&self) -> &'static str {
        match self {
            PrimitiveType::U8 => "u8",
            PrimitiveType::U16 => "u16",
            PrimitiveType::U32 => "u32",
            PrimitiveType::U64 => "u64",
            PrimitiveType::I8 => "i8",
            PrimitiveType::I16 => "i16",
            PrimitiveType::I32 => "i32",
            PrimitiveType::I64 => "i64",
            PrimitiveType::F32 => "f32",
        }
    }

    /// Resolve a type name. Accepts `i16`, `int16`, `int16_t` and `float`/`f32`.
    pub fn resolve(name: &str) -> Result<Self, UnknownTypeName> {
        let trimmed = name.trim();
        if matches!(trimmed, "float" | "f32") {
            return Ok(PrimitiveType::F32);
        }
        let bare = trimmed.strip_suffix("_t").unwrap_or(trimmed);
        let (signed, bits) = if let Some(bits) = bare.strip_prefix("uint") {
            (false, bits)
        } else if let Some(bits) = bare.strip_prefix("int") {
            (true, bits)
        } else if let Some(bits) = bare.strip_prefix('u') {
            (false, bits)
        } else if let Some(bits) = bare.strip_prefix('i') {
            (true, bits)
        } else {
            return Err(UnknownTypeName(name.to_owned()));
        };
        Self::from_width(bits, signed).ok_or_else(|| UnknownTypeName(name.to_owned()))
    }

    fn from_width(bits: &str, signed: bool) -> Option<Self> {
        let ty = match (bits, signed) {
            ("8", false) => PrimitiveType::U8,
            ("16", false) => PrimitiveType::U16,
            ("32", false) => PrimitiveType::U32,
            ("64", false) => PrimitiveType::U64,
            ("8", true) => PrimitiveType::I8,
            ("16", true) => PrimitiveType::I16,
            ("32", true) => PrimitiveType::I32,
            ("64", true) => PrimitiveType::I64,
            _ => return None,
        };
        Some(ty)
    }
}

impl FromStr for PrimitiveType {
    type Err = UnknownTypeName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}
