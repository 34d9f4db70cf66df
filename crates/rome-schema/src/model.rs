//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Message declarations, the schema builder and the immutable schema."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};
use crate::types::PrimitiveType;

/// Type name as written in the schema, resolved later by the layout compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef(String);

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TypeRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<PrimitiveType> for TypeRef {
    fn from(value: PrimitiveType) -> Self {
        Self::new(value.short_name())
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `(name, type)` pair of a message, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

/// A message as declared by a schema source.
///
/// `id` is kept wide so that out-of-range identifiers survive until the
/// layout compiler can report them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageDecl {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub params: Vec<ParameterDecl>,
}

impl MessageDecl {
    pub fn new(name: impl Into<String>, id: i64) -> Self {
        Self {
            name: name.into(),
            id,
            params: Vec::new(),
        }
    }

    /// Append a parameter. Order of calls is the wire order.
    pub fn param(&mut self, name: impl Into<String>, ty: impl Into<TypeRef>) -> &mut Self {
        self.params.push(ParameterDecl {
            name: name.into(),
            ty: ty.into(),
        });
        self
    }
}

/// Registration seam for anything able to populate a schema.
pub trait Declarations {
    fn declare(&self, builder: &mut SchemaBuilder) -> Result<()>;
}

/// Collects declarations for a single compiler invocation.
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    source_name: String,
    messages: Vec<MessageDecl>,
}

impl SchemaBuilder {
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            messages: Vec::new(),
        }
    }

    /// Declare a message and return it for parameter registration.
    pub fn message(&mut self, name: impl Into<String>, id: i64) -> &mut MessageDecl {
        self.messages.push(MessageDecl::new(name, id));
        let last = self.messages.len() - 1;
        &mut self.messages[last]
    }

    pub fn push(&mut self, message: MessageDecl) {
        self.messages.push(message);
    }

    /// Run a set of declarations against this builder.
    pub fn declare_from<D: Declarations + ?Sized>(&mut self, source: &D) -> Result<&mut Self> {
        source.declare(self)?;
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Freeze the collected declarations.
    pub fn finish(self) -> Result<Schema> {
        if self.messages.is_empty() {
            return Err(SchemaError::EmptySchema {
                source_name: self.source_name,
            });
        }
        Ok(Schema {
            source_name: self.source_name,
            messages: self.messages,
        })
    }
}

/// Immutable catalog of declared messages, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    source_name: String,
    messages: Vec<MessageDecl>,
}

impl Schema {
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn messages(&self) -> &[MessageDecl] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&MessageDecl> {
        self.messages.iter().find(|m| m.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_preserves_parameter_order() {
        let mut builder = SchemaBuilder::new("inline");
        builder
            .message("set_speed", 0x02)
            .param("left", "i16")
            .param("right", PrimitiveType::I16);
        let schema = builder.finish().unwrap();
        let msg = schema.get("set_speed").unwrap();
        let names: Vec<_> = msg.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["left", "right"]);
        assert_eq!(msg.params[1].ty.as_str(), "i16");
    }

    #[test]
    fn empty_builder_is_rejected() {
        let err = SchemaBuilder::new("nothing").finish().unwrap_err();
        assert!(matches!(err, SchemaError::EmptySchema { ref source_name } if source_name == "nothing"));
    }

    struct Fixed;

    impl Declarations for Fixed {
        fn declare(&self, builder: &mut SchemaBuilder) -> Result<()> {
            builder.message("ping", 1);
            builder.message("pong", 2).param("seq", "u8");
            Ok(())
        }
    }

    #[test]
    fn declarations_register_through_builder() {
        let mut builder = SchemaBuilder::new("fixed");
        builder.declare_from(&Fixed).unwrap();
        assert_eq!(builder.len(), 2);
        let schema = builder.finish().unwrap();
        assert_eq!(schema.source_name(), "fixed");
        assert_eq!(schema.messages()[0].name, "ping");
        assert!(schema.messages()[0].params.is_empty());
    }
}
