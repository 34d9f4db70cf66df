//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Naming rules for generated C symbols."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use rome_schema::is_c_identifier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

fn default_identifier_tag() -> String {
    "IDENTIFIER".to_owned()
}

fn default_set_tag() -> String {
    "SET".to_owned()
}

fn default_send_tag() -> String {
    "SEND".to_owned()
}

fn default_disable_tag() -> String {
    "DISABLE".to_owned()
}

fn default_identifier_type() -> String {
    "rome_identifier_t".to_owned()
}

fn default_frame_type() -> String {
    "rome_frame_t".to_owned()
}

fn default_send_function() -> String {
    "rome_send".to_owned()
}

fn default_id_field() -> String {
    "mid".to_owned()
}

fn default_size_field() -> String {
    "plsize".to_owned()
}

fn default_max_payload_define() -> String {
    "MAX_PAYLOAD_SIZE".to_owned()
}

/// How a zero-parameter message is rendered inside the payload union.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyMember {
    /// One `uint8_t _reserved;` field, valid in ISO C.
    #[default]
    Placeholder,
    /// `struct {}`; needs a compiler accepting empty aggregates (GNU C).
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("naming option '{field}' = '{value}' is not a valid C identifier")]
pub struct NamingError {
    pub field: &'static str,
    pub value: String,
}

/// Symbol naming used by the generated header.
///
/// Changing any of these is a breaking change for every consumer of the
/// header, so the defaults are the versioned interface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct NamingScheme {
    #[serde(default)]
    pub prefix: Option<String>,
    #[serde(default = "default_identifier_tag")]
    pub identifier_tag: String,
    #[serde(default = "default_set_tag")]
    pub set_tag: String,
    #[serde(default = "default_send_tag")]
    pub send_tag: String,
    #[serde(default = "default_disable_tag")]
    pub disable_tag: String,
    #[serde(default = "default_identifier_type")]
    pub identifier_type: String,
    #[serde(default = "default_frame_type")]
    pub frame_type: String,
    #[serde(default = "default_send_function")]
    pub send_function: String,
    #[serde(default = "default_id_field")]
    pub id_field: String,
    #[serde(default = "default_size_field")]
    pub size_field: String,
    #[serde(default = "default_max_payload_define")]
    pub max_payload_define: String,
    #[serde(default)]
    pub disabled_sentinel: u8,
    #[serde(default)]
    pub empty_member: EmptyMember,
}

impl Default for NamingScheme {
    fn default() -> Self {
        Self {
            prefix: None,
            identifier_tag: default_identifier_tag(),
            set_tag: default_set_tag(),
            send_tag: default_send_tag(),
            disable_tag: default_disable_tag(),
            identifier_type: default_identifier_type(),
            frame_type: default_frame_type(),
            send_function: default_send_function(),
            id_field: default_id_field(),
            size_field: default_size_field(),
            max_payload_define: default_max_payload_define(),
            disabled_sentinel: 0,
            empty_member: EmptyMember::default(),
        }
    }
}

impl NamingScheme {
    /// Check every configurable token ends up as a valid C identifier.
    pub fn validate(&self) -> Result<(), NamingError> {
        if let Some(prefix) = &self.prefix {
            check("prefix", prefix)?;
        }
        check("identifier_tag", &self.identifier_tag)?;
        check("set_tag", &self.set_tag)?;
        check("send_tag", &self.send_tag)?;
        check("disable_tag", &self.disable_tag)?;
        check("identifier_type", &self.identifier_type)?;
        check("frame_type", &self.frame_type)?;
        check("send_function", &self.send_function)?;
        check("id_field", &self.id_field)?;
        check("size_field", &self.size_field)?;
        check("max_payload_define", &self.max_payload_define)?;
        Ok(())
    }

    fn tagged(&self, tag: &str, name: &str) -> String {
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!(
                "{}_{}_{}",
                prefix.to_ascii_uppercase(),
                tag,
                name.to_ascii_uppercase()
            ),
            None => format!("{}_{}", tag, name.to_ascii_uppercase()),
        }
    }

    /// `IDENTIFIER_<NAME>`
    pub fn identifier(&self, message: &str) -> String {
        self.tagged(&self.identifier_tag, message)
    }

    /// `SET_<NAME>`
    pub fn set_macro(&self, message: &str) -> String {
        self.tagged(&self.set_tag, message)
    }

    /// `SEND_<NAME>`
    pub fn send_macro(&self, message: &str) -> String {
        self.tagged(&self.send_tag, message)
    }

    /// `DISABLE_<NAME>`
    pub fn disable_flag(&self, message: &str) -> String {
        self.tagged(&self.disable_tag, message)
    }

    pub fn max_payload_define(&self) -> String {
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}_{}", prefix.to_ascii_uppercase(), self.max_payload_define),
            None => self.max_payload_define.clone(),
        }
    }

    /// Union member name for a message.
    pub fn member(&self, message: &str) -> String {
        message.to_ascii_lowercase()
    }

    /// Default include guard, `<PREFIX>_MESSAGES_H` or `ROME_MESSAGES_H`.
    pub fn default_guard(&self) -> String {
        match self.prefix.as_deref().filter(|p| !p.is_empty()) {
            Some(prefix) => format!("{}_MESSAGES_H", prefix.to_ascii_uppercase()),
            None => "ROME_MESSAGES_H".to_owned(),
        }
    }
}

fn check(field: &'static str, value: &str) -> Result<(), NamingError> {
    if is_c_identifier(value) {
        Ok(())
    } else {
        Err(NamingError {
            field,
            value: value.to_owned(),
        })
    }
}
