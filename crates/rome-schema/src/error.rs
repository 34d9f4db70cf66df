//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Error taxonomy for schema loading and layout compilation."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

/// Terminal build-time failures. None of them is recoverable within an invocation.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema source given and {env_var} is not set")]
    NoSchemaSource { env_var: String },
    #[error("schema '{source_name}' defines no messages")]
    EmptySchema { source_name: String },
    #[error("unsupported type '{type_name}' for parameter '{parameter}' of message '{message}'")]
    UnsupportedType {
        type_name: String,
        message: String,
        parameter: String,
    },
    #[error("messages '{first}' and '{second}' share identifier 0x{id:02X}")]
    DuplicateMessageId {
        id: u8,
        first: String,
        second: String,
    },
    #[error("message '{message}' identifier {id} is outside 0..={max}")]
    IdentifierOutOfRange { message: String, id: i64, max: u8 },
    #[error("message name '{name}' collides with '{existing}'")]
    DuplicateMessageName { name: String, existing: String },
    #[error("parameter '{parameter}' declared twice in message '{message}'")]
    DuplicateParameter { message: String, parameter: String },
    #[error("{kind} name '{name}' is not a valid C identifier")]
    InvalidName { kind: &'static str, name: String },
    #[error("message '{message}' payload is {size} bytes, frame allows at most {max}")]
    PayloadTooLarge {
        message: String,
        size: usize,
        max: usize,
    },
    #[error("schema '{name}' not found. inspected: {}", display_paths(.searched))]
    SchemaNotFound { name: String, searched: Vec<PathBuf> },
    #[error("unable to read schema {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse schema {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "(no search paths configured)".to_owned();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_id_names_both_messages() {
        let err = SchemaError::DuplicateMessageId {
            id: 0x02,
            first: "set_speed".into(),
            second: "stop".into(),
        };
        let text = err.to_string();
        assert!(text.contains("set_speed"));
        assert!(text.contains("stop"));
        assert!(text.contains("0x02"));
    }

    #[test]
    fn not_found_lists_search_paths() {
        let err = SchemaError::SchemaNotFound {
            name: "robot".into(),
            searched: vec![PathBuf::from("a/robot.toml"), PathBuf::from("b/robot.toml")],
        };
        assert_eq!(
            err.to_string(),
            "schema 'robot' not found. inspected: a/robot.toml, b/robot.toml"
        );
    }
}
