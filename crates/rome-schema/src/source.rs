//! ---
//! rome_section: "02-schema-model"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Schema source resolution and the TOML schema document loader."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! Schema sources.
//!
//! A schema is obtained from exactly one source: either a file path or a
//! name looked up across the configured search directories. Documents are
//! plain TOML; nothing is executed while loading.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Result, SchemaError};
use crate::model::{Declarations, MessageDecl, Schema, SchemaBuilder};

/// Environment variable consulted when no source argument is supplied.
pub const DEFAULT_SCHEMA_ENV: &str = "ROME_MESSAGES";

/// File extension appended to named schemas.
pub const SCHEMA_EXTENSION: &str = "toml";

/// Where the schema comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    File(PathBuf),
    Named(String),
}

impl SchemaSource {
    /// Classify a single source argument.
    ///
    /// Anything that looks like a path (contains a separator or exists on
    /// disk) is a file; everything else is a schema name.
    pub fn from_argument(argument: &str) -> Self {
        let path = Path::new(argument);
        if argument.contains('/') || argument.contains(std::path::MAIN_SEPARATOR) || path.exists() {
            SchemaSource::File(path.to_path_buf())
        } else {
            SchemaSource::Named(argument.to_owned())
        }
    }

    /// Pick the explicit argument, else the environment fallback.
    pub fn resolve(argument: Option<&str>, env_var: &str) -> Result<Self> {
        let fallback = std::env::var(env_var).ok();
        Self::resolve_with(argument, fallback.as_deref(), env_var)
    }

    pub fn resolve_with(argument: Option<&str>, fallback: Option<&str>, env_var: &str) -> Result<Self> {
        let chosen = argument
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .or_else(|| fallback.map(str::trim).filter(|f| !f.is_empty()));
        match chosen {
            Some(value) => Ok(Self::from_argument(value)),
            None => Err(SchemaError::NoSchemaSource {
                env_var: env_var.to_owned(),
            }),
        }
    }
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaSource::File(path) => write!(f, "{}", path.display()),
            SchemaSource::Named(name) => f.write_str(name),
        }
    }
}

/// Top-level layout of a schema file: a list of `[[message]]` tables.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
    #[serde(default, rename = "message")]
    pub messages: Vec<MessageDecl>,
}

impl SchemaDocument {
    pub fn parse(text: &str, origin: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|err| SchemaError::Parse {
            path: origin.to_path_buf(),
            message: err.to_string(),
        })
    }
}

impl Declarations for SchemaDocument {
    fn declare(&self, builder: &mut SchemaBuilder) -> Result<()> {
        for message in &self.messages {
            builder.push(message.clone());
        }
        Ok(())
    }
}

/// Turns a [`SchemaSource`] into a populated [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    search_paths: Vec<PathBuf>,
}

impl SchemaLoader {
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the file backing a source.
    pub fn locate(&self, source: &SchemaSource) -> Result<PathBuf> {
        match source {
            SchemaSource::File(path) => Ok(path.clone()),
            SchemaSource::Named(name) => {
                let file_name = format!("{name}.{SCHEMA_EXTENSION}");
                let candidates: Vec<PathBuf> =
                    self.search_paths.iter().map(|dir| dir.join(&file_name)).collect();
                for candidate in &candidates {
                    debug!(schema = %name, candidate = %candidate.display(), "probing schema location");
                    if candidate.is_file() {
                        return Ok(candidate.clone());
                    }
                }
                Err(SchemaError::SchemaNotFound {
                    name: name.clone(),
                    searched: candidates,
                })
            }
        }
    }

    pub fn load(&self, source: &SchemaSource) -> Result<Schema> {
        let path = self.locate(source)?;
        let text = fs::read_to_string(&path).map_err(|err| SchemaError::Io {
            path: path.clone(),
            source: err,
        })?;
        let schema = self.load_str(&source.to_string(), &path, &text)?;
        info!(
            source = %source,
            path = %path.display(),
            messages = schema.len(),
            "schema loaded"
        );
        Ok(schema)
    }

    /// Load from in-memory text; `origin` is only used in error reports.
    pub fn load_str(&self, source_name: &str, origin: &Path, text: &str) -> Result<Schema> {
        let document = SchemaDocument::parse(text, origin)?;
        let mut builder = SchemaBuilder::new(source_name);
        builder.declare_from(&document)?;
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROBOT: &str = r#"
[[message]]
name = "ping"
id = 0x01

[[message]]
name = "set_speed"
id = 0x02
params = [
  { name = "left", type = "i16" },
  { name = "right", type = "int16_t" },
]
"#;

    #[test]
    fn argument_with_separator_is_a_file() {
        assert_eq!(
            SchemaSource::from_argument("schemas/robot.toml"),
            SchemaSource::File(PathBuf::from("schemas/robot.toml"))
        );
        assert_eq!(
            SchemaSource::from_argument("robot_messages"),
            SchemaSource::Named("robot_messages".into())
        );
    }

    #[test]
    fn missing_argument_falls_back_to_environment_value() {
        let source = SchemaSource::resolve_with(None, Some("robot"), DEFAULT_SCHEMA_ENV).unwrap();
        assert_eq!(source, SchemaSource::Named("robot".into()));

        let source = SchemaSource::resolve_with(Some("other"), Some("robot"), DEFAULT_SCHEMA_ENV).unwrap();
        assert_eq!(source, SchemaSource::Named("other".into()));
    }

    #[test]
    fn no_argument_and_no_environment_fails() {
        let err = SchemaSource::resolve_with(None, Some("  "), DEFAULT_SCHEMA_ENV).unwrap_err();
        assert!(matches!(err, SchemaError::NoSchemaSource { ref env_var } if env_var == DEFAULT_SCHEMA_ENV));
    }

    #[test]
    fn document_parses_in_declaration_order() {
        let schema = SchemaLoader::default()
            .load_str("robot", Path::new("robot.toml"), ROBOT)
            .unwrap();
        assert_eq!(schema.len(), 2);
        let set_speed = &schema.messages()[1];
        assert_eq!(set_speed.id, 2);
        assert_eq!(set_speed.params[0].name, "left");
        assert_eq!(set_speed.params[1].ty.as_str(), "int16_t");
    }

    #[test]
    fn empty_document_is_an_empty_schema() {
        let err = SchemaLoader::default()
            .load_str("blank", Path::new("blank.toml"), "# nothing here\n")
            .unwrap_err();
        assert!(matches!(err, SchemaError::EmptySchema { .. }));
    }

    #[test]
    fn unknown_keys_are_parse_errors() {
        let text = "[[message]]\nname = \"ping\"\nid = 1\nparameters = []\n";
        let err = SchemaLoader::default()
            .load_str("typo", Path::new("typo.toml"), text)
            .unwrap_err();
        assert!(matches!(err, SchemaError::Parse { .. }));
    }

    #[test]
    fn named_schema_is_found_in_search_path() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("robot.toml"), ROBOT).unwrap();

        let loader = SchemaLoader::new([first.path(), second.path()]);
        let source = SchemaSource::Named("robot".into());
        assert_eq!(loader.locate(&source).unwrap(), second.path().join("robot.toml"));
        let schema = loader.load(&source).unwrap();
        assert_eq!(schema.source_name(), "robot");
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn named_schema_missing_everywhere_lists_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let loader = SchemaLoader::new([dir.path()]);
        let err = loader.load(&SchemaSource::Named("ghost".into())).unwrap_err();
        match err {
            SchemaError::SchemaNotFound { name, searched } => {
                assert_eq!(name, "ghost");
                assert_eq!(searched, vec![dir.path().join("ghost.toml")]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        let err = SchemaLoader::default()
            .load(&SchemaSource::File(missing.clone()))
            .unwrap_err();
        assert!(matches!(err, SchemaError::Io { ref path, .. } if *path == missing));
    }
}
