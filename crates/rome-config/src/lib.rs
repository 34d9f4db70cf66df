//! ---
//! rome_section: "04-configuration"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Generator configuration loading and validation."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! `romegen.toml`: schema lookup, symbol naming, output and logging.
//!
//! Every section is optional; an absent file means built-in defaults, which
//! reproduce the published header convention.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use rome_codegen::NamingScheme;
use rome_common::LoggingConfig;
use rome_schema::{SchemaLoader, DEFAULT_SCHEMA_ENV};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming a configuration file.
pub const ENV_CONFIG_PATH: &str = "ROMEGEN_CONFIG";
/// Configuration file probed in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "romegen.toml";

fn default_search_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(".")]
}

fn default_schema_env() -> String {
    DEFAULT_SCHEMA_ENV.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SchemaConfig {
    /// Directories probed, in order, for `<name>.toml`.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<PathBuf>,
    /// Consulted when no schema argument is given.
    #[serde(default = "default_schema_env")]
    pub env_var: String,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            env_var: default_schema_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Header path; stdout when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub include_guard: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub naming: NamingScheme,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// A [`GeneratorConfig`] together with the file it came from, if any.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: GeneratorConfig,
    pub source: Option<PathBuf>,
}

impl GeneratorConfig {
    /// Load using the standard lookup order: `explicit`, then
    /// `ROMEGEN_CONFIG`, then `romegen.toml`, else defaults.
    pub fn load_with_source(explicit: Option<&Path>) -> Result<LoadedConfig> {
        let from_env = std::env::var(ENV_CONFIG_PATH)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        Self::load_from_candidates(explicit, from_env.as_deref(), &[DEFAULT_CONFIG_FILE])
    }

    /// Lookup with the environment already read. Explicit and environment
    /// paths must exist; fallback candidates are skipped when missing.
    pub fn load_from_candidates<P: AsRef<Path>>(
        explicit: Option<&Path>,
        from_env: Option<&Path>,
        candidates: &[P],
    ) -> Result<LoadedConfig> {
        if let Some(path) = explicit.or(from_env) {
            return Ok(LoadedConfig {
                config: Self::from_path(path)?,
                source: Some(path.to_path_buf()),
            });
        }
        for candidate in candidates {
            let path = candidate.as_ref();
            if path.is_file() {
                return Ok(LoadedConfig {
                    config: Self::from_path(path)?,
                    source: Some(path.to_path_buf()),
                });
            }
        }
        debug!("no configuration file found; using defaults");
        Ok(LoadedConfig {
            config: Self::default(),
            source: None,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let mut config = toml::from_str::<GeneratorConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config file {}", path.display()))?;
        if let Some(base) = path.parent() {
            config.rebase_search_paths(base);
        }
        Ok(config)
    }

    fn rebase_search_paths(&mut self, base: &Path) {
        for dir in &mut self.schema.search_paths {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.naming.validate()?;
        if self.schema.env_var.trim().is_empty() {
            return Err(anyhow!("schema.env_var must not be empty"));
        }
        if self.schema.search_paths.is_empty() {
            return Err(anyhow!("schema.search_paths must list at least one directory"));
        }
        if let Some(guard) = &self.output.include_guard {
            if !rome_schema::is_c_identifier(guard) {
                return Err(anyhow!(
                    "output.include_guard '{guard}' is not a valid C identifier"
                ));
            }
        }
        Ok(())
    }

    pub fn schema_loader(&self) -> SchemaLoader {
        SchemaLoader::new(self.schema.search_paths.iter().cloned())
    }
}

impl std::str::FromStr for GeneratorConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: GeneratorConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}
