//! ---
//! rome_section: "01-core-functionality"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Tracing subscriber bootstrap for romegen."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::daily;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::{Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "ROME_LOG";
const DEFAULT_DIRECTIVE: &str = "info";

static INITIALISED: OnceCell<LogFormat> = OnceCell::new();

/// Console log formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    #[default]
    Pretty,
    StructuredJson,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// When set, a daily rolling JSON log is written here as well.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

/// Keeps the file writer flushing until dropped. Hold it for the lifetime of `main`.
#[must_use = "dropping the guard stops the log file writer"]
#[derive(Debug, Default)]
pub struct LoggingGuard {
    _file: Option<WorkerGuard>,
}

fn env_filter() -> EnvFilter {
    // `ROME_LOG` wins over `RUST_LOG`; both fall back to `info`.
    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(&directive).unwrap_or_else(|err| {
            eprintln!("invalid {LOG_ENV} directive ({err}); defaulting to {DEFAULT_DIRECTIVE}");
            EnvFilter::new(DEFAULT_DIRECTIVE)
        }),
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

/// Install the global subscriber.
///
/// Console output always goes to stderr so that a header written to stdout is
/// never interleaved with log lines. Calling this more than once is harmless;
/// only the first call installs anything.
pub fn init_tracing(service_name: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    if INITIALISED.get().is_some() {
        return Ok(LoggingGuard::default());
    }

    let console = match config.format {
        LogFormat::Pretty => fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::StructuredJson => fmt::layer()
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .json()
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let mut guard = LoggingGuard::default();
    let file_layer = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory).with_context(|| {
                format!("unable to create log directory {}", directory.display())
            })?;
            let prefix = config.file_prefix.as_deref().unwrap_or(service_name);
            let appender = daily(directory, format!("{prefix}.log"));
            let (writer, file_guard) = tracing_appender::non_blocking(appender);
            guard._file = Some(file_guard);
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .json()
                    .with_writer(writer)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter())
        .with(console)
        .with(file_layer)
        .try_init()
        .ok();
    INITIALISED.get_or_init(|| config.format);

    debug!(
        service = %service_name,
        format = ?config.format,
        log_dir = ?config.directory,
        "tracing initialised"
    );
    Ok(guard)
}
