//! ---
//! rome_section: "01-core-functionality"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Shared logging and version primitives."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
//! Shared primitives for the romegen workspace: tracing bootstrap, build
//! events and version metadata.

pub mod events;
pub mod logging;
pub mod version;

pub use events::{log_build_event, BuildEventOutcome, LogContext};
pub use logging::{init_tracing, LogFormat, LoggingConfig, LoggingGuard};
pub use version::VersionInfo;
