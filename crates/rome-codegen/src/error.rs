//! ---
//! rome_section: "03-code-generation"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Failures detected while preparing a header for emission."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The payload union is anonymous, so its members share a scope with the frame header.
    #[error("message '{message}' union member '{member}' clashes with frame field '{field}'")]
    FrameFieldCollision {
        message: String,
        member: String,
        field: String,
    },
}
