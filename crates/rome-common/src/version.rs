//! ---
//! rome_section: "01-core-functionality"
//! rome_subsection: "module"
//! rome_type: "source"
//! rome_scope: "code"
//! rome_description: "Build metadata reported by the -V flag."
//! rome_version: "v0.1.0"
//! rome_owner: "tbd"
//! ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub semver: String,
    /// Minimum supported Rust version declared by the workspace.
    pub rust_version: String,
    pub profile: String,
}

impl VersionInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            semver: env!("CARGO_PKG_VERSION").to_owned(),
            rust_version: option_env!("CARGO_PKG_RUST_VERSION")
                .filter(|v| !v.is_empty())
                .unwrap_or("UNKNOWN")
                .to_owned(),
            profile: if cfg!(debug_assertions) { "debug" } else { "release" }.to_owned(),
        }
    }

    #[must_use]
    pub fn banner(&self) -> String {
        format!("romegen v{}", self.semver)
    }

    /// Multi-line string for `-V`.
    #[must_use]
    pub fn extended(&self) -> String {
        format!(
            "{banner}\nMSRV: {msrv}\nProfile: {profile}",
            banner = self.banner(),
            msrv = self.rust_version,
            profile = self.profile
        )
    }
}
