//! Project version lookup
//!
//! The version is read from a declarative file in the project root:
//!
//! 1. `[package] version` in `Ggallin.toml`
//! 2. the content of a plain `VERSION` file
//!
//! The value is not parsed as semver. It is used verbatim for build and
//! package directory names, archive names and the release tag.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{GgallinConfig, CONFIG_FILE_NAME};
use crate::error::{hints, GgallinError};

/// Plain-text version file name
pub const VERSION_FILE_NAME: &str = "VERSION";

/// Prefix added to the version to form the release tag
pub const TAG_PREFIX: &str = "v";

/// Non-empty version string of the project being released
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectVersion(String);

impl ProjectVersion {
    /// Wrap a declared version, rejecting values unusable as a directory name
    pub fn new(raw: impl Into<String>) -> Result<Self, GgallinError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(GgallinError::version_error(
                "declared version is empty",
                hints::version_not_found(),
            ));
        }
        if raw.contains(['/', '\\']) || raw == "." || raw == ".." {
            return Err(GgallinError::version_error(
                format!("version '{}' cannot be used as a directory name", raw),
                "Remove path separators from the declared version.",
            ));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Release tag for this version, e.g. `1.2.0` becomes `v1.2.0`
    pub fn tag(&self) -> String {
        format!("{}{}", TAG_PREFIX, self.0)
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the project version from `Ggallin.toml` or `VERSION`
///
/// `config` is the already-loaded Ggallin.toml, if the project has one.
pub fn read_version(project_root: &Path, config: Option<&GgallinConfig>) -> Result<ProjectVersion> {
    if let Some(declared) = config.and_then(GgallinConfig::declared_version) {
        log::debug!("version '{}' read from {}", declared, CONFIG_FILE_NAME);
        return Ok(ProjectVersion::new(declared.trim())?);
    }

    let version_file = project_root.join(VERSION_FILE_NAME);
    if !version_file.is_file() {
        return Err(GgallinError::version_error(
            format!(
                "no version declared in {} or {}",
                CONFIG_FILE_NAME, VERSION_FILE_NAME
            ),
            hints::version_not_found(),
        )
        .into());
    }

    let content = std::fs::read_to_string(&version_file)
        .with_context(|| format!("Failed to read {}", version_file.display()))?;
    log::debug!("version '{}' read from {}", content.trim(), version_file.display());
    Ok(ProjectVersion::new(content.trim())?)
}
