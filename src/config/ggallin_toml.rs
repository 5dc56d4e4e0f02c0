//! Ggallin.toml configuration parsing
//!
//! ```toml
//! [package]
//! name = "mytool"
//! version = "1.2.0"
//!
//! [build]
//! compiler = "gox"
//! os = "linux darwin"
//! arch = "amd64"
//! jobs = 4
//!
//! [release]
//! uploader = "ghr"
//! username = "octocat"
//! replace = false
//! remote = "origin"
//! ```
//!
//! Every section is optional. Command-line flags take precedence over the
//! values found here.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::{hints, GgallinError};

/// Config file name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "Ggallin.toml";

/// Default cross-compiler program
pub const DEFAULT_COMPILER: &str = "gox";

/// Default release uploader program
pub const DEFAULT_UPLOADER: &str = "ghr";

/// Default git remote to push to before releasing
pub const DEFAULT_REMOTE: &str = "origin";

/// Root configuration from Ggallin.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GgallinConfig {
    /// Project metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageConfig>,

    /// Cross-compilation defaults
    #[serde(default)]
    pub build: BuildConfig,

    /// Release defaults
    #[serde(default)]
    pub release: ReleaseConfig,
}

/// [package] section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Declared project version, used verbatim for tags and file names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// [build] section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Cross-compiler program (default: gox)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compiler: Option<String>,

    /// Space-separated operating systems
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,

    /// Space-separated architectures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arch: Option<String>,

    /// Space-separated os/arch pairs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osarch: Option<String>,

    /// Maximum number of archives written at once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<NonZeroUsize>,
}

/// [release] section
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReleaseConfig {
    /// Release uploader program (default: ghr)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    /// Uploader identity (GitHub username)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Replace existing release assets
    #[serde(default)]
    pub replace: bool,

    /// Remote pushed before publishing (default: origin)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl GgallinConfig {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, GgallinError> {
        toml::from_str(content).map_err(|e| {
            GgallinError::config_error_with_hint(
                format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e.message()),
                Some(e),
                hints::invalid_ggallin_toml(),
            )
        })
    }

    /// Path of the config file inside a project root
    pub fn path_in(project_root: &Path) -> PathBuf {
        project_root.join(CONFIG_FILE_NAME)
    }

    /// Load Ggallin.toml from the project root, if present
    pub fn load_from(project_root: &Path) -> Result<Option<Self>> {
        let path = Self::path_in(project_root);
        if !path.is_file() {
            log::debug!("no {} at {}", CONFIG_FILE_NAME, path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&content)?;
        log::debug!("loaded {}", path.display());
        Ok(Some(config))
    }

    /// Serialize back to TOML for writing to disk
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize Ggallin.toml")
    }

    /// Declared version, if any
    pub fn declared_version(&self) -> Option<&str> {
        self.package.as_ref().and_then(|p| p.version.as_deref())
    }

    /// Cross-compiler program to run
    pub fn compiler(&self) -> &str {
        self.build.compiler.as_deref().unwrap_or(DEFAULT_COMPILER)
    }

    /// Release uploader program to run
    pub fn uploader(&self) -> &str {
        self.release.uploader.as_deref().unwrap_or(DEFAULT_UPLOADER)
    }

    /// Git remote pushed before publishing
    pub fn remote(&self) -> &str {
        self.release.remote.as_deref().unwrap_or(DEFAULT_REMOTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = GgallinConfig::parse(
            r#"
[package]
name = "mytool"
version = "1.2.0"

[build]
compiler = "gox"
os = "linux darwin"
arch = "amd64"
jobs = 4

[release]
username = "octocat"
replace = true
remote = "upstream"
"#,
        )
        .unwrap();

        assert_eq!(config.declared_version(), Some("1.2.0"));
        assert_eq!(config.build.os.as_deref(), Some("linux darwin"));
        assert_eq!(config.build.jobs, NonZeroUsize::new(4));
        assert_eq!(config.uploader(), DEFAULT_UPLOADER);
        assert_eq!(config.remote(), "upstream");
        assert!(config.release.replace);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = GgallinConfig::parse("").unwrap();
        assert_eq!(config.declared_version(), None);
        assert_eq!(config.compiler(), DEFAULT_COMPILER);
        assert_eq!(config.uploader(), DEFAULT_UPLOADER);
        assert_eq!(config.remote(), DEFAULT_REMOTE);
        assert!(!config.release.replace);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = GgallinConfig::parse("[build]\ncompilr = \"gox\"\n").unwrap_err();
        assert!(matches!(err, GgallinError::Config { .. }));
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(GgallinConfig::parse("[build]\njobs = 0\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(GgallinConfig::load_from(temp_dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_serialize_then_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = GgallinConfig {
            package: Some(PackageConfig {
                name: Some("mytool".into()),
                version: Some("0.1.0".into()),
            }),
            ..Default::default()
        };
        std::fs::write(
            GgallinConfig::path_in(temp_dir.path()),
            config.to_toml_string().unwrap(),
        )
        .unwrap();

        let loaded = GgallinConfig::load_from(temp_dir.path()).unwrap().unwrap();
        assert_eq!(loaded, config);
    }
}
