//! Command implementations
//!
//! Each command module provides a clap-derived struct and execute method.

pub mod build;
pub mod init;
pub mod package;
pub mod release;
pub mod version;

use std::path::Path;

use anyhow::Result;

use crate::config::GgallinConfig;
use crate::utils::paths::ProjectLayout;
use crate::version::{read_version, ProjectVersion};

/// Config, version and directory layout of the project being built
#[derive(Debug)]
pub struct ProjectContext {
    pub config: GgallinConfig,
    pub version: ProjectVersion,
    pub layout: ProjectLayout,
}

impl ProjectContext {
    /// Load the project from the invocation directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(""))
    }

    /// Load the project rooted at `root`; paths in the layout stay relative
    /// to it
    pub fn load_from(root: &Path) -> Result<Self> {
        let config = GgallinConfig::load_from(root)?;
        let version = read_version(root, config.as_ref())?;
        let layout = ProjectLayout::new(root, &version);
        log::debug!(
            "project version {} (build: {}, pkg: {})",
            version,
            layout.build_dir.display(),
            layout.pkg_dir.display()
        );

        Ok(Self {
            config: config.unwrap_or_default(),
            version,
            layout,
        })
    }

    pub fn pkg_dir(&self) -> &Path {
        &self.layout.pkg_dir
    }
}
