//! Init command implementation
//!
//! Writes a Ggallin.toml declaring the project name and version, which the
//! other commands read.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::{
    BuildConfig, GgallinConfig, PackageConfig, ReleaseConfig, CONFIG_FILE_NAME, DEFAULT_COMPILER,
    DEFAULT_REMOTE, DEFAULT_UPLOADER,
};
use crate::error::GgallinError;
use crate::utils::terminal;
use crate::version::ProjectVersion;

/// Initialize a ggallin project in the current directory
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Initial project version
    #[arg(long = "project-version", default_value = "0.1.0")]
    pub project_version: String,

    /// Project name (default: current directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Overwrite an existing Ggallin.toml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        let path = self.init_in(&root)?;
        terminal::print_success(&format!("Created {}", path.display()));
        Ok(())
    }

    fn init_in(&self, root: &Path) -> Result<std::path::PathBuf> {
        let path = GgallinConfig::path_in(root);
        if path.exists() && !self.force {
            return Err(GgallinError::config_error(format!(
                "{} already exists in {} (use --force to overwrite)",
                CONFIG_FILE_NAME,
                root.display()
            ))
            .into());
        }

        let version = ProjectVersion::new(self.project_version.trim())?;
        let name = self.name.clone().or_else(|| {
            root.file_name()
                .map(|n| n.to_string_lossy().into_owned())
        });

        let config = GgallinConfig {
            package: Some(PackageConfig {
                name,
                version: Some(version.to_string()),
            }),
            build: BuildConfig {
                compiler: Some(DEFAULT_COMPILER.to_string()),
                ..Default::default()
            },
            release: ReleaseConfig {
                uploader: Some(DEFAULT_UPLOADER.to_string()),
                remote: Some(DEFAULT_REMOTE.to_string()),
                ..Default::default()
            },
        };

        std::fs::write(&path, config.to_toml_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        Ok(path)
    }
}
