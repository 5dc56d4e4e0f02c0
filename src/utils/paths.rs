//! Path layout of a ggallin project
//!
//! All paths are relative to the invocation directory:
//!
//! ```text
//! build/{version}/{os}_{arch}/{binary}
//! pkg/{version}/{target}_{version}.zip
//! ```

use std::path::{Path, PathBuf};

use crate::version::ProjectVersion;

/// Directory holding cross-compiler outputs
pub const BUILD_DIR_NAME: &str = "build";

/// Directory holding packaged archives
pub const PKG_DIR_NAME: &str = "pkg";

/// Build and package directories for one version of a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub build_dir: PathBuf,
    pub pkg_dir: PathBuf,
}

impl ProjectLayout {
    /// Layout rooted at `project_root`
    pub fn new(project_root: &Path, version: &ProjectVersion) -> Self {
        Self {
            build_dir: project_root.join(BUILD_DIR_NAME).join(version.as_str()),
            pkg_dir: project_root.join(PKG_DIR_NAME).join(version.as_str()),
        }
    }
}

/// Archive file name for a target, e.g. `linux_amd64_1.2.0.zip`
pub fn archive_file_name(target: &str, version: &str) -> String {
    format!("{}_{}.zip", target, version)
}

/// Remove a directory if it exists, then create it empty
pub fn recreate_dir(path: &Path) -> std::io::Result<()> {
    remove_dir_if_exists(path)?;
    std::fs::create_dir_all(path)
}

/// Remove a directory tree, treating a missing directory as success
pub fn remove_dir_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_dir_all(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
