//! Release asset upload through ghr (or a compatible tool)

use std::path::Path;

use anyhow::Result;

use crate::config::{GgallinConfig, DEFAULT_UPLOADER};
use crate::error::hints;
use crate::exec::subprocess::{ensure_tool, run_step};
use crate::version::ProjectVersion;

/// Uploader options
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    pub uploader: String,
    /// Replace assets that already exist on the release
    pub replace: bool,
    pub username: Option<String>,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            uploader: DEFAULT_UPLOADER.to_string(),
            replace: false,
            username: None,
        }
    }
}

impl ReleaseOptions {
    /// Command-line values take precedence over [release] config
    pub fn merged(replace: bool, username: Option<String>, config: &GgallinConfig) -> Self {
        Self {
            uploader: config.uploader().to_string(),
            replace: replace || config.release.replace,
            username: username
                .or_else(|| config.release.username.clone())
                .filter(|u| !u.is_empty()),
        }
    }
}

/// Arguments for `ghr [--username u] [--replace] v<version> <pkg_dir>`
pub fn release_args(version: &ProjectVersion, pkg_dir: &Path, options: &ReleaseOptions) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(username) = &options.username {
        args.push("--username".to_string());
        args.push(username.clone());
    }
    if options.replace {
        args.push("--replace".to_string());
    }

    args.push(version.tag());
    args.push(pkg_dir.to_string_lossy().into_owned());
    args
}

/// Upload every archive in `pkg_dir` as assets of release `v<version>`
pub fn release(version: &ProjectVersion, pkg_dir: &Path, options: &ReleaseOptions) -> Result<()> {
    let hint = if options.uploader == DEFAULT_UPLOADER {
        hints::ghr().to_string()
    } else {
        hints::generic_tool(&options.uploader)
    };
    ensure_tool(&options.uploader, "publishing the release", hint)?;

    log::debug!("publishing {} from {}", version.tag(), pkg_dir.display());
    run_step(
        "Release",
        &options.uploader,
        &release_args(version, pkg_dir, options),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReleaseConfig;

    #[test]
    fn test_release_args_minimal() {
        let version = ProjectVersion::new("1.2.0").unwrap();
        let args = release_args(&version, Path::new("pkg/1.2.0"), &ReleaseOptions::default());
        assert_eq!(args, vec!["v1.2.0", "pkg/1.2.0"]);
    }

    #[test]
    fn test_release_args_with_options() {
        let version = ProjectVersion::new("1.2.0").unwrap();
        let options = ReleaseOptions {
            replace: true,
            username: Some("octocat".into()),
            ..Default::default()
        };
        let args = release_args(&version, Path::new("pkg/1.2.0"), &options);
        assert_eq!(
            args,
            vec!["--username", "octocat", "--replace", "v1.2.0", "pkg/1.2.0"]
        );
    }

    #[test]
    fn test_merged_options() {
        let config = GgallinConfig {
            release: ReleaseConfig {
                uploader: Some("my-ghr".into()),
                username: Some("from-config".into()),
                replace: true,
                remote: None,
            },
            ..Default::default()
        };

        let options = ReleaseOptions::merged(false, Some("from-cli".into()), &config);
        assert_eq!(options.uploader, "my-ghr");
        assert_eq!(options.username.as_deref(), Some("from-cli"));
        assert!(options.replace);

        let options = ReleaseOptions::merged(false, None, &GgallinConfig::default());
        assert_eq!(options.uploader, DEFAULT_UPLOADER);
        assert_eq!(options.username, None);
        assert!(!options.replace);
    }
}
