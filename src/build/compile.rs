//! Cross-compiler invocation
//!
//! Runs gox (or a compatible tool) with an output template that expands to
//! `build/{version}/{OS}_{Arch}/{binary}`, so every target platform lands in
//! its own directory for the packager.

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::{BuildConfig, DEFAULT_COMPILER};
use crate::error::hints;
use crate::exec::subprocess::{capture_stdout, ensure_tool, run_step};
use crate::utils::paths::remove_dir_if_exists;

/// Per-platform directory and binary template understood by gox
pub const OUTPUT_TEMPLATE: &str = "{{.OS}}_{{.Arch}}/{{.Dir}}";

/// Linker variable that receives the commit hash
pub const COMMIT_LDFLAG_VAR: &str = "main.GitCommit";

/// Space-separated platform filters forwarded verbatim to the compiler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformFilters {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub osarch: Option<String>,
}

impl PlatformFilters {
    /// Command-line filters, falling back to the [build] config per field
    pub fn merged(cli: &PlatformFilters, config: &BuildConfig) -> Self {
        fn pick(cli: &Option<String>, config: &Option<String>) -> Option<String> {
            cli.clone()
                .or_else(|| config.clone())
                .filter(|value| !value.trim().is_empty())
        }

        Self {
            os: pick(&cli.os, &config.os),
            arch: pick(&cli.arch, &config.arch),
            osarch: pick(&cli.osarch, &config.osarch),
        }
    }
}

/// Compiler invocation options
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub compiler: String,
    pub filters: PlatformFilters,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            compiler: DEFAULT_COMPILER.to_string(),
            filters: PlatformFilters::default(),
        }
    }
}

/// Arguments passed to the cross-compiler
pub fn compile_args(build_dir: &Path, commit: Option<&str>, filters: &PlatformFilters) -> Vec<String> {
    let mut args = Vec::new();

    if let Some(commit) = commit {
        args.push("-ldflags".to_string());
        args.push(format!("-X {}={}", COMMIT_LDFLAG_VAR, commit));
    }

    args.push("-output".to_string());
    args.push(
        build_dir
            .join(OUTPUT_TEMPLATE)
            .to_string_lossy()
            .into_owned(),
    );

    for (flag, value) in [
        ("-os", &filters.os),
        ("-arch", &filters.arch),
        ("-osarch", &filters.osarch),
    ] {
        if let Some(value) = value {
            args.push(flag.to_string());
            args.push(value.clone());
        }
    }

    args
}

/// Commit identifier from `git describe --always`, if available
pub fn commit_hash() -> Option<String> {
    let hash = capture_stdout("git", &["describe".to_string(), "--always".to_string()])
        .filter(|hash| !hash.is_empty());
    if hash.is_none() {
        log::debug!("no git revision available, building without {}", COMMIT_LDFLAG_VAR);
    }
    hash
}

/// Cross-compile every selected platform into `build_dir`
///
/// Any previous contents of `build_dir` are removed first.
pub fn compile(version: &str, build_dir: &Path, options: &CompileOptions) -> Result<()> {
    let hint = if options.compiler == DEFAULT_COMPILER {
        hints::gox().to_string()
    } else {
        hints::generic_tool(&options.compiler)
    };
    ensure_tool(&options.compiler, "cross-compilation", hint)?;

    remove_dir_if_exists(build_dir)
        .with_context(|| format!("Failed to remove {}", build_dir.display()))?;

    let commit = commit_hash();
    let args = compile_args(build_dir, commit.as_deref(), &options.filters);
    log::debug!("compiling version {} into {}", version, build_dir.display());

    run_step("Cross-compilation", &options.compiler, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GgallinError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_args_with_commit_and_filters() {
        let filters = PlatformFilters {
            os: Some("linux darwin".into()),
            arch: None,
            osarch: Some("windows/amd64".into()),
        };
        let args = compile_args(Path::new("build/1.2.0"), Some("a1b2c3d"), &filters);

        let output = PathBuf::from("build/1.2.0")
            .join(OUTPUT_TEMPLATE)
            .to_string_lossy()
            .into_owned();
        assert_eq!(
            args,
            vec![
                "-ldflags".to_string(),
                "-X main.GitCommit=a1b2c3d".to_string(),
                "-output".to_string(),
                output,
                "-os".to_string(),
                "linux darwin".to_string(),
                "-osarch".to_string(),
                "windows/amd64".to_string(),
            ]
        );
    }

    #[test]
    fn test_args_without_commit() {
        let args = compile_args(Path::new("out"), None, &PlatformFilters::default());
        assert_eq!(args.len(), 2);
        assert_eq!(args[0], "-output");
    }

    #[test]
    fn test_filters_cli_overrides_config() {
        let cli = PlatformFilters {
            os: Some("linux".into()),
            arch: Some("".into()),
            osarch: None,
        };
        let config = BuildConfig {
            os: Some("darwin".into()),
            arch: Some("amd64".into()),
            osarch: Some("linux/arm".into()),
            ..Default::default()
        };

        let merged = PlatformFilters::merged(&cli, &config);
        assert_eq!(merged.os.as_deref(), Some("linux"));
        // an explicitly empty flag disables the filter
        assert_eq!(merged.arch, None);
        assert_eq!(merged.osarch.as_deref(), Some("linux/arm"));
    }

    #[test]
    fn test_missing_compiler_keeps_build_dir() {
        let temp_dir = TempDir::new().unwrap();
        let build_dir = temp_dir.path().join("build");
        std::fs::create_dir_all(&build_dir).unwrap();

        let options = CompileOptions {
            compiler: "ggallin-no-such-compiler".into(),
            ..Default::default()
        };
        let err = compile("1.0.0", &build_dir, &options).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<GgallinError>(),
            Some(GgallinError::MissingTool { .. })
        ));
        assert!(build_dir.is_dir());
    }
}
