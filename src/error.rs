//! Error types and helpers for user-friendly error messages
//!
//! `GgallinError` covers the failures a user can act on (bad config, missing
//! tools, failed subprocesses). `PackageError` is the typed error of the
//! packaging stage so callers and tests can inspect what went wrong.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors with an optional hint for the user
#[derive(Error, Debug)]
pub enum GgallinError {
    /// Configuration file errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
        hint: Option<String>,
    },

    /// The project version could not be determined
    #[error("Version error: {message}")]
    Version { message: String, hint: String },

    /// Git repository state prevents the release
    #[error("Repository error: {message}")]
    Repository { message: String, hint: String },

    /// Tool/executable not found on PATH
    #[error("Missing tool: {tool} (required for {required_for})")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// External command exited unsuccessfully
    #[error("{step} failed: `{program}` exited with code {exit_code}")]
    CommandFailed {
        step: String,
        program: String,
        exit_code: i32,
    },
}

impl GgallinError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<toml::de::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a version error
    pub fn version_error(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Version {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create a repository error
    pub fn repository_error(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a failed command error
    pub fn command_failed(step: impl Into<String>, program: impl Into<String>, exit_code: i32) -> Self {
        Self::CommandFailed {
            step: step.into(),
            program: program.into(),
            exit_code,
        }
    }

    /// Hint to show below the error message, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            GgallinError::Config { hint, .. } => hint.as_deref(),
            GgallinError::Version { hint, .. }
            | GgallinError::Repository { hint, .. }
            | GgallinError::MissingTool { hint, .. } => Some(hint.as_str()),
            GgallinError::CommandFailed { .. } => None,
        }
    }
}

/// Errors raised while packaging build outputs into zip archives
#[derive(Error, Debug)]
pub enum PackageError {
    /// Filesystem error on a specific path
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Zip writer error on a specific archive
    #[error("failed to write archive {}", path.display())]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Task stopped because a sibling task failed first
    #[error("packaging of `{target}` was cancelled after another target failed")]
    Cancelled { target: String },

    /// Worker pool could not be created
    #[error("failed to start packaging workers")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl PackageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn zip(path: impl Into<PathBuf>, source: zip::result::ZipError) -> Self {
        Self::Zip {
            path: path.into(),
            source,
        }
    }

    /// True if this error only reports cancellation, not a root cause
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PackageError::Cancelled { .. })
    }

    /// The underlying I/O error kind, when there is one
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            PackageError::Io { source, .. } => Some(source.kind()),
            PackageError::Zip {
                source: zip::result::ZipError::Io(source),
                ..
            } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Common error hints for missing tools and project setup
pub mod hints {
    /// Hint for missing gox
    pub fn gox() -> &'static str {
        "Install gox with:\n\
         • go install github.com/mitchellh/gox@latest\n\
         \n\
         Or set [build] compiler in Ggallin.toml to another cross-compiler."
    }

    /// Hint for missing ghr
    pub fn ghr() -> &'static str {
        "Install ghr with:\n\
         • go install github.com/tcnksm/ghr@latest\n\
         \n\
         ghr reads the GitHub token from GITHUB_TOKEN or `git config github.token`."
    }

    /// Hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git\n\
         • Windows: winget install Git.Git"
    }

    /// Hint for a project without a version declaration
    pub fn version_not_found() -> &'static str {
        "Could not find a version declaration in the current directory.\n\
         \n\
         Declare one of:\n\
         • Ggallin.toml with [package] version = \"1.0.0\"\n\
         • a VERSION file containing the version\n\
         \n\
         Or run: ggallin init"
    }

    /// Hint for invalid Ggallin.toml
    pub fn invalid_ggallin_toml() -> &'static str {
        "Ggallin.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • Unknown keys in [package], [build] or [release]\n\
         • jobs must be a positive integer"
    }

    /// Hint for a custom compiler or uploader that is not on PATH
    pub fn generic_tool(tool: &str) -> String {
        format!("Make sure `{}` is installed and available on PATH.", tool)
    }
}
