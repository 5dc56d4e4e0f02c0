//! Repository push before publishing
//!
//! The release tag is created by the uploader on the remote, so the commit it
//! points at has to be pushed first.

use anyhow::Result;

use crate::config::DEFAULT_REMOTE;
use crate::error::{hints, GgallinError};
use crate::exec::subprocess::{capture_stdout, ensure_tool, run_step};

/// Push options
#[derive(Debug, Clone)]
pub struct PushOptions {
    pub remote: String,
}

impl Default for PushOptions {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
        }
    }
}

/// Arguments for `git push <remote> <branch>`
pub fn push_args(remote: &str, branch: &str) -> Vec<String> {
    vec!["push".to_string(), remote.to_string(), branch.to_string()]
}

/// Validate the output of `git rev-parse --abbrev-ref HEAD`
pub fn parse_branch(raw: Option<String>) -> Result<String, GgallinError> {
    match raw.map(|b| b.trim().to_string()) {
        Some(branch) if !branch.is_empty() && branch != "HEAD" => Ok(branch),
        Some(_) => Err(GgallinError::repository_error(
            "HEAD is detached, there is no branch to push",
            "Check out the branch you want to release, e.g. `git checkout main`.",
        )),
        None => Err(GgallinError::repository_error(
            "could not determine the current git branch",
            "Run ggallin release from inside a git repository with at least one commit.",
        )),
    }
}

/// Current branch name
pub fn current_branch() -> Result<String, GgallinError> {
    parse_branch(capture_stdout(
        "git",
        &[
            "rev-parse".to_string(),
            "--abbrev-ref".to_string(),
            "HEAD".to_string(),
        ],
    ))
}

/// Push the current branch to the configured remote
pub fn git_push(options: &PushOptions) -> Result<()> {
    ensure_tool("git", "pushing the repository", hints::git())?;

    let branch = current_branch()?;
    log::debug!("pushing {} to {}", branch, options.remote);
    run_step("git push", "git", &push_args(&options.remote, &branch))
}
