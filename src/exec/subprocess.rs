//! Subprocess execution utilities
//!
//! Every external collaborator (cross-compiler, uploader, git) goes through
//! here, either with inherited stdio so progress is visible live, or with
//! captured stdout when the output is needed.

use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::error::GgallinError;

/// Result of a command execution
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded
    pub success: bool,

    /// Exit code, -1 when terminated by a signal
    pub exit_code: i32,

    /// Captured stdout (empty when stdio was inherited)
    pub stdout: String,

    /// Captured stderr (empty when stdio was inherited)
    pub stderr: String,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// Create a CommandResult from an exit status
    pub fn from_status(status: ExitStatus, stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            success: status.success(),
            exit_code: status.code().unwrap_or(-1),
            stdout,
            stderr,
            duration,
        }
    }
}

/// Render a command line for logs
pub fn format_command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            line.push_str(&format!("{:?}", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// Run a command, either inheriting stdio or capturing output
pub fn run_command(program: &str, args: &[String], inherit_io: bool) -> Result<CommandResult> {
    log::debug!("running: {}", format_command_line(program, args));
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args);

    let result = if inherit_io {
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd
            .status()
            .with_context(|| format!("Failed to execute {}", program))?;
        CommandResult::from_status(status, String::new(), String::new(), start.elapsed())
    } else {
        let output = cmd
            .output()
            .with_context(|| format!("Failed to execute {}", program))?;
        CommandResult::from_status(
            output.status,
            String::from_utf8_lossy(&output.stdout).to_string(),
            String::from_utf8_lossy(&output.stderr).to_string(),
            start.elapsed(),
        )
    };

    log::debug!(
        "{} exited with code {} after {:.2?}",
        program,
        result.exit_code,
        result.duration
    );
    Ok(result)
}

/// Check if a command exists in PATH
pub fn command_exists(program: &str) -> bool {
    which::which(program).is_ok()
}

/// Fail with a hint when `program` is not installed
pub fn ensure_tool(program: &str, required_for: &str, hint: impl Into<String>) -> Result<(), GgallinError> {
    if command_exists(program) {
        Ok(())
    } else {
        Err(GgallinError::missing_tool(program, required_for, hint))
    }
}

/// Run one pipeline step with inherited stdio; a non-zero exit is an error
pub fn run_step(step: &str, program: &str, args: &[String]) -> Result<()> {
    let result = run_command(program, args, true)?;
    if !result.success {
        return Err(GgallinError::command_failed(step, program, result.exit_code).into());
    }
    Ok(())
}

/// Run a command and return its trimmed stdout, or None if it failed
pub fn capture_stdout(program: &str, args: &[String]) -> Option<String> {
    match run_command(program, args, false) {
        Ok(result) if result.success => Some(result.stdout.trim().to_string()),
        Ok(result) => {
            log::debug!("{} failed: {}", program, result.stderr.trim());
            None
        }
        Err(e) => {
            log::debug!("{:#}", e);
            None
        }
    }
}
