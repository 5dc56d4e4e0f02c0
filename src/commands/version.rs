//! Version command implementation

use anyhow::Result;
use clap::Args;

/// Application name shown in version output
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// `v{version}, build {commit}`, also used for `--version`
pub const VERSION_INFO: &str = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    ", build ",
    env!("GGALLIN_GIT_COMMIT")
);

/// Print the ggallin version and the commit it was built from
#[derive(Args, Debug)]
pub struct VersionCommand {}

impl VersionCommand {
    /// Execute the version command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        println!("{}", version_line());
        Ok(())
    }
}

/// Full version line, e.g. `ggallin v0.3.0, build 1a2b3c4`
pub fn version_line() -> String {
    format!("{} {}", APP_NAME, VERSION_INFO)
}
