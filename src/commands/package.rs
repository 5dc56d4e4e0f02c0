//! Package command implementation
//!
//! Re-packages existing build outputs without invoking the compiler.

use std::io;
use std::num::NonZeroUsize;

use anyhow::Result;
use clap::Args;

use super::ProjectContext;
use crate::build::{package, PackageOptions};
use crate::utils::terminal;

/// Zip the outputs already present in build/{version}
#[derive(Args, Debug)]
pub struct PackageCommand {
    /// Maximum number of archives written in parallel
    #[arg(short, long, env = "GGALLIN_JOBS")]
    pub jobs: Option<NonZeroUsize>,
}

impl PackageCommand {
    /// Execute the package command
    pub fn execute(self, verbose: bool) -> Result<()> {
        let ctx = ProjectContext::load()?;
        let options = PackageOptions {
            jobs: self.jobs.or(ctx.config.build.jobs),
        };

        let report = match package(
            ctx.version.as_str(),
            &ctx.layout.build_dir,
            &ctx.layout.pkg_dir,
            &options,
        ) {
            Ok(report) => report,
            Err(err) if err.io_kind() == Some(io::ErrorKind::NotFound) => {
                return Err(anyhow::Error::new(err).context(format!(
                    "no build outputs for version {} (run `ggallin build` first)",
                    ctx.version
                )));
            }
            Err(err) => return Err(err.into()),
        };

        if verbose {
            terminal::print_info(&format!(
                "{} archive(s) in {}",
                report.archives.len(),
                report.pkg_dir.display()
            ));
            for archive in &report.archives {
                terminal::print_info(&archive.display().to_string());
            }
        }
        Ok(())
    }
}
