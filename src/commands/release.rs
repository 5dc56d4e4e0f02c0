//! Release command implementation

use anyhow::Result;
use clap::Args;

use super::build::{run_build_pipeline, BuildArgs};
use super::ProjectContext;
use crate::release::{git_push, release, PushOptions, ReleaseOptions};
use crate::utils::terminal;

/// Build, package, push and publish the project
#[derive(Args, Debug)]
pub struct ReleaseCommand {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Replace assets if the release already has them
    #[arg(long)]
    pub replace: bool,

    /// GitHub username passed to the uploader
    #[arg(short, long)]
    pub username: Option<String>,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let ctx = ProjectContext::load()?;
        run_build_pipeline(&ctx, &self.build)?;

        let push_options = PushOptions {
            remote: ctx.config.remote().to_string(),
        };
        terminal::print_step(&format!("Pushing to {}", push_options.remote));
        git_push(&push_options)?;

        let release_options = ReleaseOptions::merged(self.replace, self.username, &ctx.config);
        terminal::print_step(&format!("Publishing {}", ctx.version.tag()));
        release(&ctx.version, ctx.pkg_dir(), &release_options)?;

        terminal::print_success(&format!("Released {}", ctx.version.tag()));
        Ok(())
    }
}
