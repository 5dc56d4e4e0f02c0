//! Build command implementation

use std::num::NonZeroUsize;

use anyhow::Result;
use clap::Args;

use super::ProjectContext;
use crate::build::{compile, package, CompileOptions, PackageOptions, PlatformFilters};
use crate::utils::terminal;

/// Platform and concurrency flags shared by `build` and `release`
#[derive(Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Space-separated list of operating systems to build for
    #[arg(long)]
    pub os: Option<String>,

    /// Space-separated list of architectures to build for
    #[arg(long)]
    pub arch: Option<String>,

    /// Space-separated list of os/arch pairs to build for
    #[arg(long)]
    pub osarch: Option<String>,

    /// Maximum number of archives written in parallel
    #[arg(short, long, env = "GGALLIN_JOBS")]
    pub jobs: Option<NonZeroUsize>,
}

impl BuildArgs {
    fn filters(&self) -> PlatformFilters {
        PlatformFilters {
            os: self.os.clone(),
            arch: self.arch.clone(),
            osarch: self.osarch.clone(),
        }
    }
}

/// Cross-compile and package the project
#[derive(Args, Debug)]
pub struct BuildCommand {
    #[command(flatten)]
    pub args: BuildArgs,
}

impl BuildCommand {
    /// Execute the build command
    pub fn execute(self, _verbose: bool) -> Result<()> {
        let ctx = ProjectContext::load()?;
        run_build_pipeline(&ctx, &self.args)
    }
}

/// Version → compile → package, shared with the release command
pub fn run_build_pipeline(ctx: &ProjectContext, args: &BuildArgs) -> Result<()> {
    let compile_options = CompileOptions {
        compiler: ctx.config.compiler().to_string(),
        filters: PlatformFilters::merged(&args.filters(), &ctx.config.build),
    };

    terminal::print_step(&format!("Building version {}", ctx.version));
    compile(ctx.version.as_str(), &ctx.layout.build_dir, &compile_options)?;

    terminal::print_step("Packaging");
    let package_options = PackageOptions {
        jobs: args.jobs.or(ctx.config.build.jobs),
    };
    package(
        ctx.version.as_str(),
        &ctx.layout.build_dir,
        &ctx.layout.pkg_dir,
        &package_options,
    )?;
    Ok(())
}
