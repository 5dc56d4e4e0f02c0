//! CLI argument parsing using clap derive macros

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{
    build::BuildCommand, init::InitCommand, package::PackageCommand, release::ReleaseCommand,
    version::{VersionCommand, VERSION_INFO},
};
use crate::utils::logging;

/// ggallin - compose gox and ghr as all-in-one
///
/// Cross-compiles a Go project, zips each target platform and publishes the
/// archives as a GitHub release.
#[derive(Parser, Debug)]
#[command(name = "ggallin")]
#[command(author, version = VERSION_INFO, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output (same as DEBUG=1)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create Ggallin.toml in the current directory
    Init(InitCommand),

    /// Cross-compile and package
    Build(BuildCommand),

    /// Package existing build outputs without compiling
    Package(PackageCommand),

    /// Build, package, push and publish a release
    Release(ReleaseCommand),

    /// Show version information
    Version(VersionCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        logging::init(self.verbose);

        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        match self.command {
            Commands::Init(cmd) => cmd.execute(self.verbose),
            Commands::Build(cmd) => cmd.execute(self.verbose),
            Commands::Package(cmd) => cmd.execute(self.verbose),
            Commands::Release(cmd) => cmd.execute(self.verbose),
            Commands::Version(cmd) => cmd.execute(self.verbose),
        }
    }
}
