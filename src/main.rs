//! ggallin - compose gox and ghr as all-in-one
//!
//! ## Architecture
//!
//! ```text
//! ggallin build   → version → gox → pkg (zip per platform)
//! ggallin release → build → git push → ghr
//! ```

mod build;
mod cli;
mod commands;
mod config;
mod error;
mod exec;
mod release;
mod utils;
mod version;

use clap::Parser;

use cli::Cli;
use error::GgallinError;
use utils::terminal;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = cli.execute() {
        terminal::print_error(&format!("{:#}", err));
        if let Some(hint) = err
            .chain()
            .find_map(|e| e.downcast_ref::<GgallinError>())
            .and_then(GgallinError::hint)
        {
            terminal::print_hint(hint);
        }
        std::process::exit(1);
    }
}
