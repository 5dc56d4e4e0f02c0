//! Logger setup
//!
//! `DEBUG` set to any non-empty value, or `--verbose`, turns on debug logs.
//! Otherwise `RUST_LOG` is honored, defaulting to warnings only.

use env_logger::Env;
use log::LevelFilter;

/// Environment variable that enables debug logging
pub const DEBUG_ENV: &str = "DEBUG";

/// Whether debug logging was requested
pub fn debug_requested(verbose: bool, debug_var: Option<&str>) -> bool {
    verbose || debug_var.is_some_and(|v| !v.is_empty())
}

/// Initialize the global logger; later calls are ignored
pub fn init(verbose: bool) {
    let debug_var = std::env::var(DEBUG_ENV).ok();
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
    if debug_requested(verbose, debug_var.as_deref()) {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.try_init();
}
