//! Terminal output utilities
//!
//! Status lines go to stderr so stdout stays free for the `version` output.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("{}: {}", style("error").red().bold(), message);
}

/// Print a hint below an error
pub fn print_hint(message: &str) {
    eprintln!("{}: {}", style("hint").yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{}: {}", style("success").green().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{}: {}", style("info").blue().bold(), message);
}

/// Print a pipeline step header, e.g. `==> Packaging`
pub fn print_step(message: &str) {
    eprintln!("{} {}", style("==>").cyan().bold(), style(message).bold());
}

/// Create a progress bar with a known length
///
/// indicatif hides the bar when stderr is not a terminal.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let bar_style = ProgressStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")
        .map(|s| s.progress_chars("=>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(bar_style);
    pb.set_message(message.to_string());
    pb
}
