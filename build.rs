// build.rs: embed the short git revision as `GGALLIN_GIT_COMMIT` so the
// `version` command can report which commit the binary was built from.

use std::fs;
use std::path::Path;
use std::process::Command;

fn main() {
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=GGALLIN_GIT_COMMIT={commit}");
    println!("cargo:rerun-if-changed=build.rs");

    let git_dir = Path::new(".git");
    println!("cargo:rerun-if-changed=.git/HEAD");
    // New commits on the current branch only touch the branch ref
    if let Ok(head) = fs::read_to_string(git_dir.join("HEAD")) {
        if let Some(reference) = head.trim().strip_prefix("ref: ") {
            for watched in [git_dir.join(reference), git_dir.join("packed-refs")] {
                if watched.exists() {
                    println!("cargo:rerun-if-changed={}", watched.display());
                }
            }
        }
    }
}
