//! Concurrent packaging of build outputs
//!
//! One task per discovered target runs on a bounded rayon pool. The call
//! returns only after every task has reported back, so no partial set of
//! archives is ever observable by the caller.
//!
//! Failure contract:
//! - the first failing task sets a shared [`CancellationFlag`]
//! - tasks that have not started yet, and running tasks before their next
//!   entry, stop and delete their own partial archive
//! - once all tasks are back, every archive written in this run is removed
//!   and the first root-cause error is returned

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use super::archive::{self, BuildTarget};
use crate::error::PackageError;
use crate::utils::paths::recreate_dir;
use crate::utils::terminal;

/// Shared stop signal for sibling packaging tasks
#[derive(Debug, Default)]
pub struct CancellationFlag(AtomicBool);

impl CancellationFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Packaging options
#[derive(Debug, Clone, Default)]
pub struct PackageOptions {
    /// Maximum number of archives written at once (default: available CPUs)
    pub jobs: Option<NonZeroUsize>,
}

impl PackageOptions {
    pub fn jobs(&self) -> usize {
        self.jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

/// Archives produced by a successful packaging run
#[derive(Debug, Clone)]
pub struct PackageReport {
    pub pkg_dir: PathBuf,
    /// Archive paths in target discovery order
    pub archives: Vec<PathBuf>,
}

/// Package every target directory under `build_dir` into `pkg_dir`
///
/// `pkg_dir` is recreated from scratch. One `{target}_{version}.zip` is
/// written per immediate subdirectory of `build_dir`.
pub fn package(
    version: &str,
    build_dir: &Path,
    pkg_dir: &Path,
    options: &PackageOptions,
) -> Result<PackageReport, PackageError> {
    recreate_dir(pkg_dir).map_err(|e| PackageError::io(pkg_dir, e))?;

    let targets = archive::discover_targets(build_dir, version)?;
    let jobs = options.jobs();
    log::debug!(
        "packaging {} target(s) from {} with {} worker(s)",
        targets.len(),
        build_dir.display(),
        jobs
    );

    let pool = ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("ggallin-pkg-{}", i))
        .build()?;

    let cancel = CancellationFlag::default();
    let progress = terminal::create_progress_bar(targets.len() as u64, "Packaging");

    let results: Vec<Result<PathBuf, PackageError>> = pool.install(|| {
        targets
            .par_iter()
            .map(|target| {
                let result = archive::write_target_archive(target, pkg_dir, &cancel);
                if let Err(err) = &result {
                    if !err.is_cancelled() {
                        log::debug!("packaging {} failed: {}", target.target, err);
                        cancel.cancel();
                    }
                }
                progress.inc(1);
                result
            })
            .collect()
    });
    progress.finish_and_clear();

    let archives = settle(&targets, results)?;
    eprintln!("Package files created into {}", pkg_dir.display());

    Ok(PackageReport {
        pkg_dir: pkg_dir.to_path_buf(),
        archives,
    })
}

/// Turn per-task results into the run outcome, cleaning up on failure
fn settle(
    targets: &[BuildTarget],
    results: Vec<Result<PathBuf, PackageError>>,
) -> Result<Vec<PathBuf>, PackageError> {
    let mut archives = Vec::with_capacity(results.len());
    let mut root_cause = None;
    let mut cancelled = None;

    for result in results {
        match result {
            Ok(path) => archives.push(path),
            Err(err) if err.is_cancelled() => {
                cancelled.get_or_insert(err);
            }
            Err(err) => {
                root_cause.get_or_insert(err);
            }
        }
    }

    match root_cause.or(cancelled) {
        None => Ok(archives),
        Some(err) => {
            log::debug!(
                "removing {} archive(s) of {} target(s) after failure",
                archives.len(),
                targets.len()
            );
            for path in &archives {
                if let Err(e) = std::fs::remove_file(path) {
                    log::warn!("could not remove {}: {}", path.display(), e);
                }
            }
            Err(err)
        }
    }
}
