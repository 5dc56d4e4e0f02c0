//! Per-target ZIP archive creation
//!
//! Each immediate subdirectory of the build directory is one target platform.
//! Its top-level regular files are written into `{target}_{version}.zip`,
//! in directory enumeration order, keeping name, size, mtime and mode.
//! Nested directories are not descended into.

use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Datelike, Local, Timelike};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::package::CancellationFlag;
use crate::error::PackageError;
use crate::utils::paths::archive_file_name;

/// Permission bits used when the platform exposes none
#[cfg(not(unix))]
const DEFAULT_FILE_MODE: u32 = 0o644;

/// One compiled output set, named after its directory (e.g. `linux_amd64`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildTarget {
    pub target: String,
    pub version: String,
    pub dir: PathBuf,
}

impl BuildTarget {
    pub fn archive_name(&self) -> String {
        archive_file_name(&self.target, &self.version)
    }
}

/// A regular file to be stored in an archive
#[derive(Debug)]
struct SourceFile {
    name: String,
    path: PathBuf,
    metadata: Metadata,
}

fn walk_error(root: &Path, err: walkdir::Error) -> PackageError {
    let path = err.path().unwrap_or(root).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop detected"));
    PackageError::io(path, source)
}

/// Entry name as UTF-8; lossy conversion could make two names collide
fn utf8_name(entry: &walkdir::DirEntry) -> Result<String, PackageError> {
    entry
        .file_name()
        .to_str()
        .map(str::to_string)
        .ok_or_else(|| {
            PackageError::io(
                entry.path(),
                io::Error::new(io::ErrorKind::InvalidData, "file name is not valid UTF-8"),
            )
        })
}

/// List the immediate subdirectories of `build_dir` as build targets
pub fn discover_targets(build_dir: &Path, version: &str) -> Result<Vec<BuildTarget>, PackageError> {
    let mut targets = Vec::new();

    for entry in WalkDir::new(build_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
    {
        let entry = entry.map_err(|e| walk_error(build_dir, e))?;
        if !entry.file_type().is_dir() {
            log::debug!("skipping non-directory {}", entry.path().display());
            continue;
        }

        targets.push(BuildTarget {
            target: utf8_name(&entry)?,
            version: version.to_string(),
            dir: entry.path().to_path_buf(),
        });
    }

    Ok(targets)
}

/// Top-level regular files of a target directory, unsorted
fn list_source_files(dir: &Path) -> Result<Vec<SourceFile>, PackageError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|e| walk_error(dir, e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let metadata = entry
            .metadata()
            .map_err(|e| walk_error(entry.path(), e))?;
        files.push(SourceFile {
            name: utf8_name(&entry)?,
            path: entry.path().to_path_buf(),
            metadata,
        });
    }

    Ok(files)
}

/// Zip timestamp for a file's mtime, in local time
///
/// Zip stores DOS timestamps (1980..=2107); anything outside falls back to
/// the zip default.
fn zip_timestamp(modified: SystemTime) -> zip::DateTime {
    let local: DateTime<Local> = modified.into();
    u16::try_from(local.year())
        .ok()
        .and_then(|year| {
            zip::DateTime::from_date_and_time(
                year,
                local.month() as u8,
                local.day() as u8,
                local.hour() as u8,
                local.minute() as u8,
                local.second() as u8,
            )
            .ok()
        })
        .unwrap_or_default()
}

#[cfg(unix)]
fn file_mode(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn file_mode(_metadata: &Metadata) -> u32 {
    DEFAULT_FILE_MODE
}

fn entry_options(metadata: &Metadata) -> SimpleFileOptions {
    let mut options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(file_mode(metadata))
        .large_file(metadata.len() >= u64::from(u32::MAX));
    if let Ok(modified) = metadata.modified() {
        options = options.last_modified_time(zip_timestamp(modified));
    }
    options
}

fn write_entries(
    target: &BuildTarget,
    archive_path: &Path,
    files: &[SourceFile],
    cancel: &CancellationFlag,
) -> Result<(), PackageError> {
    let file = File::create(archive_path).map_err(|e| PackageError::io(archive_path, e))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));

    for source in files {
        if cancel.is_cancelled() {
            return Err(PackageError::Cancelled {
                target: target.target.clone(),
            });
        }

        let mut input = File::open(&source.path).map_err(|e| PackageError::io(&source.path, e))?;
        zip.start_file(source.name.as_str(), entry_options(&source.metadata))
            .map_err(|e| PackageError::zip(archive_path, e))?;
        io::copy(&mut input, &mut zip).map_err(|e| PackageError::io(&source.path, e))?;
    }

    let mut writer = zip.finish().map_err(|e| PackageError::zip(archive_path, e))?;
    io::Write::flush(&mut writer).map_err(|e| PackageError::io(archive_path, e))?;
    Ok(())
}

/// Write `{target}_{version}.zip` into `pkg_dir`
///
/// The archive is either fully written or removed. A set `cancel` flag stops
/// the task before its next entry.
pub fn write_target_archive(
    target: &BuildTarget,
    pkg_dir: &Path,
    cancel: &CancellationFlag,
) -> Result<PathBuf, PackageError> {
    if cancel.is_cancelled() {
        return Err(PackageError::Cancelled {
            target: target.target.clone(),
        });
    }

    let files = list_source_files(&target.dir)?;
    let archive_path = pkg_dir.join(target.archive_name());
    log::debug!(
        "archiving {} file(s) from {} into {}",
        files.len(),
        target.dir.display(),
        archive_path.display()
    );

    match write_entries(target, &archive_path, &files, cancel) {
        Ok(()) => Ok(archive_path),
        Err(err) => {
            if let Err(e) = fs::remove_file(&archive_path) {
                if e.kind() != io::ErrorKind::NotFound {
                    log::warn!("could not remove partial archive {}: {}", archive_path.display(), e);
                }
            }
            Err(err)
        }
    }
}
