//! Per-file staging.
//! For each selected file: compute the destination name, apply the overwrite
//! policy, then move or copy. A failure is recorded for that file only and the
//! batch carries on; nothing is retried.

use anyhow::{anyhow, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{Prefix, StageMode, StagingOptions};
use crate::shutdown;

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename;
use super::helpers::io_error_with_help;
use super::util::is_cross_device;

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingOutcome {
    Moved,
    Copied,
    /// Destination already existed and clobbering was off.
    SkippedExisting,
    /// Dry-run: the file would have been staged with this mode.
    Planned(StageMode),
    Failed(String),
}

impl StagingOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, StagingOutcome::Failed(_))
    }
}

/// Outcome of staging one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub source: PathBuf,
    pub dest: PathBuf,
    pub outcome: StagingOutcome,
}

/// Per-outcome counters for the end-of-run summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageSummary {
    pub moved: usize,
    pub copied: usize,
    pub skipped: usize,
    pub planned: usize,
    pub failed: usize,
}

impl StageSummary {
    pub fn from_results(results: &[StagedFile]) -> Self {
        let mut s = StageSummary::default();
        for r in results {
            match r.outcome {
                StagingOutcome::Moved => s.moved += 1,
                StagingOutcome::Copied => s.copied += 1,
                StagingOutcome::SkippedExisting => s.skipped += 1,
                StagingOutcome::Planned(_) => s.planned += 1,
                StagingOutcome::Failed(_) => s.failed += 1,
            }
        }
        s
    }

    pub fn total(&self) -> usize {
        self.moved + self.copied + self.skipped + self.planned + self.failed
    }
}

/// Destination path for `file`: `dest_dir/<prefix><basename>`.
pub fn destination_for(file: &Path, dest_dir: &Path, prefix: &Prefix) -> Result<PathBuf> {
    let name = file
        .file_name()
        .ok_or_else(|| anyhow!("Source file missing a file name: {}", file.display()))?;
    if prefix.is_empty() {
        return Ok(dest_dir.join(name));
    }
    let mut prefixed = std::ffi::OsString::from(prefix.as_str());
    prefixed.push(name);
    Ok(dest_dir.join(prefixed))
}

/// Move one file, falling back to copy + remove when source and destination
/// live on different filesystems.
pub fn move_file(src: &Path, dest: &Path) -> Result<()> {
    match try_atomic_move(src, dest) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dest = %dest.display(), "cross-device move; copying instead");
            safe_copy_and_rename(src, dest)?;
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(())
        }
        Err(e) => Err(io_error_with_help("rename into destination", dest)(e)),
    }
}

/// Move one file without ever replacing an existing destination entry.
/// Returns `Ok(false)` if the destination appeared before the link was made.
/// Falls back to [`move_file`] where hard links are unavailable (other
/// filesystem, unsupported).
pub fn move_file_no_clobber(src: &Path, dest: &Path) -> Result<bool> {
    match fs::hard_link(src, dest) {
        Ok(()) => {
            fs::remove_file(src).map_err(io_error_with_help("remove original file", src))?;
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => {
            debug!(src = %src.display(), dest = %dest.display(), error = %e, "hard link failed; renaming instead");
            move_file(src, dest)?;
            Ok(true)
        }
    }
}

/// True if anything occupies `dest`, including a dangling symlink.
fn dest_entry_exists(dest: &Path) -> bool {
    fs::symlink_metadata(dest).is_ok()
}

/// Copy one file into place, keeping the source.
pub fn copy_file(src: &Path, dest: &Path) -> Result<()> {
    safe_copy_and_rename(src, dest).map(|_| ())
}

fn stage_one(src: &Path, dest: &Path, options: &StagingOptions) -> Result<StagingOutcome> {
    if dest_entry_exists(dest) {
        if !options.clobber {
            info!(src = %src.display(), dest = %dest.display(), "Destination exists; skipping");
            return Ok(StagingOutcome::SkippedExisting);
        }
        warn!(dest = %dest.display(), "Destination exists; overwriting (clobber)");
    }

    if options.dry_run {
        info!(src = %src.display(), dest = %dest.display(), mode = %options.mode, "dry-run: would stage file");
        return Ok(StagingOutcome::Planned(options.mode));
    }

    match options.mode {
        StageMode::Move if !options.clobber => {
            if move_file_no_clobber(src, dest)? {
                Ok(StagingOutcome::Moved)
            } else {
                info!(src = %src.display(), dest = %dest.display(), "Destination appeared; skipping");
                Ok(StagingOutcome::SkippedExisting)
            }
        }
        StageMode::Move => {
            move_file(src, dest)?;
            Ok(StagingOutcome::Moved)
        }
        StageMode::Copy => {
            copy_file(src, dest)?;
            Ok(StagingOutcome::Copied)
        }
    }
}

/// Stage every file in order. Stops early (leaving the rest untouched) if a
/// shutdown was requested; otherwise every file gets an outcome.
pub fn stage(files: &[PathBuf], dest_dir: &Path, options: &StagingOptions) -> Vec<StagedFile> {
    let mut results = Vec::with_capacity(files.len());

    for src in files {
        if shutdown::is_requested() {
            warn!(
                remaining = files.len() - results.len(),
                "Shutdown requested; leaving remaining files untouched"
            );
            break;
        }

        let dest = match destination_for(src, dest_dir, &options.prefix) {
            Ok(d) => d,
            Err(e) => {
                warn!(src = %src.display(), error = %e, "Cannot stage file");
                results.push(StagedFile {
                    source: src.clone(),
                    dest: dest_dir.to_path_buf(),
                    outcome: StagingOutcome::Failed(e.to_string()),
                });
                continue;
            }
        };

        let outcome = match stage_one(src, &dest, options) {
            Ok(o) => o,
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(src = %src.display(), dest = %dest.display(), error = %reason, "Staging failed");
                StagingOutcome::Failed(reason)
            }
        };
        if matches!(outcome, StagingOutcome::Moved | StagingOutcome::Copied) {
            info!(src = %src.display(), dest = %dest.display(), mode = %options.mode, "Staged file");
        }
        results.push(StagedFile {
            source: src.clone(),
            dest,
            outcome,
        });
    }

    results
}
