//! Safe copy-and-rename helper:
//! - Streams the source into a hidden temp file in the destination directory
//! - Fsyncs the temp file before it becomes visible
//! - Atomically renames temp -> dest, replacing any existing file
//!
//! Downstream consumers watching the destination only ever see complete files.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::{io_error_with_help, io_error_with_help_io};
use super::util;

/// Copy `src` -> `dst` using buffered I/O, then fsync the destination.
/// `dst` is created with `create_new(true)` so an existing file is never clobbered here.
/// Permissions are carried over from the source.
pub(super) fn copy_streaming(src: &Path, dst: &Path) -> io::Result<u64> {
    const BUF_SIZE: usize = 1024 * 1024;

    let src_f = File::open(src).map_err(io_error_with_help_io("open source", src))?;
    let perms = src_f.metadata()?.permissions();
    let dst_f = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(io_error_with_help_io("create temporary file", dst))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    let dst_f = writer.into_inner().map_err(|e| e.into_error())?;
    dst_f.sync_all()?;
    fs::set_permissions(dst, perms)?;
    Ok(bytes)
}

/// Copy src -> temp in dest dir, then atomic rename temp -> dest.
pub fn safe_copy_and_rename(src: &Path, dest: &Path) -> Result<u64> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    let bytes = match copy_streaming(src, &tmp_path) {
        Ok(b) => b,
        Err(e) => {
            let _ = fs::remove_file(&tmp_path);
            return Err(e).with_context(|| format!("copy '{}' to temporary file", src.display()));
        }
    };

    if let Err(e) = try_atomic_move(&tmp_path, dest) {
        // Best-effort cleanup of the temp file on failure.
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }

    Ok(bytes)
}
