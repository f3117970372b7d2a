//! Candidate enumeration.
//! - Directory sources expand to their immediate `*.todo` children.
//! - Explicit file sources pass through unchanged.
//! - The concatenation is truncated to the batch size.
//!
//! Notes:
//! - Directory matches come first (directory argument order), then explicit files.
//! - Children are visited in file-name order so batches do not depend on the
//!   platform's raw listing order.
//! - Truncation is lazy: directories past the cutoff are never listed.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::{BatchSize, TODO_EXTENSION};

use super::classify::ClassifiedSources;

/// True when the file name carries the todo extension (ASCII case-insensitive).
/// Dotfiles such as `.todo` have no extension and do not match.
pub fn has_todo_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TODO_EXTENSION))
}

/// Immediate regular-file children of `dir` with the todo extension, sorted by name.
pub fn todo_files_in(dir: &Path) -> impl Iterator<Item = Result<PathBuf>> + '_ {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(e) if is_regular_file(&e) && has_todo_extension(e.path()) => {
                Some(Ok(e.into_path()))
            }
            Ok(_) => None,
            Err(e) => Some(Err::<PathBuf, _>(e).with_context(|| {
                format!("list source directory '{}'", dir.display())
            })),
        })
}

/// Regular file, or a symlink that resolves to one. Dangling links are skipped.
fn is_regular_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
}

/// Flatten classified sources into the candidate list, bounded by `batch_size`.
pub fn enumerate(classified: &ClassifiedSources, batch_size: BatchSize) -> Result<Vec<PathBuf>> {
    let from_dirs = classified.directories.iter().flat_map(|d| todo_files_in(d));
    let from_files = classified.files.iter().cloned().map(Ok);
    let all = from_dirs.chain(from_files);

    let files = match batch_size.limit() {
        Some(n) => all.take(n).collect::<Result<Vec<_>>>()?,
        None => all.collect::<Result<Vec<_>>>()?,
    };

    debug!(
        count = files.len(),
        batch_size = %batch_size,
        "enumerated candidate todo files"
    );
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::classify::classify;
    use assert_fs::prelude::*;
    use std::num::NonZeroUsize;

    fn limited(n: usize) -> BatchSize {
        BatchSize::Limited(NonZeroUsize::new(n).unwrap())
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn filters_by_extension_before_batching() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("W342.todo").touch().unwrap();
        temp.child("notes.txt").touch().unwrap();
        temp.child("W341.todo").touch().unwrap();

        let c = classify([temp.path()]);
        let files = enumerate(&c, limited(5)).unwrap();
        assert_eq!(names(&files), vec!["W341.todo", "W342.todo"]);
    }

    #[test]
    fn extension_match_is_case_insensitive_and_skips_subdirs() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("UPPER.TODO").touch().unwrap();
        temp.child("dir.todo").create_dir_all().unwrap();
        temp.child("nested").create_dir_all().unwrap();
        temp.child("nested").child("deep.todo").touch().unwrap();
        temp.child(".todo").touch().unwrap();

        let c = classify([temp.path()]);
        let files = enumerate(&c, BatchSize::All).unwrap();
        assert_eq!(names(&files), vec!["UPPER.TODO"]);
    }

    #[test]
    fn truncates_to_min_of_batch_and_total() {
        let temp = assert_fs::TempDir::new().unwrap();
        for i in 0..12 {
            temp.child(format!("W{i:02}.todo")).touch().unwrap();
        }
        let c = classify([temp.path()]);

        assert_eq!(enumerate(&c, limited(5)).unwrap().len(), 5);
        assert_eq!(enumerate(&c, limited(50)).unwrap().len(), 12);
        assert_eq!(enumerate(&c, BatchSize::All).unwrap().len(), 12);

        let first = enumerate(&c, limited(3)).unwrap();
        assert_eq!(names(&first), vec!["W00.todo", "W01.todo", "W02.todo"]);
    }

    #[test]
    fn directories_precede_explicit_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dir = temp.child("inbox");
        dir.create_dir_all().unwrap();
        dir.child("B.todo").touch().unwrap();
        let explicit = temp.child("A.todo");
        explicit.touch().unwrap();

        let c = classify([explicit.path(), dir.path()]);
        let files = enumerate(&c, BatchSize::All).unwrap();
        assert_eq!(names(&files), vec!["B.todo", "A.todo"]);

        let one = enumerate(&c, limited(1)).unwrap();
        assert_eq!(names(&one), vec!["B.todo"]);
    }

    #[test]
    fn explicit_files_pass_through_without_filtering() {
        let temp = assert_fs::TempDir::new().unwrap();
        let odd = temp.child("readme.md");
        odd.touch().unwrap();
        let c = classify([odd.path()]);
        let files = enumerate(&c, BatchSize::All).unwrap();
        assert_eq!(files, vec![odd.path().to_path_buf()]);
    }

    #[test]
    fn not_found_entries_are_ignored() {
        let temp = assert_fs::TempDir::new().unwrap();
        let c = classify([temp.path().join("missing")]);
        assert!(enumerate(&c, BatchSize::All).unwrap().is_empty());
    }
}
