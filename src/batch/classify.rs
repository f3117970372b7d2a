//! Source classification.
//! Sorts raw source arguments into directories, regular files, and paths that
//! could not be found. Only reads filesystem metadata.

use std::fs;
use std::path::{Path, PathBuf};

/// Which bucket a source argument falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    File,
    NotFound,
}

/// Source arguments partitioned by kind. Each bucket keeps argument order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedSources {
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub not_found: Vec<PathBuf>,
}

impl ClassifiedSources {
    fn push(&mut self, kind: SourceKind, path: PathBuf) {
        match kind {
            SourceKind::Directory => self.directories.push(path),
            SourceKind::File => self.files.push(path),
            SourceKind::NotFound => self.not_found.push(path),
        }
    }

    /// Total number of classified arguments across all buckets.
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len() + self.not_found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Classify one path. Symlinks are followed; anything that is neither a
/// directory nor a regular file (FIFOs, dangling links) counts as not found.
pub fn classify_source(path: &Path) -> SourceKind {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => SourceKind::Directory,
        Ok(meta) if meta.is_file() => SourceKind::File,
        _ => SourceKind::NotFound,
    }
}

/// Classify every source argument, in order.
pub fn classify<I, P>(sources: I) -> ClassifiedSources
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut classified = ClassifiedSources::default();
    for src in sources {
        let path = src.as_ref();
        classified.push(classify_source(path), path.to_path_buf());
    }
    classified
}
