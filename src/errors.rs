//! Typed error definitions for stage_todos.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::fmt::Write as _;
use std::path::PathBuf;
use thiserror::Error;

/// Every original path that shares one (possibly case-folded) basename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// The basename as compared (lowercased unless case-sensitive).
    pub basename: String,
    /// Colliding paths, sorted.
    pub paths: Vec<PathBuf>,
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("Invalid batch size '{0}': expected a positive integer or ALL")]
    InvalidBatchSize(String),

    #[error("Invalid prefix '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidPrefix(String),

    #[error("Expected at least one source and a destination directory")]
    TooFewArguments,

    #[error("Destination is not a directory: {}", .0.display())]
    DestinationNotDirectory(PathBuf),

    #[error("Source(s) not found: {}", join_paths(.0))]
    SourcesNotFound(Vec<PathBuf>),

    #[error("File(s) without the .todo extension: {}", join_paths(.0))]
    MissingExtension(Vec<PathBuf>),

    #[error("Duplicate file names in batch: {}", describe_groups(.0))]
    DuplicateBasenames(Vec<DuplicateGroup>),

    #[error("Staging incomplete: {failed} of {total} file(s) failed")]
    StagingIncomplete { failed: usize, total: usize },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl StageError {
    /// Stable machine-readable code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            StageError::InvalidBatchSize(_) => "invalid_batch_size",
            StageError::InvalidPrefix(_) => "invalid_prefix",
            StageError::TooFewArguments => "too_few_arguments",
            StageError::DestinationNotDirectory(_) => "dest_not_directory",
            StageError::SourcesNotFound(_) => "sources_not_found",
            StageError::MissingExtension(_) => "missing_extension",
            StageError::DuplicateBasenames(_) => "duplicate_basenames",
            StageError::StagingIncomplete { .. } => "staging_incomplete",
            StageError::Interrupted => "interrupted",
        }
    }

    /// Configuration and validation errors abort before the filesystem is touched.
    pub fn is_pre_staging(&self) -> bool {
        !matches!(
            self,
            StageError::StagingIncomplete { .. } | StageError::Interrupted
        )
    }
}

/// Comma-separated display form of a path list.
pub(crate) fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn describe_groups(groups: &[DuplicateGroup]) -> String {
    let mut out = String::new();
    for (i, g) in groups.iter().enumerate() {
        if i > 0 {
            out.push_str("; ");
        }
        let _ = write!(out, "'{}' <- [{}]", g.basename, join_paths(&g.paths));
    }
    out
}
