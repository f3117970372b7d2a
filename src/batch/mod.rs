//! Batch selection: classify sources, enumerate candidates, validate.

pub mod checks;
pub mod classify;
pub mod enumerate;

use anyhow::Result;
use std::path::PathBuf;
use tracing::info;

use crate::config::Config;

pub use checks::{
    all_basenames_unique, all_have_required_extension, all_sources_found,
    find_duplicate_basenames, validate_batch,
};
pub use classify::{classify, classify_source, ClassifiedSources, SourceKind};
pub use enumerate::{enumerate, has_todo_extension};

/// Pick the files this run will stage. Fails without side effects when any
/// source is missing or the truncated batch breaks a check.
pub fn select_batch(cfg: &Config) -> Result<Vec<PathBuf>> {
    let classified = classify(&cfg.sources);
    let files = enumerate(&classified, cfg.options.batch_size)?;
    validate_batch(&classified, &files, cfg.options.case_sensitive)?;
    info!(
        selected = files.len(),
        batch_size = %cfg.options.batch_size,
        "Selected batch"
    );
    Ok(files)
}
