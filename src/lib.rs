//! Core library for `stage_todos`.
//!
//! Selects a bounded batch of `.todo` files from directories and explicit
//! paths, validates it, and stages it (move or copy) into a destination
//! directory for a downstream pipeline.
//!
//! Pipeline: classify sources -> enumerate candidates (bounded by batch size)
//! -> validate -> stage. Everything before staging is free of side effects.

pub mod batch;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod shutdown;

pub use batch::{select_batch, ClassifiedSources};
pub use config::{BatchSize, Config, LogLevel, Prefix, StageMode, StagingOptions};
pub use errors::{DuplicateGroup, StageError};
pub use fs_ops::{stage, StageSummary, StagedFile, StagingOutcome};
