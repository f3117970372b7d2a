//! Config module.
//! Provides configuration types, defaults, environment lookup, and validation.

pub mod types;
mod validate;

use std::env;
use std::num::NonZeroUsize;

pub use types::{BatchSize, Config, LogLevel, Prefix, StageMode, StagingOptions};

/// Files staged per run when `--batch-size` is not given.
pub const DEFAULT_BATCH_SIZE: NonZeroUsize = NonZeroUsize::new(5).unwrap();

/// Extension (without the dot) that marks a todo file.
pub const TODO_EXTENSION: &str = "todo";

/// Environment variable selecting log verbosity.
pub const LOG_LEVEL_ENV: &str = "STAGE_TODOS_LOG_LEVEL";

/// Read `STAGE_TODOS_LOG_LEVEL`.
///
/// Returns Ok(None) when unset, Err(raw) when set to an unknown level so the
/// caller can warn once logging is up.
pub fn log_level_from_env() -> Result<Option<LogLevel>, String> {
    parse_log_level_var(env::var(LOG_LEVEL_ENV).ok())
}

/// Pure half of [`log_level_from_env`].
pub fn parse_log_level_var(raw: Option<String>) -> Result<Option<LogLevel>, String> {
    match raw {
        None => Ok(None),
        Some(v) if v.trim().is_empty() => Ok(None),
        Some(v) => LogLevel::parse(&v).map(Some).ok_or(v),
    }
}
