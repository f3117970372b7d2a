//! Core configuration types.
//! - BatchSize bounds how many todo files one run stages.
//! - Prefix is a validated destination filename prefix.
//! - StagingOptions carries the per-run staging policy.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::errors::StageError;

use super::DEFAULT_BATCH_SIZE;

/// Maximum number of files selected in one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchSize {
    Limited(NonZeroUsize),
    All,
}

impl BatchSize {
    /// Upper bound on the batch, or None when unbounded.
    pub fn limit(self) -> Option<usize> {
        match self {
            BatchSize::Limited(n) => Some(n.get()),
            BatchSize::All => None,
        }
    }
}

impl Default for BatchSize {
    fn default() -> Self {
        BatchSize::Limited(DEFAULT_BATCH_SIZE)
    }
}

impl FromStr for BatchSize {
    type Err = StageError;

    /// Accepts a positive integer or `ALL` (any case).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(BatchSize::All);
        }
        trimmed
            .parse::<NonZeroUsize>()
            .map(BatchSize::Limited)
            .map_err(|_| StageError::InvalidBatchSize(s.to_string()))
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchSize::Limited(n) => write!(f, "{n}"),
            BatchSize::All => f.write_str("ALL"),
        }
    }
}

/// Destination filename prefix; empty means names are kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prefix(String);

impl Prefix {
    pub fn new(word: &str) -> Result<Self, StageError> {
        if word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Prefix(word.to_string()))
        } else {
            Err(StageError::InvalidPrefix(word.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Prefix {
    type Err = StageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Whether staged files leave their source behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StageMode {
    #[default]
    Move,
    Copy,
}

impl fmt::Display for StageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StageMode::Move => "move",
            StageMode::Copy => "copy",
        })
    }
}

/// Per-run staging policy. Built once from the CLI and never mutated.
#[derive(Debug, Clone, Default)]
pub struct StagingOptions {
    pub batch_size: BatchSize,
    pub prefix: Prefix,
    /// Overwrite files already present in the destination.
    pub clobber: bool,
    /// Compare basenames case-sensitively when checking for collisions.
    pub case_sensitive: bool,
    pub mode: StageMode,
    /// Report the plan without touching the filesystem.
    pub dry_run: bool,
}

/// Runtime configuration for one invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directories and files to draw todo files from, in argument order.
    pub sources: Vec<PathBuf>,
    /// Directory receiving the staged files.
    pub dest_dir: PathBuf,
    pub options: StagingOptions,
}

impl Config {
    /// Construct a Config with default options.
    pub fn new(sources: Vec<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            dest_dir: dest_dir.into(),
            options: StagingOptions::default(),
        }
    }
}

/// Program-defined verbosity levels, as accepted by `STAGE_TODOS_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Fatal,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    /// Parse level names (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Some(LogLevel::Fatal),
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Fatal => "FATAL",
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid log level: '{s}' (expected FATAL, ERROR, WARN, INFO or DEBUG)")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_parses_counts_and_all() {
        assert_eq!("3".parse::<BatchSize>().unwrap().limit(), Some(3));
        assert_eq!("ALL".parse::<BatchSize>().unwrap(), BatchSize::All);
        assert_eq!("all".parse::<BatchSize>().unwrap(), BatchSize::All);
        assert_eq!(BatchSize::default().limit(), Some(5));
    }

    #[test]
    fn batch_size_rejects_zero_and_garbage() {
        for bad in ["0", "-1", "five", ""] {
            let err = bad.parse::<BatchSize>().unwrap_err();
            assert!(matches!(err, StageError::InvalidBatchSize(_)), "{bad}");
        }
    }

    #[test]
    fn prefix_charset() {
        assert!(Prefix::new("").unwrap().is_empty());
        assert_eq!(Prefix::new("run_7-a").unwrap().as_str(), "run_7-a");
        assert!(matches!(Prefix::new("a b"), Err(StageError::InvalidPrefix(_))));
        assert!(matches!(Prefix::new("x/y"), Err(StageError::InvalidPrefix(_))));
        assert!(Prefix::new("é").is_err());
    }

    #[test]
    fn log_level_parse_is_case_insensitive() {
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("Fatal"), Some(LogLevel::Fatal));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("verbose"), None);
        assert!("nope".parse::<LogLevel>().is_err());
    }
}
