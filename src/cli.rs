//! CLI definition and parsing.
//! Defines Args and converts them into a validated Config.
//!
//! Notes:
//! - Positionals are collected loosely and split here so "too few arguments"
//!   is reported through the normal error path, and `--detailed-help` works alone.
//! - `--clobber` / `--no-clobber`: the last one given wins.

use clap::{CommandFactory, Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{BatchSize, Config, LogLevel, Prefix, StageMode, StagingOptions};
use crate::errors::StageError;

const DETAILED_HELP: &str = "\
Select up to --batch-size todo files and stage them into DEST_DIR.

Sources:
  Each SOURCE may be a directory or a file. Directories contribute their
  immediate children named *.todo (any case), in file-name order. Files are
  taken as given. Directory matches come before explicit files, and the
  combined list is cut to the batch size before any checks run.

Checks (the run aborts before touching anything if one fails):
  1. every source exists
  2. every selected file ends in .todo
  3. no two selected files share a basename (case-insensitive unless
     --case-sensitive)

Staging:
  Files are moved (or copied with --copy) to DEST_DIR/<prefix><name>.
  Existing destination files are skipped unless --clobber is given. A file
  that fails to stage does not stop the batch; the exit status is non-zero
  if any file failed.

Environment:
  STAGE_TODOS_LOG_LEVEL  FATAL, ERROR, WARN, INFO (default) or DEBUG";

/// Stage a bounded batch of .todo files into a processing directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "stage-todos",
    author,
    version,
    about = "Move or copy a bounded batch of .todo files into a destination directory",
    override_usage = "stage-todos [OPTIONS] {SOURCE_DIR|FILE...} DEST_DIR"
)]
pub struct Args {
    /// Sources (directories or .todo files) followed by the destination directory.
    #[arg(value_name = "PATH", value_hint = ValueHint::AnyPath)]
    pub paths: Vec<PathBuf>,

    /// Maximum number of files to stage, or ALL.
    #[arg(long, value_name = "COUNT|ALL", default_value = "5")]
    pub batch_size: String,

    /// Prefix added to each staged file name (letters, digits, '-' and '_').
    #[arg(long, value_name = "WORD", default_value = "")]
    pub prefix: String,

    /// Overwrite files that already exist in the destination.
    #[arg(long, overrides_with = "no_clobber")]
    pub clobber: bool,

    /// Skip files that already exist in the destination (default).
    #[arg(long = "no-clobber", overrides_with = "clobber")]
    pub no_clobber: bool,

    /// Copy instead of move.
    #[arg(long)]
    pub copy: bool,

    /// Treat basenames differing only in case as distinct.
    #[arg(long)]
    pub case_sensitive: bool,

    /// Show what would be staged, but do not modify files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print detailed help and exit.
    #[arg(long)]
    pub detailed_help: bool,

    /// Log level (overrides STAGE_TODOS_LOG_LEVEL): FATAL, ERROR, WARN, INFO, DEBUG.
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// Split positionals into (sources, destination). Needs at least one of each.
    pub fn split_paths(&self) -> Result<(&[PathBuf], &PathBuf), StageError> {
        match self.paths.split_last() {
            Some((dest, sources)) if !sources.is_empty() => Ok((sources, dest)),
            _ => Err(StageError::TooFewArguments),
        }
    }

    /// Staging policy from flags; fails on a bad batch size or prefix.
    pub fn staging_options(&self) -> Result<StagingOptions, StageError> {
        Ok(StagingOptions {
            batch_size: self.batch_size.parse::<BatchSize>()?,
            prefix: Prefix::new(&self.prefix)?,
            clobber: self.clobber,
            case_sensitive: self.case_sensitive,
            mode: if self.copy {
                StageMode::Copy
            } else {
                StageMode::Move
            },
            dry_run: self.dry_run,
        })
    }

    /// Build the run configuration. Does not touch the filesystem.
    pub fn to_config(&self) -> Result<Config, StageError> {
        let (sources, dest) = self.split_paths()?;
        Ok(Config {
            sources: sources.to_vec(),
            dest_dir: dest.clone(),
            options: self.staging_options()?,
        })
    }

    /// Long help text including the detailed description.
    pub fn detailed_help_text() -> String {
        Args::command()
            .long_about(DETAILED_HELP)
            .render_long_help()
            .to_string()
    }
}

pub fn parse() -> Args {
    Args::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["stage-todos", "in", "out"]);
        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.sources, vec![PathBuf::from("in")]);
        assert_eq!(cfg.dest_dir, PathBuf::from("out"));
        assert_eq!(cfg.options.batch_size.limit(), Some(5));
        assert!(cfg.options.prefix.is_empty());
        assert!(!cfg.options.clobber);
        assert!(!cfg.options.case_sensitive);
        assert_eq!(cfg.options.mode, StageMode::Move);
    }

    #[test]
    fn last_clobber_flag_wins() {
        let on = Args::parse_from(["stage-todos", "--no-clobber", "--clobber", "a", "b"]);
        assert!(on.staging_options().unwrap().clobber);
        let off = Args::parse_from(["stage-todos", "--clobber", "--no-clobber", "a", "b"]);
        assert!(!off.staging_options().unwrap().clobber);
    }

    #[test]
    fn too_few_positionals() {
        for argv in [vec!["stage-todos"], vec!["stage-todos", "only"]] {
            let args = Args::parse_from(argv);
            assert!(matches!(args.to_config(), Err(StageError::TooFewArguments)));
        }
    }

    #[test]
    fn bad_values_are_configuration_errors() {
        let args = Args::parse_from(["stage-todos", "--batch-size", "0", "a", "b"]);
        assert!(matches!(args.to_config(), Err(StageError::InvalidBatchSize(_))));
        let args = Args::parse_from(["stage-todos", "--prefix", "no spaces", "a", "b"]);
        assert!(matches!(args.to_config(), Err(StageError::InvalidPrefix(_))));
    }

    #[test]
    fn many_sources_and_flags() {
        let args = Args::parse_from([
            "stage-todos",
            "--batch-size",
            "ALL",
            "--prefix",
            "b1_",
            "--copy",
            "--case-sensitive",
            "--log-level",
            "debug",
            "a",
            "b/W1.todo",
            "dest",
        ]);
        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.sources.len(), 2);
        assert_eq!(cfg.options.batch_size, BatchSize::All);
        assert_eq!(cfg.options.prefix.as_str(), "b1_");
        assert_eq!(cfg.options.mode, StageMode::Copy);
        assert!(cfg.options.case_sensitive);
        assert_eq!(args.log_level, Some(LogLevel::Debug));
    }

    #[test]
    fn detailed_help_mentions_environment() {
        let text = Args::detailed_help_text();
        assert!(text.contains("STAGE_TODOS_LOG_LEVEL"));
        assert!(text.contains("--batch-size"));
    }
}
