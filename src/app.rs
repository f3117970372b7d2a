//! Application orchestrator.
//! Resolves the log level, initializes logging, installs the interrupt handler,
//! builds and validates the config, selects the batch, and stages it.

use anyhow::Result;
use tracing::{debug, error, info, warn};

use stage_todos::cli::Args;
use stage_todos::config::{log_level_from_env, LOG_LEVEL_ENV};
use stage_todos::fs_ops::{stage, StageSummary};
use stage_todos::output as out;
use stage_todos::{select_batch, shutdown, StageError};

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --detailed-help before logging init
    if args.detailed_help {
        println!("{}", Args::detailed_help_text());
        return Ok(());
    }

    // Precedence: --log-level > STAGE_TODOS_LOG_LEVEL > INFO.
    let env_level = log_level_from_env();
    let level = args
        .log_level
        .or_else(|| env_level.clone().ok().flatten())
        .unwrap_or_default();

    let guard = init_tracing(level, args.log_file.as_deref(), args.json).map_err(|e| {
        out::print_error(&format!("Failed to initialize logging: {e}"));
        e
    })?;

    if args.log_level.is_none()
        && let Err(raw) = &env_level
    {
        warn!("Ignoring {LOG_LEVEL_ENV}='{raw}': expected FATAL, ERROR, WARN, INFO or DEBUG; using INFO");
    }

    // Staging stops between files; the log guard lives until the end of `run`.
    ctrlc::set_handler(|| {
        shutdown::request();
        out::print_warn("Received interrupt; finishing the current file and stopping...");
    })?;

    debug!("Starting stage-todos: {:?}", args);

    let result = (|| -> Result<()> {
        let cfg = args.to_config()?;
        cfg.validate()?;

        let files = select_batch(&cfg)?;
        if files.is_empty() {
            info!("No todo files to stage");
        }

        let results = stage(&files, &cfg.dest_dir, &cfg.options);
        for r in &results {
            out::print_staged(r);
        }
        let summary = StageSummary::from_results(&results);
        out::print_summary(&summary);
        info!(
            moved = summary.moved,
            copied = summary.copied,
            skipped = summary.skipped,
            planned = summary.planned,
            failed = summary.failed,
            "Batch complete"
        );

        if shutdown::is_requested() {
            return Err(StageError::Interrupted.into());
        }
        if summary.failed > 0 {
            return Err(StageError::StagingIncomplete {
                failed: summary.failed,
                total: files.len(),
            }
            .into());
        }
        Ok(())
    })();

    if let Err(e) = &result {
        log_failure(e);
    }

    // Flush the file writer after the failure has been logged.
    drop(guard);

    result
}

fn log_failure(e: &anyhow::Error) {
    match e.downcast_ref::<StageError>() {
        Some(se) if se.is_pre_staging() => {
            error!(code = se.code(), kind = "aborted", "Nothing staged: {se}")
        }
        Some(se) => error!(code = se.code(), kind = "incomplete", "{se}"),
        None => error!(error = %format!("{e:#}"), "Run failed"),
    }
}
