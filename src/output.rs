//! User-facing report lines, separate from the tracing log stream.
//! Colors are enabled only when stdout is a TTY.

use owo_colors::OwoColorize;

use crate::fs_ops::{StageSummary, StagedFile, StagingOutcome};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn label(outcome: &StagingOutcome) -> &'static str {
    match outcome {
        StagingOutcome::Moved => "moved",
        StagingOutcome::Copied => "copied",
        StagingOutcome::SkippedExisting => "skipped",
        StagingOutcome::Planned(_) => "would stage",
        StagingOutcome::Failed(_) => "failed",
    }
}

/// One line per file: `<outcome>: <source> -> <dest>`, plus the reason on failure.
pub fn format_staged(file: &StagedFile) -> String {
    let mut line = format!(
        "{}: {} -> {}",
        label(&file.outcome),
        file.source.display(),
        file.dest.display()
    );
    if let StagingOutcome::Failed(reason) = &file.outcome {
        line.push_str(&format!(" ({reason})"));
    }
    line
}

pub fn print_staged(file: &StagedFile) {
    let line = format_staged(file);
    if !is_tty() {
        println!("{line}");
        return;
    }
    match file.outcome {
        StagingOutcome::Moved | StagingOutcome::Copied => println!("{}", line.green()),
        StagingOutcome::SkippedExisting | StagingOutcome::Planned(_) => {
            println!("{}", line.yellow())
        }
        StagingOutcome::Failed(_) => println!("{}", line.red().bold()),
    }
}

pub fn format_summary(summary: &StageSummary) -> String {
    format!(
        "{} file(s): {} moved, {} copied, {} skipped, {} planned, {} failed",
        summary.total(),
        summary.moved,
        summary.copied,
        summary.skipped,
        summary.planned,
        summary.failed
    )
}

pub fn print_summary(summary: &StageSummary) {
    let line = format_summary(summary);
    if is_tty() {
        let tag = if summary.failed > 0 {
            "done:".red().bold().to_string()
        } else {
            "done:".green().bold().to_string()
        };
        println!("{tag} {line}");
    } else {
        println!("done: {line}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}
