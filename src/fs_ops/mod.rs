//! Filesystem operations: staging plus the rename/copy primitives it builds on.

mod atomic;
mod copy;
mod helpers;
mod stage;
mod util;

pub use copy::safe_copy_and_rename;
pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use stage::{
    copy_file, destination_for, move_file, move_file_no_clobber, stage, StageSummary, StagedFile,
    StagingOutcome,
};
