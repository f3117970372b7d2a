//! Config validation logic.
//! Verifies the destination directory before anything is classified or staged.

use anyhow::Result;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::StageError;

use super::types::Config;

impl Config {
    /// Validate the destination and log the effective settings.
    pub fn validate(&self) -> Result<()> {
        ensure_dir_exists_and_is_dir(&self.dest_dir)?;

        let opts = &self.options;
        info!(
            "Config validated: dest='{}' sources={} batch_size={} mode={} clobber={} case_sensitive={} prefix='{}'",
            self.dest_dir.display(),
            self.sources.len(),
            opts.batch_size,
            opts.mode,
            opts.clobber,
            opts.case_sensitive,
            opts.prefix.as_str()
        );
        Ok(())
    }
}

/// Ensure path exists and is a directory (symlinks to directories are accepted).
fn ensure_dir_exists_and_is_dir(path: &Path) -> Result<()> {
    if !path.is_dir() {
        error!("destination is not a directory: {}", path.display());
        return Err(StageError::DestinationNotDirectory(path.to_path_buf()).into());
    }
    debug!("destination directory ok: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn rejects_missing_and_file_destinations() {
        let temp = assert_fs::TempDir::new().unwrap();
        let file = temp.child("plain.txt");
        file.write_str("x").unwrap();

        for dest in [temp.path().join("missing"), file.path().to_path_buf()] {
            let cfg = Config::new(vec![temp.path().to_path_buf()], &dest);
            let err = cfg.validate().unwrap_err();
            assert!(matches!(
                err.downcast_ref::<StageError>(),
                Some(StageError::DestinationNotDirectory(_))
            ));
        }
    }

    #[test]
    fn accepts_existing_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let dest = temp.child("out");
        dest.create_dir_all().unwrap();
        let cfg = Config::new(vec![], dest.path());
        cfg.validate().expect("directory destination should validate");
    }
}
