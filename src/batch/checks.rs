//! Batch validators.
//! Each check logs its diagnostic and returns a typed error carrying the full
//! offending list. `validate_batch` runs them in order and stops at the first failure.

use anyhow::Result;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::errors::{join_paths, DuplicateGroup, StageError};

use super::classify::ClassifiedSources;
use super::enumerate::has_todo_extension;

/// Fail if any source argument could not be found.
pub fn all_sources_found(classified: &ClassifiedSources) -> Result<()> {
    if classified.not_found.is_empty() {
        debug!(count = classified.len(), "all sources found");
        return Ok(());
    }
    error!(
        missing = %join_paths(&classified.not_found),
        "source(s) not found or not a regular file/directory"
    );
    Err(StageError::SourcesNotFound(classified.not_found.clone()).into())
}

/// Fail if any selected file lacks the `.todo` extension.
pub fn all_have_required_extension(files: &[PathBuf]) -> Result<()> {
    let offending: Vec<PathBuf> = files
        .iter()
        .filter(|f| !has_todo_extension(f))
        .cloned()
        .collect();
    if offending.is_empty() {
        return Ok(());
    }
    error!(
        files = %join_paths(&offending),
        "selected file(s) do not end in .todo"
    );
    Err(StageError::MissingExtension(offending).into())
}

/// Comparison key for a file: its raw basename, lowercased unless
/// `case_sensitive`. Names that are not valid UTF-8 are compared byte for byte.
pub fn basename_key(path: &Path, case_sensitive: bool) -> OsString {
    let name = path.file_name().unwrap_or_default();
    if case_sensitive {
        return name.to_os_string();
    }
    match name.to_str() {
        Some(s) => OsString::from(s.to_lowercase()),
        None => name.to_os_string(),
    }
}

/// Every basename shared by more than one file, ordered by key.
/// Paths within a group are sorted, so the result does not depend on input order.
pub fn find_duplicate_basenames(files: &[PathBuf], case_sensitive: bool) -> Vec<DuplicateGroup> {
    let mut by_name: BTreeMap<OsString, Vec<PathBuf>> = BTreeMap::new();
    for f in files {
        by_name
            .entry(basename_key(f, case_sensitive))
            .or_default()
            .push(f.clone());
    }
    by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(key, mut paths)| {
            paths.sort();
            DuplicateGroup {
                basename: key.to_string_lossy().into_owned(),
                paths,
            }
        })
        .collect()
}

/// Fail if two selected files would land on the same destination name.
pub fn all_basenames_unique(files: &[PathBuf], case_sensitive: bool) -> Result<()> {
    let groups = find_duplicate_basenames(files, case_sensitive);
    if groups.is_empty() {
        return Ok(());
    }
    for g in &groups {
        error!(
            basename = %g.basename,
            paths = %join_paths(&g.paths),
            "duplicate file name in batch; resolve the collision manually"
        );
    }
    Err(StageError::DuplicateBasenames(groups).into())
}

/// Run all checks in order: sources found, extension, uniqueness.
pub fn validate_batch(
    classified: &ClassifiedSources,
    files: &[PathBuf],
    case_sensitive: bool,
) -> Result<()> {
    all_sources_found(classified)?;
    all_have_required_extension(files)?;
    all_basenames_unique(files, case_sensitive)?;
    debug!(count = files.len(), "batch passed validation");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(list: &[&str]) -> Vec<PathBuf> {
        list.iter().map(PathBuf::from).collect()
    }

    fn stage_err(r: Result<()>) -> StageError {
        r.unwrap_err()
            .downcast::<StageError>()
            .expect("expected a StageError")
    }

    #[test]
    fn missing_sources_are_reported() {
        let classified = ClassifiedSources {
            not_found: paths(&["nope", "also/nope.todo"]),
            ..Default::default()
        };
        match stage_err(all_sources_found(&classified)) {
            StageError::SourcesNotFound(missing) => {
                assert_eq!(missing, paths(&["nope", "also/nope.todo"]))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(all_sources_found(&ClassifiedSources::default()).is_ok());
    }

    #[test]
    fn extension_check_lists_offenders() {
        let files = paths(&["a/W1.todo", "b/notes.txt", "c/W2.TODO", "d/todo"]);
        match stage_err(all_have_required_extension(&files)) {
            StageError::MissingExtension(bad) => {
                assert_eq!(bad, paths(&["b/notes.txt", "d/todo"]))
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(all_have_required_extension(&paths(&["x.todo", "Y.Todo"])).is_ok());
        assert!(all_have_required_extension(&[]).is_ok());
    }

    #[test]
    fn duplicate_group_lists_all_paths() {
        let files = paths(&["b/X.todo", "a/X.todo", "c/Y.todo"]);
        match stage_err(all_basenames_unique(&files, false)) {
            StageError::DuplicateBasenames(groups) => {
                assert_eq!(
                    groups,
                    vec![DuplicateGroup {
                        basename: "x.todo".into(),
                        paths: paths(&["a/X.todo", "b/X.todo"]),
                    }]
                );
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn case_sensitivity_only_matters_for_case_variants() {
        let files = paths(&["one/A.todo", "two/a.todo"]);
        assert!(all_basenames_unique(&files, true).is_ok());
        assert!(all_basenames_unique(&files, false).is_err());

        let distinct = paths(&["one/A.todo", "two/B.todo"]);
        assert!(all_basenames_unique(&distinct, true).is_ok());
        assert!(all_basenames_unique(&distinct, false).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn distinct_non_utf8_names_are_not_duplicates() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let a = Path::new("a").join(OsStr::from_bytes(b"\xff.todo"));
        let b = Path::new("b").join(OsStr::from_bytes(b"\xfe.todo"));
        let files = vec![a.clone(), b];
        assert!(all_basenames_unique(&files, true).is_ok());
        assert!(all_basenames_unique(&files, false).is_ok());

        let same = vec![a, Path::new("c").join(OsStr::from_bytes(b"\xff.todo"))];
        assert!(all_basenames_unique(&same, false).is_err());
    }

    #[test]
    fn duplicate_detection_ignores_input_order() {
        let files = paths(&["a/X.todo", "q/Z.todo", "b/x.todo", "c/Z.todo", "d/w.todo"]);
        let mut reversed = files.clone();
        reversed.reverse();
        let mut rotated = files.clone();
        rotated.rotate_left(2);

        let expected = find_duplicate_basenames(&files, false);
        assert_eq!(expected.len(), 2);
        assert_eq!(find_duplicate_basenames(&reversed, false), expected);
        assert_eq!(find_duplicate_basenames(&rotated, false), expected);
    }

    #[test]
    fn validation_short_circuits_in_order() {
        // Missing source wins over a bad extension and a collision.
        let classified = ClassifiedSources {
            not_found: paths(&["gone"]),
            ..Default::default()
        };
        let files = paths(&["a/X.txt", "b/X.txt"]);
        assert!(matches!(
            stage_err(validate_batch(&classified, &files, false)),
            StageError::SourcesNotFound(_)
        ));

        // Extension is checked before uniqueness.
        let clean = ClassifiedSources::default();
        assert!(matches!(
            stage_err(validate_batch(&clean, &files, false)),
            StageError::MissingExtension(_)
        ));

        let dupes = paths(&["a/X.todo", "b/X.todo"]);
        assert!(matches!(
            stage_err(validate_batch(&clean, &dupes, false)),
            StageError::DuplicateBasenames(_)
        ));

        assert!(validate_batch(&clean, &paths(&["a/X.todo"]), false).is_ok());
    }
}
