//! Candidate folder enumeration.
//!
//! Expands a glob pattern and keeps only the matches that are directories.
//! Any failure here is fatal: one unreadable match aborts the whole listing
//! rather than producing a partial one.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::error::{Error, Result};

/// Pattern matching every entry directly inside `dir`.
#[must_use]
pub fn default_pattern(dir: &Path) -> String {
    dir.join("*").to_string_lossy().into_owned()
}

/// Expand `pattern` and return the matching directories in glob order.
///
/// Matches are stat'ed following symbolic links, so a link pointing at a
/// directory counts as a directory. Non-directory matches are dropped.
/// A directory that cannot be listed while expanding the pattern is an
/// error, not a silently skipped branch.
///
/// # Errors
///
/// - [`Error::Pattern`] if the pattern is malformed
/// - [`Error::Glob`] if a path cannot be read during expansion
/// - [`Error::Stat`] if a match cannot be stat'ed
pub fn folder_candidates(pattern: &str) -> Result<Vec<PathBuf>> {
    let matches = glob::glob(pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut folders = Vec::new();

    for entry in matches {
        let path = entry?;

        if is_dir(&path)? {
            folders.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-directory match");
        }
    }

    debug!(pattern, count = folders.len(), "candidate folders found");

    Ok(folders)
}

/// Whether `path` is a directory, following symbolic links.
fn is_dir(path: &Path) -> Result<bool> {
    fs::metadata(path)
        .map(|metadata| metadata.is_dir())
        .map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })
}
