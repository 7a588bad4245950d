//! Recursive size measurement of a single folder.
//!
//! A folder's size is the sum of the lengths of every non-directory entry
//! beneath it, at any depth. Directories themselves contribute nothing. The
//! walk is sequential; parallelism happens one level up, across folders (see
//! [`crate::size_map`]).

use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::{
    config::ScanOptions,
    error::{Error, Result},
};

/// Calculate the total size of a folder with default scan options.
///
/// # Errors
///
/// Returns [`Error::Walk`] if any part of the tree cannot be read. The
/// partially accumulated size is discarded in that case.
pub fn compute_folder_size(path: &Path) -> Result<u64> {
    compute_folder_size_with(path, &ScanOptions::default())
}

/// Calculate the total size of a folder, in bytes.
///
/// Every entry yielded by the walk that is not a directory adds its length.
/// Without `follow_links`, symbolic links count as the size of the link
/// itself and are not descended into. This includes `path` itself when it
/// is a link to a directory.
///
/// Unlike a best-effort `du`, this fails on the first unreadable entry: a
/// folder whose size cannot be fully determined has no size at all.
///
/// # Errors
///
/// Returns [`Error::Walk`] on permission errors, entries vanishing during the
/// walk, symlink loops (with `follow_links`), or any other I/O failure.
pub fn compute_folder_size_with(path: &Path, options: &ScanOptions) -> Result<u64> {
    let walk_error = |source| Error::Walk {
        path: path.to_path_buf(),
        source,
    };

    let mut total = 0u64;
    let mut files = 0usize;

    let walker = WalkDir::new(path)
        .follow_links(options.follow_links)
        .follow_root_links(options.follow_links);

    for entry in walker {
        let entry = entry.map_err(walk_error)?;

        if entry.file_type().is_dir() {
            continue;
        }

        let metadata = entry.metadata().map_err(walk_error)?;
        total = total.saturating_add(metadata.len());
        files += 1;
    }

    debug!(path = %path.display(), files, bytes = total, "folder measured");

    Ok(total)
}
