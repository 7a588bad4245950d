//! Error types for foldersize.
//!
//! Errors fall into two groups:
//! - Enumeration errors (`Pattern`, `Glob`, `Stat`) abort the whole run.
//! - Traversal errors (`Walk`) are isolated to a single folder and end up as
//!   an unavailable size in the [`SizeMap`](crate::size_map::SizeMap).

use std::path::PathBuf;

use thiserror::Error;

/// Library error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The glob pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A path produced by glob expansion could not be read.
    #[error("cannot read {}: {}", .0.path().display(), .0.error())]
    Glob(#[from] glob::GlobError),

    /// A candidate path could not be stat'ed while filtering for directories.
    #[error("cannot stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Recursive traversal of a folder failed.
    #[error("cannot traverse {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Whether this error only affects a single folder's size.
    ///
    /// Isolated errors are absorbed by the size map builder; everything else
    /// is fatal for the run.
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        matches!(self, Self::Walk { .. })
    }
}
