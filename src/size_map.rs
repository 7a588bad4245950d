//! Parallel measurement of many folders into a single size map.
//!
//! Every candidate folder gets its own task. Tasks run concurrently on the
//! rayon pool and never look at each other's state; each one merges exactly
//! one entry into a mutex-guarded map when it finishes. The builder returns
//! only after every task has merged its entry.
//!
//! A folder whose traversal fails does not disturb its siblings: its entry
//! becomes [`FolderSize::Unavailable`] and the failure is logged. A panic
//! inside a measurement is not a traversal failure; it is re-raised once all
//! other tasks have finished.

use std::{
    cmp::Ordering as CmpOrdering,
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicUsize, Ordering},
    },
};

use tracing::{debug, warn};

use crate::{config::ScanOptions, error::Result, sizer::compute_folder_size_with};

/// The measured size of one folder.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FolderSize {
    /// Total size of all non-directory entries, in bytes
    Bytes(u64),

    /// The folder could not be fully traversed
    Unavailable,
}

impl FolderSize {
    /// Signed value used for unavailable sizes in the legacy encoding.
    pub const UNAVAILABLE_SENTINEL: i64 = -1;

    /// Byte count, if the size is known.
    #[must_use]
    pub const fn bytes(self) -> Option<u64> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            Self::Unavailable => None,
        }
    }

    /// Whether the size is known.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Bytes(_))
    }

    /// Signed encoding: the byte count, or `-1` when unavailable.
    ///
    /// Byte counts above `i64::MAX` saturate.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Bytes(bytes) => i64::try_from(bytes).unwrap_or(i64::MAX),
            Self::Unavailable => Self::UNAVAILABLE_SENTINEL,
        }
    }

    /// Descending order by size with unavailable sizes last.
    fn cmp_descending(self, other: Self) -> CmpOrdering {
        match (self, other) {
            (Self::Bytes(a), Self::Bytes(b)) => b.cmp(&a),
            (Self::Bytes(_), Self::Unavailable) => CmpOrdering::Less,
            (Self::Unavailable, Self::Bytes(_)) => CmpOrdering::Greater,
            (Self::Unavailable, Self::Unavailable) => CmpOrdering::Equal,
        }
    }
}

impl<E> From<std::result::Result<u64, E>> for FolderSize {
    fn from(result: std::result::Result<u64, E>) -> Self {
        result.map_or(Self::Unavailable, Self::Bytes)
    }
}

impl fmt::Display for FolderSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

/// Mapping from folder path to its measured size.
///
/// Built once by [`build_size_map`] and read-only afterwards. Holds exactly
/// one entry per distinct input path.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SizeMap(HashMap<PathBuf, FolderSize>);

impl SizeMap {
    /// Number of folders in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the map holds no folders.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Size of a single folder, if it was part of the input.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<FolderSize> {
        self.0.get(path).copied()
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, FolderSize)> {
        self.0.iter().map(|(path, size)| (path.as_path(), *size))
    }

    /// Sum of all known sizes. Unavailable folders contribute nothing.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.0
            .values()
            .filter_map(|size| size.bytes())
            .fold(0u64, u64::saturating_add)
    }

    /// Number of folders whose size could not be determined.
    #[must_use]
    pub fn unavailable_count(&self) -> usize {
        self.0.values().filter(|size| !size.is_available()).count()
    }

    /// Entries sorted from largest to smallest.
    ///
    /// Unavailable folders come last; equal sizes are ordered by path so the
    /// listing is stable between runs.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&Path, FolderSize)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|(path_a, size_a), (path_b, size_b)| {
            size_a.cmp_descending(*size_b).then_with(|| path_a.cmp(path_b))
        });
        entries
    }
}

impl FromIterator<(PathBuf, FolderSize)> for SizeMap {
    fn from_iter<I: IntoIterator<Item = (PathBuf, FolderSize)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Measure every folder concurrently with default scan options.
///
/// Returns once all folders have been measured. Never fails: folders that
/// cannot be traversed are recorded as [`FolderSize::Unavailable`].
#[must_use]
pub fn build_size_map(paths: &[PathBuf]) -> SizeMap {
    SizeMapBuilder::new(ScanOptions::default()).build(paths)
}

/// Measure every folder concurrently using a custom measuring function.
///
/// `measure` is called once per input path, from multiple threads at once.
#[must_use]
pub fn build_size_map_with<F>(paths: &[PathBuf], measure: F) -> SizeMap
where
    F: Fn(&Path) -> Result<u64> + Sync,
{
    fan_out(paths, &measure, &|_, _| {})
}

/// Configurable builder for a [`SizeMap`].
///
/// Carries the scan options used for each traversal and an optional
/// progress callback, invoked after each folder is merged.
pub struct SizeMapBuilder<'a> {
    scan_options: ScanOptions,
    on_progress: Option<Box<dyn Fn(usize, usize) + Sync + 'a>>,
}

impl fmt::Debug for SizeMapBuilder<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeMapBuilder")
            .field("scan_options", &self.scan_options)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

impl<'a> SizeMapBuilder<'a> {
    /// Create a builder that walks folders with the given options.
    #[must_use]
    pub const fn new(scan_options: ScanOptions) -> Self {
        Self {
            scan_options,
            on_progress: None,
        }
    }

    /// Register a callback receiving `(done, total)` after every merge.
    ///
    /// The callback runs on worker threads, outside the map lock.
    #[must_use]
    pub fn on_progress(mut self, callback: impl Fn(usize, usize) + Sync + 'a) -> Self {
        self.on_progress = Some(Box::new(callback));
        self
    }

    /// Measure every path concurrently and collect the results.
    #[must_use]
    pub fn build(&self, paths: &[PathBuf]) -> SizeMap {
        let measure = |path: &Path| compute_folder_size_with(path, &self.scan_options);

        match &self.on_progress {
            Some(callback) => fan_out(paths, &measure, &**callback),
            None => fan_out(paths, &measure, &|_, _| {}),
        }
    }
}

/// Spawn one task per path and wait for all of them.
fn fan_out<F, P>(paths: &[PathBuf], measure: &F, progress: &P) -> SizeMap
where
    F: Fn(&Path) -> Result<u64> + Sync + ?Sized,
    P: Fn(usize, usize) + Sync + ?Sized,
{
    let sizes = Mutex::new(HashMap::with_capacity(paths.len()));
    let done = AtomicUsize::new(0);
    let total = paths.len();

    rayon::scope(|scope| {
        for path in paths {
            let sizes = &sizes;
            let done = &done;

            scope.spawn(move |_| {
                debug!(path = %path.display(), "measuring folder");

                let size = match measure(path.as_path()) {
                    Ok(bytes) => FolderSize::Bytes(bytes),
                    Err(err) => {
                        warn!("{err}");
                        FolderSize::Unavailable
                    }
                };

                sizes
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .insert(path.clone(), size);

                let n = done.fetch_add(1, Ordering::Relaxed) + 1;
                progress(n, total);
            });
        }
    });

    SizeMap(sizes.into_inner().unwrap_or_else(PoisonError::into_inner))
}
