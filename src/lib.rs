//! # foldersize
//!
//! Library behind the `foldersize` command: measure the total size of every
//! folder matching a glob pattern, in parallel, and list them largest first.
//!
//! The pipeline is:
//!
//! 1. [`candidates::folder_candidates`] expands a glob into directories
//! 2. [`size_map::build_size_map`] measures each directory in its own task
//!    using [`sizer::compute_folder_size`] and merges the results
//! 3. [`output`] renders the [`SizeMap`] as aligned text or JSON

pub mod candidates;
pub mod config;
pub mod error;
pub mod output;
pub mod size_map;
pub mod sizer;
pub mod units;

pub use config::{DisplayOptions, FileConfig, ScanOptions};
pub use error::{Error, Result};
pub use size_map::{FolderSize, SizeMap, SizeMapBuilder, build_size_map, build_size_map_with};
pub use sizer::{compute_folder_size, compute_folder_size_with};
pub use units::{DisplayUnit, Rounding};
