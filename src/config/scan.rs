//! Scanning configuration for folder measurement.
//!
//! This module defines the options that control how folders are traversed
//! and how many of them are measured at once.

/// Configuration for folder traversal behavior.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Whether to log per-folder progress and traversal details
    pub verbose: bool,

    /// Number of worker threads measuring folders (0 = one per CPU core)
    pub threads: usize,

    /// Whether to follow symbolic links while walking a folder
    pub follow_links: bool,
}
