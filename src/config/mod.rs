//! Configuration types for scanning and display.
//!
//! Options are assembled from the command line and the optional config file
//! (see [`file`]); CLI values win over config-file values, which win over the
//! defaults defined here.

pub mod display;
pub mod file;
pub mod scan;

pub use display::DisplayOptions;
pub use file::FileConfig;
pub use scan::ScanOptions;
