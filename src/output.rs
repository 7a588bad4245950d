//! Rendering of the folder listing.
//!
//! Two formats are supported: an aligned text table (one folder per line,
//! largest first) and a single JSON document for scripting, selected with
//! `--json`.

use humansize::{BINARY, format_size};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::{
    config::DisplayOptions,
    size_map::{FolderSize, SizeMap},
    units::{DisplayUnit, render_size},
};

/// Render the text listing, one line per folder, largest first.
///
/// Paths are left-aligned and padded to the widest path (by terminal
/// display width, so wide characters line up); sizes are right-aligned.
/// Each line ends with a newline.
#[must_use]
pub fn render_listing(size_map: &SizeMap, options: &DisplayOptions) -> String {
    let rows: Vec<(String, String)> = size_map
        .sorted()
        .into_iter()
        .map(|(path, size)| {
            (
                path.display().to_string(),
                render_size(size, options.unit, options.rounding),
            )
        })
        .collect();

    let path_width = rows.iter().map(|(p, _)| p.width()).max().unwrap_or(0);
    let size_width = rows.iter().map(|(_, s)| s.width()).max().unwrap_or(0);

    let mut out = String::new();
    for (path, size) in rows {
        let padding = " ".repeat(path_width - path.width());
        out.push_str(&format!("{path}{padding}  {size:>size_width$}\n"));
    }
    out
}

/// Top-level JSON output emitted when `--json` is active.
#[derive(Serialize, Debug)]
pub struct JsonOutput {
    /// Unit used for the `size` field of each folder.
    pub unit: DisplayUnit,

    /// Folders, largest first.
    pub folders: Vec<JsonFolderEntry>,

    /// Aggregated summary statistics.
    pub summary: JsonSummary,
}

/// A single folder entry in the JSON output.
#[derive(Serialize, Debug)]
pub struct JsonFolderEntry {
    /// Folder path as produced by the glob expansion.
    pub path: String,

    /// Size in bytes, or `null` when the folder could not be traversed.
    pub size_bytes: Option<u64>,

    /// Size rendered in the requested unit (`"-1"` when unavailable).
    pub size: String,

    /// Whether the size could be determined.
    pub available: bool,
}

/// Aggregated summary across all folders.
#[derive(Serialize, Debug)]
pub struct JsonSummary {
    /// Number of folders listed.
    pub total_folders: usize,

    /// Number of folders whose size is unavailable.
    pub unavailable: usize,

    /// Sum of all known sizes in bytes.
    pub total_size: u64,

    /// Human-readable formatted total size.
    pub total_size_formatted: String,
}

impl JsonOutput {
    /// Build the JSON document for a size map.
    #[must_use]
    pub fn from_size_map(size_map: &SizeMap, options: &DisplayOptions) -> Self {
        let folders = size_map
            .sorted()
            .into_iter()
            .map(|(path, size)| JsonFolderEntry {
                path: path.display().to_string(),
                size_bytes: size.bytes(),
                size: render_size(size, options.unit, options.rounding),
                available: size.is_available(),
            })
            .collect();

        let total_size = size_map.total_size();

        Self {
            unit: options.unit,
            folders,
            summary: JsonSummary {
                total_folders: size_map.len(),
                unavailable: size_map.unavailable_count(),
                total_size,
                total_size_formatted: format_size(total_size, BINARY),
            },
        }
    }
}

/// Short summary line for the end of the text listing.
#[must_use]
pub fn summary_line(size_map: &SizeMap) -> String {
    let unavailable = size_map.unavailable_count();
    let mut line = format!(
        "{} folders, {} total",
        size_map.len(),
        format_size(size_map.total_size(), BINARY)
    );
    if unavailable > 0 {
        line.push_str(&format!(
            ", {unavailable} unavailable (shown as {})",
            FolderSize::UNAVAILABLE_SENTINEL
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Rounding;
    use std::path::PathBuf;

    fn sample_map() -> SizeMap {
        [
            (PathBuf::from("small"), FolderSize::Bytes(10)),
            (PathBuf::from("a-much-longer-name"), FolderSize::Bytes(2048)),
            (PathBuf::from("broken"), FolderSize::Unavailable),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_render_listing_aligns_columns() {
        let listing = render_listing(&sample_map(), &DisplayOptions::default());

        assert_eq!(
            listing,
            "a-much-longer-name  2048\n\
             small                 10\n\
             broken                -1\n"
        );
    }

    #[test]
    fn test_render_listing_in_kb() {
        let options = DisplayOptions {
            unit: DisplayUnit::Kb,
            rounding: Rounding::Ceil,
            json: false,
        };
        let listing = render_listing(&sample_map(), &options);
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines[0], "a-much-longer-name   2");
        assert_eq!(lines[1], "small                1");
        assert_eq!(lines[2], "broken              -1");
    }

    #[test]
    fn test_render_listing_legacy_rounding() {
        let options = DisplayOptions {
            unit: DisplayUnit::Kb,
            rounding: Rounding::Legacy,
            json: false,
        };
        let listing = render_listing(&sample_map(), &options);

        assert!(listing.starts_with("a-much-longer-name   3\n"));
    }

    #[test]
    fn test_render_listing_wide_characters() {
        let map: SizeMap = [
            (PathBuf::from("日本"), FolderSize::Bytes(1)),
            (PathBuf::from("abcde"), FolderSize::Bytes(2)),
        ]
        .into_iter()
        .collect();

        let listing = render_listing(&map, &DisplayOptions::default());

        assert_eq!(listing, "abcde  2\n日本   1\n");
    }

    #[test]
    fn test_render_empty_listing() {
        assert_eq!(render_listing(&SizeMap::default(), &DisplayOptions::default()), "");
    }

    #[test]
    fn test_json_output() {
        let output = JsonOutput::from_size_map(&sample_map(), &DisplayOptions::default());
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["unit"], "bytes");
        assert_eq!(value["folders"][0]["path"], "a-much-longer-name");
        assert_eq!(value["folders"][0]["size_bytes"], 2048);
        assert_eq!(value["folders"][2]["size_bytes"], serde_json::Value::Null);
        assert_eq!(value["folders"][2]["size"], "-1");
        assert_eq!(value["folders"][2]["available"], false);
        assert_eq!(value["summary"]["total_folders"], 3);
        assert_eq!(value["summary"]["unavailable"], 1);
        assert_eq!(value["summary"]["total_size"], 2058);
    }

    #[test]
    fn test_summary_line_mentions_unavailable() {
        let line = summary_line(&sample_map());
        assert!(line.starts_with("3 folders, "));
        assert!(line.ends_with("1 unavailable (shown as -1)"));
    }
}
