//! Display units and scaling of byte counts.
//!
//! Sizes are always measured in bytes; this module only decides how they are
//! shown. Two rounding modes exist: ceiling division (the default) and the
//! legacy `value / 1024 + 1` rule kept for output compatibility with older
//! listings.

use clap::ValueEnum;
use humansize::{BINARY, format_size};
use serde::Serialize;

use crate::size_map::FolderSize;

const KIB: u64 = 1024;

/// Unit used when rendering folder sizes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    /// Raw byte counts
    #[default]
    Bytes,

    /// Kilobytes (1024 bytes)
    Kb,

    /// Megabytes (1024 * 1024 bytes)
    Mb,

    /// Human-readable binary units (KiB, MiB, GiB, ...)
    Human,
}

/// How a byte count is rounded when scaled to KB or MB.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Rounding {
    /// Round up to the next whole unit; exact multiples stay unchanged.
    #[default]
    Ceil,

    /// Integer-divide and add one at every step, as older listings did.
    Legacy,
}

impl DisplayUnit {
    /// Resolve the unit from the individual `-k` / `-m` / `-H` switches.
    ///
    /// MB takes precedence over KB, and both take precedence over the
    /// human-readable format.
    #[must_use]
    pub const fn from_flags(kb: bool, mb: bool, human: bool) -> Option<Self> {
        if mb {
            Some(Self::Mb)
        } else if kb {
            Some(Self::Kb)
        } else if human {
            Some(Self::Human)
        } else {
            None
        }
    }

    /// Lowercase name used in JSON output and the config file.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bytes => "bytes",
            Self::Kb => "kb",
            Self::Mb => "mb",
            Self::Human => "human",
        }
    }
}

/// Scale a byte count to KB.
#[must_use]
pub const fn to_kb(bytes: u64, rounding: Rounding) -> u64 {
    match rounding {
        Rounding::Ceil => bytes.div_ceil(KIB),
        Rounding::Legacy => bytes / KIB + 1,
    }
}

/// Scale a byte count to MB.
#[must_use]
pub const fn to_mb(bytes: u64, rounding: Rounding) -> u64 {
    match rounding {
        Rounding::Ceil => bytes.div_ceil(KIB * KIB),
        Rounding::Legacy => to_kb(bytes, Rounding::Legacy) / KIB + 1,
    }
}

/// Render a single folder size in the requested unit.
///
/// Unavailable sizes render as `-1` regardless of unit, so they never get
/// scaled into something that looks like a real size.
#[must_use]
pub fn render_size(size: FolderSize, unit: DisplayUnit, rounding: Rounding) -> String {
    let FolderSize::Bytes(bytes) = size else {
        return FolderSize::UNAVAILABLE_SENTINEL.to_string();
    };

    match unit {
        DisplayUnit::Bytes => bytes.to_string(),
        DisplayUnit::Kb => to_kb(bytes, rounding).to_string(),
        DisplayUnit::Mb => to_mb(bytes, rounding).to_string(),
        DisplayUnit::Human => format_size(bytes, BINARY),
    }
}
