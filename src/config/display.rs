//! Display configuration for the folder listing.

use crate::units::{DisplayUnit, Rounding};

/// How the final listing is rendered.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisplayOptions {
    /// Unit used for folder sizes
    pub unit: DisplayUnit,

    /// Rounding applied when scaling to KB or MB
    pub rounding: Rounding,

    /// Emit a single JSON document instead of the text listing
    pub json: bool,
}

impl DisplayOptions {
    /// Build display options, selecting legacy rounding when requested.
    #[must_use]
    pub const fn new(unit: DisplayUnit, legacy_rounding: bool, json: bool) -> Self {
        Self {
            unit,
            rounding: if legacy_rounding {
                Rounding::Legacy
            } else {
                Rounding::Ceil
            },
            json,
        }
    }
}
