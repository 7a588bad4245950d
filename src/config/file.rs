//! Configuration file support for persistent settings.
//!
//! Settings are read from `~/.config/foldersize/config.toml` (or the
//! platform-specific equivalent). Values from the file serve as defaults that
//! command-line arguments override.
//!
//! # Layering
//!
//! The precedence order is: **CLI argument > config file > hardcoded default**.
//!
//! # Example config
//!
//! ```toml
//! # Glob used when no pattern is given on the command line
//! pattern = "~/src/*"
//!
//! [display]
//! unit = "kb"
//! legacy_rounding = false
//!
//! [scanning]
//! threads = 4
//! verbose = false
//! follow_links = false
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration file structure.
///
/// All fields are `Option<T>` so that unset keys can fall through to the
/// hardcoded defaults.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Default glob pattern (tilde-expanded)
    pub pattern: Option<String>,

    /// Display options
    #[serde(default)]
    pub display: FileDisplayConfig,

    /// Scanning options
    #[serde(default)]
    pub scanning: FileScanConfig,
}

/// Display options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileDisplayConfig {
    /// Default unit (`"bytes"`, `"kb"`, `"mb"`, `"human"`)
    pub unit: Option<String>,

    /// Whether to use the legacy `+1` rounding
    pub legacy_rounding: Option<bool>,
}

/// Scanning options from the configuration file.
#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileScanConfig {
    /// Number of threads for measuring folders
    pub threads: Option<usize>,

    /// Whether to show verbose output
    pub verbose: Option<bool>,

    /// Whether to follow symbolic links
    pub follow_links: Option<bool>,
}

/// Expand a leading `~` in a path to the user's home directory.
///
/// Paths that don't start with `~` are returned unchanged.
#[must_use]
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

impl FileConfig {
    /// Returns the path where the configuration file is expected.
    ///
    /// `None` if the platform config directory cannot be determined.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("foldersize").join("config.toml"))
    }

    /// Load configuration from the default config file location.
    ///
    /// A missing file yields the default (empty) configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        Self::load_from(&path)
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid TOML or unknown keys.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file at {}: {e}", path.display())
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file at {}: {e}", path.display())
        })?;

        Ok(config)
    }

    /// The configured default pattern, with a leading `~` expanded.
    #[must_use]
    pub fn expanded_pattern(&self) -> Option<String> {
        self.pattern
            .as_deref()
            .map(|p| expand_tilde(Path::new(p)).to_string_lossy().into_owned())
    }
}
