//! Command-line interface definition and argument parsing.
//!
//! This module defines all command-line arguments using
//! [clap](https://docs.rs/clap/). Helper methods on [`Cli`] accept a
//! [`FileConfig`] reference so that config-file values act as defaults that
//! CLI arguments can override (layered config).

use std::path::Path;

use clap::{Parser, Subcommand, ValueEnum};

use foldersize::candidates::default_pattern;
use foldersize::config::{DisplayOptions, FileConfig, ScanOptions};
use foldersize::units::DisplayUnit;

/// Command-line arguments selecting how sizes are displayed.
#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
struct DisplayArgs {
    /// Display sizes in KB
    ///
    /// One KB is 1024 bytes. Sizes are rounded up to the next whole KB.
    #[arg(short = 'k', long = "kb")]
    kb: bool,

    /// Display sizes in MB (takes precedence over -k)
    ///
    /// One MB is 1024 * 1024 bytes. Sizes are rounded up to the next whole MB.
    /// When both -k and -m are given, sizes are shown in MB.
    #[arg(short = 'm', long = "mb")]
    mb: bool,

    /// Display human-readable sizes (KiB, MiB, GiB, ...)
    ///
    /// Ignored when -k or -m is given.
    #[arg(short = 'H', long)]
    human: bool,

    /// Round KB/MB values the way older listings did (value / 1024 + 1)
    ///
    /// This adds one unit even to exact multiples and to empty folders.
    /// Only useful when comparing against output of the old tool.
    #[arg(long)]
    legacy_rounding: bool,

    /// Output results as a single JSON object for scripting/piping
    ///
    /// When enabled, the progress spinner is suppressed and a single JSON
    /// document is printed to stdout.
    #[arg(long)]
    json: bool,
}

/// Command-line arguments controlling folder traversal.
#[derive(Parser)]
struct ScanningArgs {
    /// The number of threads used to measure folders
    ///
    /// A value of 0 uses the default number of threads (typically the number
    /// of CPU cores). Every folder is still measured in its own task.
    #[arg(short = 't', long)]
    threads: Option<usize>,

    /// Log every folder as it is measured
    ///
    /// Traversal failures are always reported; this adds per-folder detail.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Follow symbolic links while measuring
    ///
    /// By default a symbolic link counts as the size of the link itself.
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Hide the progress spinner
    #[arg(short = 'q', long)]
    quiet: bool,
}

/// Top-level subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Inspect or initialise the configuration file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Subcommands for `config`.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration (file values + defaults for unset keys)
    Show,
    /// Write a default config.toml if none exists yet
    Init,
    /// Print the path to the config file
    Path,
}

/// Main command-line interface structure.
///
/// Prints the total size of every folder matching PATTERN, sorted from
/// largest to smallest.
#[derive(Parser)]
#[command(name = "foldersize")]
#[command(
    about = "Print total size of folders, sorted from largest to smallest",
    after_help = "Folders that cannot be fully read are listed with a size of -1."
)]
#[command(version)]
pub struct Cli {
    /// Subcommand (e.g. `config`)
    #[command(subcommand)]
    pub subcommand: Option<Commands>,

    /// Glob pattern selecting the folders to measure
    ///
    /// Defaults to every entry in the current directory. Quote the pattern
    /// to keep the shell from expanding it. Matches that are not folders are
    /// ignored.
    pattern: Option<String>,

    /// Display options
    #[command(flatten)]
    display: DisplayArgs,

    /// Scanning options
    #[command(flatten)]
    scanning: ScanningArgs,
}

impl Cli {
    /// Whether `--json` structured output mode is enabled.
    #[must_use]
    pub const fn json(&self) -> bool {
        self.display.json
    }

    /// Whether the progress spinner should be hidden.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.scanning.quiet || self.display.json
    }

    /// Resolve the glob pattern.
    ///
    /// Priority: CLI argument > config file `pattern` > `<cwd>/*`.
    #[must_use]
    pub fn pattern(&self, config: &FileConfig, cwd: &Path) -> String {
        self.pattern
            .clone()
            .or_else(|| config.expanded_pattern())
            .unwrap_or_else(|| default_pattern(cwd))
    }

    /// Extract display options from CLI args and config file.
    ///
    /// - **unit**: `-m` > `-k` > `-H` > config `unit` > bytes
    /// - **legacy rounding**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn display_options(&self, config: &FileConfig) -> DisplayOptions {
        let unit = DisplayUnit::from_flags(self.display.kb, self.display.mb, self.display.human)
            .or_else(|| {
                config
                    .display
                    .unit
                    .as_ref()
                    .and_then(|s| DisplayUnit::from_str(s, true).ok())
            })
            .unwrap_or_default();

        DisplayOptions::new(
            unit,
            self.display.legacy_rounding || config.display.legacy_rounding.unwrap_or(false),
            self.display.json,
        )
    }

    /// Extract scanning options from CLI args and config file.
    ///
    /// - **threads**: CLI > config > `0` (default)
    /// - **verbose**, **`follow_links`**: CLI flag `||` config value `||` `false`
    #[must_use]
    pub fn scan_options(&self, config: &FileConfig) -> ScanOptions {
        ScanOptions {
            verbose: self.scanning.verbose || config.scanning.verbose.unwrap_or(false),
            threads: self
                .scanning
                .threads
                .or(config.scanning.threads)
                .unwrap_or(0),
            follow_links: self.scanning.follow_links
                || config.scanning.follow_links.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use foldersize::config::file::{FileDisplayConfig, FileScanConfig};
    use foldersize::units::Rounding;

    #[test]
    fn test_default_values() {
        let args = Cli::parse_from(["foldersize"]);
        let config = FileConfig::default();

        assert!(args.subcommand.is_none());
        assert!(!args.json());
        assert!(!args.quiet());

        let display = args.display_options(&config);
        assert_eq!(display.unit, DisplayUnit::Bytes);
        assert_eq!(display.rounding, Rounding::Ceil);
        assert!(!display.json);

        let scan = args.scan_options(&config);
        assert!(!scan.verbose);
        assert_eq!(scan.threads, 0);
        assert!(!scan.follow_links);
    }

    #[test]
    fn test_default_pattern_uses_cwd() {
        let args = Cli::parse_from(["foldersize"]);
        let pattern = args.pattern(&FileConfig::default(), Path::new("/work"));
        assert_eq!(Path::new(&pattern), Path::new("/work/*"));
    }

    #[test]
    fn test_explicit_pattern() {
        let args = Cli::parse_from(["foldersize", "/var/*"]);
        let config = FileConfig {
            pattern: Some("/config/*".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(args.pattern(&config, Path::new("/work")), "/var/*");
    }

    #[test]
    fn test_config_pattern_used_when_cli_absent() {
        let args = Cli::parse_from(["foldersize"]);
        let config = FileConfig {
            pattern: Some("/config/*".to_string()),
            ..FileConfig::default()
        };
        assert_eq!(args.pattern(&config, Path::new("/work")), "/config/*");
    }

    #[test]
    fn test_two_patterns_is_a_usage_error() {
        let result = Cli::try_parse_from(["foldersize", "/a/*", "/b/*"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_kb_flag() {
        let args = Cli::parse_from(["foldersize", "-k"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.unit, DisplayUnit::Kb);
    }

    #[test]
    fn test_mb_flag() {
        let args = Cli::parse_from(["foldersize", "--mb"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.unit, DisplayUnit::Mb);
    }

    #[test]
    fn test_mb_wins_over_kb() {
        let args = Cli::parse_from(["foldersize", "-k", "-m"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.unit, DisplayUnit::Mb);

        let args = Cli::parse_from(["foldersize", "-m", "-k"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.unit, DisplayUnit::Mb);
    }

    #[test]
    fn test_human_flag() {
        let args = Cli::parse_from(["foldersize", "-H"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.unit, DisplayUnit::Human);
    }

    #[test]
    fn test_config_unit_used_when_no_flag() {
        let args = Cli::parse_from(["foldersize"]);
        let config = FileConfig {
            display: FileDisplayConfig {
                unit: Some("MB".to_string()),
                legacy_rounding: Some(true),
            },
            ..FileConfig::default()
        };

        let display = args.display_options(&config);
        assert_eq!(display.unit, DisplayUnit::Mb);
        assert_eq!(display.rounding, Rounding::Legacy);
    }

    #[test]
    fn test_cli_unit_overrides_config_unit() {
        let args = Cli::parse_from(["foldersize", "-k"]);
        let config = FileConfig {
            display: FileDisplayConfig {
                unit: Some("mb".to_string()),
                legacy_rounding: None,
            },
            ..FileConfig::default()
        };

        assert_eq!(args.display_options(&config).unit, DisplayUnit::Kb);
    }

    #[test]
    fn test_invalid_config_unit_falls_back_to_bytes() {
        let args = Cli::parse_from(["foldersize"]);
        let config = FileConfig {
            display: FileDisplayConfig {
                unit: Some("parsecs".to_string()),
                legacy_rounding: None,
            },
            ..FileConfig::default()
        };

        assert_eq!(args.display_options(&config).unit, DisplayUnit::Bytes);
    }

    #[test]
    fn test_legacy_rounding_flag() {
        let args = Cli::parse_from(["foldersize", "-k", "--legacy-rounding"]);
        let display = args.display_options(&FileConfig::default());
        assert_eq!(display.rounding, Rounding::Legacy);
    }

    #[test]
    fn test_json_implies_quiet() {
        let args = Cli::parse_from(["foldersize", "--json"]);
        assert!(args.json());
        assert!(args.quiet());
        assert!(args.display_options(&FileConfig::default()).json);
    }

    #[test]
    fn test_scanning_options() {
        let args = Cli::parse_from(["foldersize", "--verbose", "--threads", "8", "-L"]);
        let scan = args.scan_options(&FileConfig::default());

        assert!(scan.verbose);
        assert_eq!(scan.threads, 8);
        assert!(scan.follow_links);
    }

    #[test]
    fn test_config_scanning_values() {
        let args = Cli::parse_from(["foldersize"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                threads: Some(3),
                verbose: Some(true),
                follow_links: Some(true),
            },
            ..FileConfig::default()
        };

        let scan = args.scan_options(&config);
        assert_eq!(scan.threads, 3);
        assert!(scan.verbose);
        assert!(scan.follow_links);
    }

    #[test]
    fn test_cli_threads_override_config() {
        let args = Cli::parse_from(["foldersize", "-t", "2"]);
        let config = FileConfig {
            scanning: FileScanConfig {
                threads: Some(16),
                ..FileScanConfig::default()
            },
            ..FileConfig::default()
        };

        assert_eq!(args.scan_options(&config).threads, 2);
    }

    #[test]
    fn test_short_flags_with_pattern() {
        let args = Cli::parse_from(["foldersize", "-k", "-q", "-v", "src/*"]);
        let config = FileConfig::default();

        assert_eq!(args.pattern(&config, Path::new(".")), "src/*");
        assert!(args.quiet());
        assert!(args.scan_options(&config).verbose);
        assert_eq!(args.display_options(&config).unit, DisplayUnit::Kb);
    }

    #[test]
    fn test_config_subcommands() {
        for (name, expected) in [
            ("show", "Show"),
            ("init", "Init"),
            ("path", "Path"),
        ] {
            let args = Cli::parse_from(["foldersize", "config", name]);
            let Some(Commands::Config { command }) = args.subcommand else {
                panic!("expected config subcommand");
            };
            let actual = match command {
                ConfigCommand::Show => "Show",
                ConfigCommand::Init => "Init",
                ConfigCommand::Path => "Path",
            };
            assert_eq!(actual, expected);
        }
    }
}
