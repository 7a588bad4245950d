//! # foldersize
//!
//! Print the total size of every folder matching a glob pattern, sorted from
//! largest to smallest.
//!
//! Each folder is measured in its own task, so a directory with many large
//! siblings is summarized in roughly the time of its biggest child.
//!
//! ## Usage
//!
//! ```bash
//! # Every folder in the current directory, in bytes
//! foldersize
//!
//! # Folders matching a pattern, in MB
//! foldersize -m '/var/lib/*'
//!
//! # Machine-readable output
//! foldersize --json '~/src/*'
//! ```

mod cli;

use std::{io::IsTerminal, process::exit};

use anyhow::{Ok, Result, bail};
use clap::{Parser, error::ErrorKind};
use cli::{Cli, Commands, ConfigCommand};
use colored::Colorize;
use foldersize::{
    SizeMapBuilder,
    candidates::folder_candidates,
    config::FileConfig,
    output::{JsonOutput, render_listing, summary_line},
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

/// Entry point for the foldersize application.
///
/// Usage errors and fatal errors both exit with status 1; `--help` and
/// `--version` exit with status 0.
fn main() {
    let args = match Cli::try_parse() {
        std::result::Result::Ok(args) => args,
        Err(err) => {
            err.print().ok();
            exit(usage_exit_code(err.kind()));
        }
    };

    if let Err(err) = inner_main(&args) {
        eprintln!("{} {err}", "Error:".red());

        exit(1);
    }
}

/// Exit status for a command line that did not parse into a [`Cli`].
const fn usage_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Main application logic that can return errors.
///
/// Resolves options, expands the pattern into candidate folders, measures
/// them concurrently, and prints the listing.
///
/// # Errors
///
/// Returns errors from thread-pool configuration, pattern expansion,
/// candidate stat calls, or JSON serialization. Failures while measuring an
/// individual folder are not errors; that folder is listed as `-1`.
fn inner_main(args: &Cli) -> Result<()> {
    if let Some(Commands::Config { command }) = &args.subcommand {
        return handle_config_command(command);
    }

    let json_mode = args.json();
    let file_config = load_config(json_mode);
    let scan_options = args.scan_options(&file_config);
    let display_options = args.display_options(&file_config);

    let verbose = scan_options.verbose;

    setup_logging(verbose);

    if scan_options.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(scan_options.threads)
            .build_global()?;
    }

    let cwd = std::env::current_dir()?;
    let pattern = args.pattern(&file_config, &cwd);
    let folders = folder_candidates(&pattern)?;

    let progress = if args.quiet() || !std::io::stderr().is_terminal() {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
        pb.set_message(format!("Measuring {} folders...", folders.len()));
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    };

    let size_map = SizeMapBuilder::new(scan_options)
        .on_progress(|done, total| progress.set_message(format!("Measuring... {done}/{total}")))
        .build(&folders);

    progress.finish_and_clear();

    if json_mode {
        let output = JsonOutput::from_size_map(&size_map, &display_options);
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print!("{}", render_listing(&size_map, &display_options));

    if verbose {
        eprintln!("{}", summary_line(&size_map).dimmed());
    }

    Ok(())
}

/// Install the `tracing` subscriber writing to stderr.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("foldersize=debug,warn")
        } else {
            EnvFilter::new("foldersize=warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

// ── Config subcommand ────────────────────────────────────────────────

/// Default config file template written by `config init`.
const CONFIG_TEMPLATE: &str = r#"# foldersize configuration
# All values shown are their defaults. Uncomment and change as needed.

# Glob used when no pattern is given (defaults to every entry in the current directory)
# pattern = "./*"

[display]
# Unit for folder sizes: bytes, kb, mb, human
# unit = "bytes"

# Round KB/MB the way older listings did (value / 1024 + 1)
# legacy_rounding = false

[scanning]
# Number of threads used to measure folders (0 = all CPU cores)
# threads = 0

# Log every folder as it is measured
# verbose = false

# Follow symbolic links while measuring
# follow_links = false
"#;

/// Dispatch a `config` subcommand.
fn handle_config_command(cmd: &ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Path => match FileConfig::config_path() {
            Some(path) => println!("{}", path.display()),
            None => bail!("Could not determine the config directory on this platform"),
        },
        ConfigCommand::Show => show_config()?,
        ConfigCommand::Init => init_config()?,
    }
    Ok(())
}

/// Print the effective configuration (file values merged with defaults).
fn show_config() -> Result<()> {
    let path = FileConfig::config_path();

    let (file_exists, config) = match &path {
        Some(p) if p.exists() => (true, FileConfig::load_from(p)?),
        _ => (false, FileConfig::default()),
    };

    match &path {
        Some(p) if file_exists => println!("Config file: {} (found)", p.display()),
        Some(p) => println!(
            "Config file: {} (not found - showing defaults)",
            p.display()
        ),
        None => println!("Config file: (cannot determine path on this platform)"),
    }

    println!();
    println!("{}", format_config(&config));
    Ok(())
}

/// Format a [`FileConfig`] as a human-readable table, showing defaults for `None` fields.
fn format_config(config: &FileConfig) -> String {
    fn show_str(val: Option<&str>, default: &str) -> String {
        val.map_or_else(
            || format!("\"{default}\"  (default)"),
            |v| format!("\"{v}\""),
        )
    }
    fn show_bool(val: Option<bool>, default: bool) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }
    fn show_usize(val: Option<usize>, default: &str) -> String {
        val.map_or_else(|| format!("{default}  (default)"), |v| v.to_string())
    }

    format!(
        "\
pattern         = {pattern}

[display]
unit            = {unit}
legacy_rounding = {legacy_rounding}

[scanning]
threads         = {threads}
verbose         = {verbose}
follow_links    = {follow_links}",
        pattern = show_str(config.pattern.as_deref(), "./*"),
        unit = show_str(config.display.unit.as_deref(), "bytes"),
        legacy_rounding = show_bool(config.display.legacy_rounding, false),
        threads = show_usize(config.scanning.threads, "0 (all cores)"),
        verbose = show_bool(config.scanning.verbose, false),
        follow_links = show_bool(config.scanning.follow_links, false),
    )
}

/// Write a default config template to the config file path if it does not exist yet.
fn init_config() -> Result<()> {
    let Some(path) = FileConfig::config_path() else {
        bail!("Could not determine the config directory on this platform");
    };

    if path.exists() {
        println!("Config file already exists at: {}", path.display());
        println!("Remove it first if you want to regenerate it.");
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {e}",
                parent.display()
            )
        })?;
    }

    std::fs::write(&path, CONFIG_TEMPLATE)
        .map_err(|e| anyhow::anyhow!("Failed to write config file {}: {e}", path.display()))?;

    println!("Config file written to: {}", path.display());
    Ok(())
}

/// Load the configuration file, falling back to defaults on failure.
fn load_config(json_mode: bool) -> FileConfig {
    match FileConfig::load() {
        std::result::Result::Ok(config) => config,
        Err(e) => {
            if !json_mode {
                eprintln!("{} {e}", "Warning: Failed to load config file:".yellow());
            }
            FileConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_exit_code(args: &[&str]) -> Option<i32> {
        Cli::try_parse_from(args.iter().copied())
            .err()
            .map(|err| usage_exit_code(err.kind()))
    }

    #[test]
    fn test_help_and_version_exit_zero() {
        assert_eq!(parse_exit_code(&["foldersize", "--help"]), Some(0));
        assert_eq!(parse_exit_code(&["foldersize", "--version"]), Some(0));
    }

    #[test]
    fn test_usage_errors_exit_one() {
        assert_eq!(parse_exit_code(&["foldersize", "--no-such-flag"]), Some(1));
        assert_eq!(parse_exit_code(&["foldersize", "-t", "many"]), Some(1));
        assert_eq!(parse_exit_code(&["foldersize", "./*"]), None);
    }

    #[test]
    fn test_config_template_parses_to_defaults() {
        let config: FileConfig = toml::from_str(CONFIG_TEMPLATE).unwrap();

        assert!(config.pattern.is_none());
        assert!(config.display.unit.is_none());
        assert!(config.scanning.threads.is_none());
    }

    #[test]
    fn test_format_config_shows_defaults() {
        let text = format_config(&FileConfig::default());

        assert!(text.contains("unit            = \"bytes\"  (default)"));
        assert!(text.contains("threads         = 0 (all cores)  (default)"));
    }

    #[test]
    fn test_format_config_shows_values() {
        let config: FileConfig = toml::from_str("[display]\nunit = \"mb\"\n").unwrap();
        let text = format_config(&config);

        assert!(text.contains("unit            = \"mb\""));
        assert!(!text.contains("unit            = \"mb\"  (default)"));
    }
}
