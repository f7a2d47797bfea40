//! Run configuration
//!
//! Resolves command-line options into concrete paths and log levels. Library
//! users can build a [`DocgenConfig`] directly instead of going through the CLI.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::level_filters::LevelFilter;

use crate::cli::Cli;
use crate::error::{DocgenError, Result};

/// Report file name used when no output path is given
pub const DEFAULT_OUTPUT_FILE: &str = "DOCUMENTATION.md";

/// Log directory used when none is given
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Prefix of per-run log files
pub const LOG_FILE_PREFIX: &str = "roledoc";

/// Settings for one documentation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocgenConfig {
    /// Role directory to inspect (read-only)
    pub role_dir: PathBuf,
    /// Report destination
    pub output_path: PathBuf,
    /// Directory receiving the per-run log file
    pub log_dir: PathBuf,
    /// Number of `-v` flags
    pub verbosity: u8,
    /// Whether the report footer carries a generation timestamp
    pub timestamp: bool,
}

impl DocgenConfig {
    /// Configuration with defaults for the given role directory
    pub fn new(role_dir: impl Into<PathBuf>) -> Self {
        let role_dir = role_dir.into();
        Self {
            output_path: default_output_path(&role_dir),
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            verbosity: 0,
            timestamp: true,
            role_dir,
        }
    }

    pub fn from_cli(cli: &Cli) -> Self {
        let mut config = Self::new(&cli.role_directory)
            .with_log_dir(&cli.logs)
            .with_verbosity(cli.verbose);
        if let Some(output) = &cli.output {
            config = config.with_output(output);
        }
        if cli.no_timestamp {
            config = config.without_timestamp();
        }
        config
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = dir.into();
        self
    }

    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn without_timestamp(mut self) -> Self {
        self.timestamp = false;
        self
    }

    /// Screen log level: errors only by default, each `-v` shows more
    pub fn console_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::ERROR,
            1 => LevelFilter::WARN,
            2 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    }

    /// Log file level: stage info and warnings always, debug at `-vvv`
    pub fn file_level(&self) -> LevelFilter {
        if self.verbosity >= 3 {
            LevelFilter::DEBUG
        } else {
            LevelFilter::INFO
        }
    }

    /// Reject settings that cannot produce a report
    pub fn validate(&self) -> Result<()> {
        if self.output_path.is_dir() {
            return Err(DocgenError::config(format!(
                "output path is a directory: {}",
                self.output_path.display()
            )));
        }
        Ok(())
    }

    /// Log file for a run started at `started`
    pub fn log_file_path(&self, started: NaiveDateTime) -> PathBuf {
        self.log_dir.join(format!(
            "{}_{}.log",
            LOG_FILE_PREFIX,
            started.format("%Y%m%d_%H%M%S")
        ))
    }
}

/// `DOCUMENTATION.md` inside the role directory
pub fn default_output_path(role_dir: &Path) -> PathBuf {
    role_dir.join(DEFAULT_OUTPUT_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = DocgenConfig::new("roles/web");
        assert_eq!(config.output_path, PathBuf::from("roles/web/DOCUMENTATION.md"));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.verbosity, 0);
        assert!(config.timestamp);
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "roledoc",
            "roles/web",
            "-o",
            "out/web.md",
            "--logs",
            "run-logs",
            "-vv",
            "--no-timestamp",
        ])
        .unwrap();
        let config = DocgenConfig::from_cli(&cli);

        assert_eq!(config.role_dir, PathBuf::from("roles/web"));
        assert_eq!(config.output_path, PathBuf::from("out/web.md"));
        assert_eq!(config.log_dir, PathBuf::from("run-logs"));
        assert_eq!(config.verbosity, 2);
        assert!(!config.timestamp);
    }

    #[test]
    fn test_from_cli_default_output() {
        let cli = Cli::try_parse_from(["roledoc", "roles/db"]).unwrap();
        let config = DocgenConfig::from_cli(&cli);
        assert_eq!(config.output_path, PathBuf::from("roles/db/DOCUMENTATION.md"));
    }

    #[test]
    fn test_levels() {
        let levels: Vec<LevelFilter> = (0..=4)
            .map(|v| DocgenConfig::new("r").with_verbosity(v).console_level())
            .collect();
        assert_eq!(
            levels,
            vec![
                LevelFilter::ERROR,
                LevelFilter::WARN,
                LevelFilter::INFO,
                LevelFilter::DEBUG,
                LevelFilter::DEBUG,
            ]
        );
        assert_eq!(DocgenConfig::new("r").file_level(), LevelFilter::INFO);
        assert_eq!(
            DocgenConfig::new("r").with_verbosity(3).file_level(),
            LevelFilter::DEBUG
        );
    }

    #[test]
    fn test_validate_rejects_directory_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = DocgenConfig::new(dir.path()).with_output(dir.path());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocgenError::Config(_)));
        assert!(err.is_invocation_error());

        assert!(DocgenConfig::new(dir.path()).validate().is_ok());
    }

    #[test]
    fn test_log_file_path() {
        let started = NaiveDate::from_ymd_opt(2026, 1, 2)
            .and_then(|d| d.and_hms_opt(3, 4, 5))
            .unwrap();
        let config = DocgenConfig::new("r").with_log_dir("/var/log/roledoc");
        assert_eq!(
            config.log_file_path(started),
            PathBuf::from("/var/log/roledoc/roledoc_20260102_030405.log")
        );
    }
}
