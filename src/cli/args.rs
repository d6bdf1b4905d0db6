//! CLI argument definitions for `coursereturn`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use course_return::config::ConfigOverrides;
use course_return::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `Level` for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Level::from(*self))
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `format`, `reports_dir`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Check whether a request is an ordinary return to course.
    ///
    /// The request is rejected as ineligible when the enrollment is cancelled,
    /// when the return is to another course, or when four or more semesters
    /// lie between the last active semester and the current one.
    Evaluate {
        /// Student registration number
        #[arg(long, value_name = "ID")]
        student_id: String,

        /// Last semester with an active or suspended enrollment (YYYY.P)
        #[arg(long, value_name = "YYYY.P", allow_hyphen_values = true)]
        last_active: String,

        /// Semester of the return (YYYY.P); defaults to config, then today's semester
        #[arg(long, value_name = "YYYY.P", allow_hyphen_values = true)]
        current: Option<String>,

        /// The enrollment is cancelled
        #[arg(long)]
        cancelled: bool,

        /// The return is to a different course than the course of origin
        #[arg(long)]
        different_course: bool,

        /// Output format: text, json, markdown (md) or html; defaults to config `format`
        #[arg(short, long, value_name = "FORMAT")]
        format: Option<String>,

        /// Write the rendered decision to this file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also save the rendered decision into the configured reports directory
        #[arg(long)]
        save: bool,
    },
    /// Count the semesters strictly between two semesters.
    Gap {
        /// Earlier semester (YYYY.P)
        #[arg(value_name = "START", allow_hyphen_values = true)]
        start: String,

        /// Later semester (YYYY.P)
        #[arg(value_name = "END", allow_hyphen_values = true)]
        end: String,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "coursereturn",
    about = "Return-to-course eligibility checker",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config current semester
    #[arg(long = "config-current-semester", value_name = "YYYY.P")]
    pub config_current_semester: Option<String>,

    /// Override config current semester (short form)
    #[arg(long = "current-semester", value_name = "YYYY.P")]
    pub current_semester: Option<String>,

    /// Override config report format
    #[arg(long = "config-format", value_name = "FORMAT")]
    pub config_format: Option<String>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--reports-dir`) take precedence over long-form
    /// flags (e.g., `--config-reports-dir`) when both are provided. `None`
    /// means no override.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            current_semester: self
                .current_semester
                .clone()
                .or_else(|| self.config_current_semester.clone()),
            format: self.config_format.clone(),
            reports_dir: self
                .reports_dir
                .as_ref()
                .or(self.config_reports_dir.as_ref())
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}
