//! Configuration module for `coursereturn`

use crate::core::report::ReportFormat;
use crate::core::semester::Semester;
use crate::logger::Level;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$COURSE_RETURN";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Evaluation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationConfig {
    /// Fixed return term (`YYYY.P`); empty means "derive from today's date"
    #[serde(default)]
    pub current_semester: String,
}

/// Report configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Default output format (text, json, markdown, html)
    #[serde(default)]
    pub format: String,
    /// Directory for saved reports
    #[serde(default)]
    pub reports_dir: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Evaluation settings
    #[serde(default)]
    pub evaluation: EvaluationConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the return term
    pub current_semester: Option<String>,
    /// Override report format
    pub format: Option<String>,
    /// Override reports directory
    pub reports_dir: Option<String>,
}

impl Config {
    /// Get the `$COURSE_RETURN` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/coursereturn`
    /// - macOS: `~/Library/Application Support/coursereturn`
    /// - Windows: `%APPDATA%\coursereturn`
    #[must_use]
    pub fn get_coursereturn_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("coursereturn")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled,
    /// so upgrades pick up new settings without touching user values.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.evaluation.current_semester.is_empty()
            && !defaults.evaluation.current_semester.is_empty()
        {
            self.evaluation
                .current_semester
                .clone_from(&defaults.evaluation.current_semester);
            changed = true;
        }

        if self.report.format.is_empty() && !defaults.report.format.is_empty() {
            self.report.format.clone_from(&defaults.report.format);
            changed = true;
        }
        if self.report.reports_dir.is_empty() && !defaults.report.reports_dir.is_empty() {
            self.report
                .reports_dir
                .clone_from(&defaults.report.reports_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the file on disk is untouched.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(current) = &overrides.current_semester {
            self.evaluation.current_semester.clone_from(current);
        }

        if let Some(format) = &overrides.format {
            self.report.format.clone_from(format);
        }
        if let Some(reports_dir) = &overrides.reports_dir {
            self.report.reports_dir.clone_from(reports_dir);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_coursereturn_dir`](Self::get_coursereturn_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_coursereturn_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$COURSE_RETURN` in a string
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_coursereturn_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults; `$COURSE_RETURN` is expanded
    /// in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.report.reports_dir = Self::expand_variables(&config.report.reports_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from the user config file, or create it from defaults
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `path`, or create it there from defaults
    ///
    /// An existing file is merged with defaults and re-saved when new fields
    /// were added. Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let defaults = Self::from_defaults();

        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save_to(path);
                    }
                    return config;
                }
            }
        } else {
            // First run
            let _ = defaults.save_to(path);
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration as TOML to `path`
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or the file cannot be written
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `current_semester`, `format`,
    /// `reports_dir` (dashed spellings accepted).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "current_semester" | "current-semester" => {
                Some(self.evaluation.current_semester.clone())
            }
            "format" => Some(self.report.format.clone()),
            "reports_dir" | "reports-dir" => Some(self.report.reports_dir.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value is invalid for it
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_ascii_lowercase();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "current_semester" | "current-semester" => {
                if !value.is_empty() {
                    Semester::parse(value)
                        .map_err(|e| format!("Invalid semester for 'current_semester': {e}"))?;
                }
                self.evaluation.current_semester = value.to_string();
            }
            "format" => {
                let format = value.parse::<ReportFormat>()?;
                self.report.format = format.to_string();
            }
            "reports_dir" | "reports-dir" => self.report.reports_dir = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "current_semester" | "current-semester" => self
                .evaluation
                .current_semester
                .clone_from(&defaults.evaluation.current_semester),
            "format" => self.report.format.clone_from(&defaults.report.format),
            "reports_dir" | "reports-dir" => self
                .report
                .reports_dir
                .clone_from(&defaults.report.reports_dir),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults by deleting the config file
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// The configured return term, if one is set
    ///
    /// # Errors
    /// Returns an error if the configured value is not `YYYY.P`.
    pub fn current_semester(&self) -> Result<Option<Semester>, String> {
        let value = self.evaluation.current_semester.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Semester::parse(value)
            .map(Some)
            .map_err(|e| format!("Invalid configured current_semester '{value}': {e}"))
    }

    /// The configured report format; empty means text
    ///
    /// # Errors
    /// Returns an error if the configured format is unknown.
    pub fn report_format(&self) -> Result<ReportFormat, String> {
        if self.report.format.is_empty() {
            Ok(ReportFormat::default())
        } else {
            self.report.format.parse()
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[evaluation]")?;
        writeln!(
            f,
            "  current_semester = \"{}\"",
            self.evaluation.current_semester
        )?;

        writeln!(f, "\n[report]")?;
        writeln!(f, "  format = \"{}\"", self.report.format)?;
        writeln!(f, "  reports_dir = \"{}\"", self.report.reports_dir)?;

        Ok(())
    }
}
