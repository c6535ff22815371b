//! Configuration file loading with precedence handling.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Default number of columns moved by one horizontal shift.
pub const DEFAULT_SHIFT_WIDTH: usize = 10;

/// Default number of remembered command lines.
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Default tracing filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (file may not exist or have permission issues).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown keys.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything missing falls back to the defaults in
/// [`ResolvedConfig`]. Corresponds to `~/.config/vpager/config.toml`:
///
/// ```toml
/// shift_width = 8
/// ignore_case = true
/// history_capacity = 50
/// log_level = "debug"
/// log_file_path = "/tmp/vpager.log"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Columns moved by one horizontal shift.
    #[serde(default)]
    pub shift_width: Option<usize>,

    /// Compile search patterns case-insensitively.
    #[serde(default)]
    pub ignore_case: Option<bool>,

    /// Number of command lines remembered by the command overlay.
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_level: Option<String>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Columns moved by one horizontal shift.
    pub shift_width: usize,
    /// Case-insensitive search.
    pub ignore_case: bool,
    /// Command history capacity.
    pub history_capacity: usize,
    /// Tracing filter used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            shift_width: DEFAULT_SHIFT_WIDTH,
            ignore_case: false,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_file_path: default_log_path(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/vpager/vpager.log` on Unix-like systems, or the
/// platform's state directory elsewhere. Falls back to the current
/// directory if no state directory is known.
pub fn default_log_path() -> PathBuf {
    match dirs::state_dir() {
        Some(state_dir) => state_dir.join("vpager").join("vpager.log"),
        None => PathBuf::from("vpager.log"),
    }
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but has read or parse errors.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    // Missing file is not an error - use defaults
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Resolve default config file path.
///
/// Returns `~/.config/vpager/config.toml` on Unix, appropriate path on other
/// platforms. Returns `None` if no config directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vpager").join("config.toml"))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `VPAGER_CONFIG` environment variable
/// 3. Default path `~/.config/vpager/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
///
/// # Errors
///
/// Returns error only if a config file exists but cannot be read or parsed.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("VPAGER_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    match default_config_path() {
        Some(default_path) => load_config_file(default_path),
        None => Ok(None),
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `VPAGER_IGNORE_CASE`: `1`/`true`/`yes` or `0`/`false`/`no`; other
///   values are ignored
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(ignore_case) = std::env::var("VPAGER_IGNORE_CASE")
        .ok()
        .as_deref()
        .and_then(parse_flag)
    {
        config.ignore_case = ignore_case;
    }

    config
}

/// Merge config file into defaults to create resolved config.
///
/// For each field in `ConfigFile`, if `Some(value)`, use it; otherwise use default.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        shift_width: config.shift_width.unwrap_or(defaults.shift_width),
        ignore_case: config.ignore_case.unwrap_or(defaults.ignore_case),
        history_capacity: config.history_capacity.unwrap_or(defaults.history_capacity),
        log_level: config.log_level.unwrap_or(defaults.log_level),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are applied.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    ignore_case_override: Option<bool>,
    shift_width_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(ignore_case) = ignore_case_override {
        config.ignore_case = ignore_case;
    }

    if let Some(shift_width) = shift_width_override {
        config.shift_width = shift_width;
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
