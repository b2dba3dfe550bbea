//! TOML-based configuration for the `banker` command.
//!
//! The configuration file is optional.  When `--config <path>` is given that
//! file must exist; otherwise `./banker.toml` is used if present and the
//! built-in defaults apply when it is not.
//!
//! ```toml
//! [output]
//! format = "json"
//! show_details = false
//!
//! [logging]
//! log_level = "debug"
//! ```
//!
//! # Serde default values
//!
//! Every field carries a `#[serde(default ...)]` attribute, so a file only
//! needs to mention the settings it changes.  An empty file is equivalent to
//! no file at all.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// File name looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "banker.toml";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// How reports are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON of the report structures.
    Json,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Report output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Whether text output includes the per-process Allocation / Max / Need block.
    #[serde(default = "default_true")]
    pub show_details: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// `tracing` filter used when `RUST_LOG` is unset, e.g. `"warn"` or `"banker_core=debug"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_true() -> bool {
    true
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            show_details: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads the configuration.
///
/// With `explicit` set, that file is read and must exist.  Without it,
/// [`DEFAULT_CONFIG_FILE`] in the working directory is read if present and
/// `CliConfig::default()` is returned if not.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors (including a missing
/// explicit file) and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config(explicit: Option<&Path>) -> Result<CliConfig, ConfigError> {
    match explicit {
        Some(path) => read_config(path),
        None => match read_config(Path::new(DEFAULT_CONFIG_FILE)) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                Ok(CliConfig::default())
            }
            other => other,
        },
    }
}

/// Reads and parses one config file.
///
/// # Errors
///
/// See [`load_config`].
pub fn read_config(path: &Path) -> Result<CliConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: CliConfig = toml::from_str(&content)?;
    debug!(path = %path.display(), ?cfg, "loaded config");
    Ok(cfg)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
