//! Core functionality for comp-check
//!
//! This crate parses and validates `.comp` hardware component descriptors
//! and builds the response envelope reported back to callers.

pub mod comp;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub use comp::{
    CheckOutcome, CheckReport, CheckResponse, CompChecker, CompIssue, ComponentType, LoadError,
    ParsedDocument, Properties,
};

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "comp-check.toml";

/// Configuration structure for comp-check
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Log level used when no verbosity flag or RUST_LOG is given
    pub verbosity: String,

    /// Report rendering
    pub output: OutputConfig,

    /// Directory scanning
    pub scan: ScanConfig,
}

/// Output configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format
    pub format: OutputFormat,

    /// Pretty-print JSON output
    pub pretty: bool,
}

/// How reports are rendered
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("Unknown output format '{}', expected 'text' or 'json'", other),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Directory scanning configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// File extension to pick up, without the dot
    pub extension: String,

    /// Descend into subdirectories
    pub recursive: bool,
}

impl ScanConfig {
    /// Whether `path` carries the configured extension (case-insensitive)
    pub fn matches(&self, path: &Path) -> bool {
        let wanted = self.extension.trim_start_matches('.');
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self { extension: "comp".to_string(), recursive: false }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbosity: "info".to_string(),
            output: OutputConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Explicit path if given, else `comp-check.toml` in the working
    /// directory if present, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(DEFAULT_CONFIG_FILE);
                if local.is_file() { Self::from_file(local) } else { Ok(Self::default()) }
            }
        }
    }
}
