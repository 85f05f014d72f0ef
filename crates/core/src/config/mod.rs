//! Monitor configuration
//!
//! TOML-backed settings for the polling monitor: how often to
//! re-snapshot, which processes to watch or ignore, and log verbosity.
//! Missing files are created with defaults; unknown keys are ignored and
//! missing keys fall back per-field.

mod loader;

use serde::{Deserialize, Serialize};

pub use loader::{base_dir, config_path};

pub use crate::diff::FilterMode;
use crate::diff::HookFilter;

/// Configuration system errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read or write config file
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML content
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config to TOML
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Could not determine config directory from the executable location
    #[error("Config directory not available - could not resolve executable path")]
    NoConfigDirectory,
}

/// Result type for config operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Monitor settings, stored next to the executable as `hookscope.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    /// Config version for future migration support
    pub version: u32,

    /// Seconds between snapshots in monitor mode
    pub poll_interval_secs: u64,

    /// Whether `programs` selects hooks to keep or to drop
    pub filter_mode: FilterMode,

    /// Program filters: a decimal or 0x-prefixed entry is a pid, anything
    /// else an image name; a leading ':' forces name interpretation
    pub programs: Vec<String>,

    /// Enable debug logging
    pub debug: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            poll_interval_secs: 7,
            filter_mode: FilterMode::Include,
            programs: Vec::new(),
            debug: false,
        }
    }
}

impl MonitorConfig {
    /// Load config from file, creating default if missing.
    pub fn load() -> ConfigResult<Self> {
        let path = config_path()?;

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&content)?;
            tracing::debug!("Loaded monitor config from {:?}", path);
            Ok(config)
        } else {
            let default = Self::default();
            default.save()?;
            tracing::info!("Created default monitor config at {:?}", path);
            Ok(default)
        }
    }

    /// Save config to file.
    pub fn save(&self) -> ConfigResult<()> {
        let path = config_path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        tracing::debug!("Saved monitor config to {:?}", path);
        Ok(())
    }

    /// Reload config from file.
    pub fn reload(&mut self) -> ConfigResult<()> {
        let path = config_path()?;
        let content = std::fs::read_to_string(&path)?;
        *self = toml::from_str(&content)?;
        tracing::debug!("Reloaded monitor config from {:?}", path);
        Ok(())
    }

    /// Build the diff filter from the configured program list.
    pub fn hook_filter(&self) -> HookFilter {
        let mut names = Vec::new();
        let mut pids = Vec::new();

        for entry in &self.programs {
            if let Some(forced) = entry.strip_prefix(':') {
                names.push(forced.to_string());
            } else if let Some(pid) = parse_pid(entry) {
                pids.push(pid);
            } else {
                names.push(entry.clone());
            }
        }

        HookFilter {
            mode: self.filter_mode,
            names,
            pids,
        }
    }
}

/// Parse a program entry as a pid: plain decimal or 0x-prefixed hex.
fn parse_pid(entry: &str) -> Option<u32> {
    if let Some(hex) = entry.strip_prefix("0x").or_else(|| entry.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        entry.parse().ok()
    }
}
