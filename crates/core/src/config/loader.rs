//! Config path resolution
//!
//! Resolves the monitor configuration file relative to the running
//! executable, so a deployed copy carries its settings with it.

use std::path::PathBuf;

use super::{ConfigError, ConfigResult};

/// File name of the monitor configuration
const CONFIG_FILE: &str = "hookscope.toml";

/// Returns the directory the running executable lives in.
pub fn base_dir() -> ConfigResult<PathBuf> {
    let exe = std::env::current_exe().map_err(ConfigError::IoError)?;

    exe.parent()
        .map(PathBuf::from)
        .ok_or(ConfigError::NoConfigDirectory)
}

/// Returns the path of the monitor config file, next to the executable.
pub fn config_path() -> ConfigResult<PathBuf> {
    Ok(base_dir()?.join(CONFIG_FILE))
}
