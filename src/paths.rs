//! Config file resolution for compose-bucket
//!
//! # Environment Variables
//!
//! - `COMPOSE_BUCKET_CONFIG` - Path to the config file (e.g., `~/dotfiles/compose-bucket.toml`)
//!
//! # Path Resolution Priority
//!
//! For config_file():
//! 1. `--config` flag
//! 2. `COMPOSE_BUCKET_CONFIG` environment variable
//! 3. `XDG_CONFIG_HOME/compose-bucket/config.toml` (if set)
//! 4. `~/.config/compose-bucket/config.toml`

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable for config file override
pub const ENV_CONFIG: &str = "COMPOSE_BUCKET_CONFIG";

const APP_DIR: &str = "compose-bucket";
const CONFIG_FILE: &str = "config.toml";

/// Get the config file path
///
/// The file doesn't have to exist; a missing file means built-in defaults.
pub fn config_file(flag: Option<&Path>) -> Result<PathBuf> {
    // 1. Explicit flag
    if let Some(path) = flag {
        let path = expand(&path.to_string_lossy());
        log::debug!("Using config file from --config: {}", path.display());
        return Ok(path);
    }

    // 2. Environment variable override
    if let Ok(file) = std::env::var(ENV_CONFIG) {
        let path = expand(&file);
        log::debug!("Using config file from {}: {}", ENV_CONFIG, path.display());
        return Ok(path);
    }

    // 3. XDG_CONFIG_HOME
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join(APP_DIR).join(CONFIG_FILE);
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    // 4. Default: ~/.config/compose-bucket/config.toml
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join(APP_DIR).join(CONFIG_FILE);
    log::debug!("Using default config file: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path
pub fn expand(path: &str) -> PathBuf {
    match shellexpand::full(path) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(path).as_ref()),
    }
}
