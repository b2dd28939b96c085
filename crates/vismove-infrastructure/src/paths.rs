//! Unified path management for vismove configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/vismove/           # Config directory (platform config dir)
//! └── config.toml              # Contract ids, network, tools
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "vismove";

/// Unified path management for vismove.
pub struct VisMovePaths;

impl VisMovePaths {
    /// Returns the vismove configuration directory (e.g. `~/.config/vismove/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = VisMovePaths::config_dir().unwrap();
        assert!(config_dir.ends_with("vismove"));
    }

    #[test]
    fn test_config_file() {
        let config_file = VisMovePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = VisMovePaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }
}
