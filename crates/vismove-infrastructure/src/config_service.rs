//! Configuration service implementation.
//!
//! Resolves the [`RootConfig`] from three layers, later layers winning:
//! built-in defaults, the config file (`~/.config/vismove/config.toml`),
//! then environment variables.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::{Arc, RwLock};

use serde::Deserialize;
use vismove_core::config::{RootConfig, SuiNetwork};
use vismove_core::error::{Result, VisMoveError};

use crate::paths::VisMovePaths;

pub const ENV_PACKAGE_ID: &str = "VISMOVE_PACKAGE_ID";
pub const ENV_REGISTRY_ID: &str = "VISMOVE_REGISTRY_ID";
pub const ENV_ADMIN_CAP_ID: &str = "VISMOVE_ADMIN_CAP_ID";
pub const ENV_NETWORK: &str = "VISMOVE_SUI_NETWORK";
pub const ENV_RPC_URL: &str = "VISMOVE_SUI_RPC_URL";
pub const ENV_DECOMPILER: &str = "VISMOVE_DECOMPILER";

/// Environment lookup, injectable so tests do not touch process env.
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    contract: ContractOverrides,
    tools: ToolsOverrides,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContractOverrides {
    package_id: Option<String>,
    registry_id: Option<String>,
    admin_cap_id: Option<String>,
    network: Option<SuiNetwork>,
    rpc_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ToolsOverrides {
    decompiler: Option<String>,
}

/// Configuration service that resolves and caches the root configuration.
#[derive(Clone)]
pub struct ConfigService {
    /// Config file location; `None` disables the file layer.
    path: Option<PathBuf>,
    env: EnvLookup,
    /// Cached configuration.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file and the process env.
    ///
    /// When the platform config directory cannot be determined the file layer
    /// is skipped.
    pub fn new() -> Self {
        let path = VisMovePaths::config_file()
            .map_err(|e| tracing::warn!("[Config] {}; skipping config file", e))
            .ok();
        Self {
            path,
            env: Arc::new(|key| std::env::var(key).ok().filter(|v| !v.trim().is_empty())),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file instead of the default location.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self.invalidate_cache();
        self
    }

    /// Replaces the environment lookup.
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self.invalidate_cache();
        self
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Gets the root configuration, resolving it if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load()?;

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Writes `config` to the config file, creating parent directories.
    pub fn save(&self, config: &RootConfig) -> Result<PathBuf> {
        let path = self
            .path
            .clone()
            .ok_or_else(|| VisMoveError::config("no config file location available"))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, toml::to_string_pretty(config)?)?;
        self.invalidate_cache();
        tracing::info!("[Config] Wrote configuration to {}", path.display());
        Ok(path)
    }

    fn load(&self) -> Result<RootConfig> {
        let file = self.read_file()?;
        let mut config = RootConfig::default();

        let contract = &mut config.contract;
        let env = |key: &str| (self.env)(key);

        if let Some(id) = env(ENV_PACKAGE_ID).or(file.contract.package_id) {
            contract.package_id = id;
        }
        if let Some(id) = env(ENV_REGISTRY_ID).or(file.contract.registry_id) {
            contract.registry_id = id;
        }
        if let Some(id) = env(ENV_ADMIN_CAP_ID).or(file.contract.admin_cap_id) {
            contract.admin_cap_id = id;
        }

        let network = match env(ENV_NETWORK) {
            Some(raw) => Some(SuiNetwork::from_str(raw.trim()).map_err(|_| {
                VisMoveError::config(format!("{ENV_NETWORK}='{raw}' is not a Sui network"))
            })?),
            None => file.contract.network,
        };
        if let Some(network) = network {
            contract.network = network;
        }

        // An explicit endpoint wins; otherwise follow the selected network.
        contract.rpc_url = env(ENV_RPC_URL)
            .or(file.contract.rpc_url)
            .unwrap_or_else(|| contract.network.fullnode_url());

        if let Some(decompiler) = env(ENV_DECOMPILER).or(file.tools.decompiler) {
            config.tools.decompiler = decompiler;
        }

        if config.contract.is_placeholder() {
            tracing::warn!(
                "[Config] Contract ids are not configured; set {} / {} / {}",
                ENV_PACKAGE_ID,
                ENV_REGISTRY_ID,
                ENV_ADMIN_CAP_ID
            );
        }

        Ok(config)
    }

    fn read_file(&self) -> Result<ConfigFile> {
        let Some(path) = self.path.as_ref() else {
            return Ok(ConfigFile::default());
        };
        if !path.exists() {
            tracing::debug!("[Config] {} does not exist, using defaults", path.display());
            return Ok(ConfigFile::default());
        }
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
