//! Package source backed by a bytecode decompiler.
//!
//! Fetches the module map of a published package from the public fullnode of
//! the requested network and runs `<decompiler> -b <module>.mv` on every
//! module.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use serde_json::{Map, Value};
use tokio::process::Command;
use vismove_core::address::MoveAddress;
use vismove_core::config::{SuiNetwork, ToolsConfig};
use vismove_core::error::{Result, VisMoveError};
use vismove_core::package::{ModuleSources, PackageSource};

use crate::rpc_client::SuiRpcClient;

/// [`PackageSource`] that decompiles package bytecode with `revela`.
#[derive(Debug, Clone)]
pub struct RevelaPackageSource {
    decompiler: String,
}

impl RevelaPackageSource {
    pub fn new(decompiler: impl Into<String>) -> Self {
        Self {
            decompiler: decompiler.into(),
        }
    }

    pub fn from_config(tools: &ToolsConfig) -> Self {
        Self::new(tools.decompiler.clone())
    }

    pub fn decompiler(&self) -> &str {
        &self.decompiler
    }

    /// Decompiles every entry of a `moduleMap` (module name -> base64 bytecode).
    async fn decompile_module_map(&self, module_map: &Map<String, Value>) -> Result<ModuleSources> {
        let work_dir = tempfile::tempdir()?;
        let mut sources = ModuleSources::new();

        for (name, encoded) in module_map {
            let encoded = encoded.as_str().ok_or_else(|| {
                VisMoveError::Decompile(format!("module {name} bytecode is not a string"))
            })?;
            let bytecode = BASE64_STANDARD.decode(encoded).map_err(|e| {
                VisMoveError::Decompile(format!("module {name} bytecode is not base64: {e}"))
            })?;

            let path = work_dir.path().join(format!("{name}.mv"));
            tokio::fs::write(&path, bytecode).await?;

            let output = Command::new(&self.decompiler)
                .arg("-b")
                .arg(&path)
                .output()
                .await
                .map_err(|e| {
                    VisMoveError::Decompile(format!("failed to run {}: {}", self.decompiler, e))
                })?;

            if !output.status.success() {
                return Err(VisMoveError::Decompile(format!(
                    "{} exited with {} on module {}: {}",
                    self.decompiler,
                    output.status,
                    name,
                    String::from_utf8_lossy(&output.stderr).trim()
                )));
            }

            tracing::debug!("[PackageReader] Decompiled module {}", name);
            sources.insert(
                name.clone(),
                String::from_utf8_lossy(&output.stdout).into_owned(),
            );
        }

        Ok(sources)
    }
}

#[async_trait]
impl PackageSource for RevelaPackageSource {
    async fn package_modules(
        &self,
        package_id: &MoveAddress,
        network: SuiNetwork,
    ) -> Result<ModuleSources> {
        let client = SuiRpcClient::for_network(network);
        let module_map = client
            .get_module_map(&package_id.to_canonical_string())
            .await?;

        tracing::info!(
            "[PackageReader] Package {} on {} has {} modules",
            package_id,
            network,
            module_map.len()
        );

        self.decompile_module_map(&module_map).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use serde_json::json;

    fn module_map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_decompiles_each_module_with_flag_and_path() {
        // `echo` stands in for the decompiler: it prints its arguments.
        let source = RevelaPackageSource::new("echo");
        let map = module_map(json!({
            "pool": BASE64_STANDARD.encode([0xa1, 0x1c, 0xeb, 0x0b]),
            "router": BASE64_STANDARD.encode([0xa1, 0x1c, 0xeb, 0x0b]),
        }));

        let sources = source.decompile_module_map(&map).await.unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources["pool"].starts_with("-b "));
        assert!(sources["pool"].trim_end().ends_with("pool.mv"));
        assert!(sources["router"].trim_end().ends_with("router.mv"));
    }

    #[tokio::test]
    async fn test_invalid_base64_is_decompile_error() {
        let source = RevelaPackageSource::new("echo");
        let map = module_map(json!({ "pool": "***" }));
        let err = source.decompile_module_map(&map).await.unwrap_err();
        assert!(matches!(err, VisMoveError::Decompile(_)));
    }

    #[tokio::test]
    async fn test_missing_decompiler_is_decompile_error() {
        let source = RevelaPackageSource::new("vismove-no-such-decompiler");
        let map = module_map(json!({ "pool": BASE64_STANDARD.encode([1, 2, 3]) }));
        let err = source.decompile_module_map(&map).await.unwrap_err();
        assert!(matches!(err, VisMoveError::Decompile(_)));
    }

    #[tokio::test]
    async fn test_failing_decompiler_is_decompile_error() {
        let source = RevelaPackageSource::new("false");
        let map = module_map(json!({ "pool": BASE64_STANDARD.encode([1, 2, 3]) }));
        let err = source.decompile_module_map(&map).await.unwrap_err();
        assert!(matches!(err, VisMoveError::Decompile(_)));
    }

    #[test]
    fn test_from_config() {
        let source = RevelaPackageSource::from_config(&ToolsConfig::default());
        assert_eq!(source.decompiler(), "revela");
    }
}
