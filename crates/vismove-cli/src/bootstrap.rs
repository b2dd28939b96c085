use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use vismove_application::{ContractSession, ExplainerWorkflow};
use vismove_core::AppStore;
use vismove_core::VisMoveError;
use vismove_core::config::{ContractConfig, RootConfig, SuiNetwork};
use vismove_core::explainer::{DynExplainer, Explainer, ExplanationRequest, FunctionExplanation};
use vismove_core::wallet::{DynTransactionSigner, WalletAccount};
use vismove_infrastructure::{ConfigService, ContractService, RevelaPackageSource, SuiRpcClient};
use vismove_interaction::OpenAIExplainer;

use crate::signer::ExportSigner;

/// Everything a command needs, wired from the resolved configuration.
pub struct AppBootstrap {
    pub config: RootConfig,
    pub session: Arc<ContractSession>,
    pub signer: DynTransactionSigner,
}

impl AppBootstrap {
    /// Resolves the configuration and builds the services.
    ///
    /// `network` overrides the configured network; see [`override_network`].
    pub fn new(config_service: &ConfigService, network: Option<SuiNetwork>) -> Result<Self> {
        let mut config = config_service
            .get_config()
            .context("Failed to load configuration")?;

        if let Some(network) = network {
            override_network(&mut config.contract, network);
        }

        tracing::info!(
            "[Bootstrap] Using package {} on {} ({})",
            config.contract.package_id,
            config.contract.network,
            config.contract.rpc_url
        );

        let client = Arc::new(SuiRpcClient::new(config.contract.rpc_url.clone()));
        let service = Arc::new(ContractService::new(client, config.contract.clone()));

        let store = AppStore::global();
        store.set_selected_network(config.contract.network.as_str());

        let session = Arc::new(ContractSession::new(service, store));

        Ok(Self {
            config,
            session,
            signer: Arc::new(ExportSigner),
        })
    }

    /// Connects `account` (if any) and loads its data into the store.
    pub async fn connect(&self, account: Option<WalletAccount>) {
        self.session.set_account(account).await;
    }

    /// Builds the explainer workflow.
    ///
    /// Without `OPENAI_API_KEY` the workflow still lists modules and
    /// functions; asking for an explanation reports the missing key.
    pub fn workflow(&self) -> ExplainerWorkflow {
        let explainer: DynExplainer = match OpenAIExplainer::try_from_env() {
            Ok(explainer) => Arc::new(explainer),
            Err(e) => {
                tracing::debug!("[Bootstrap] Explainer unavailable: {}", e);
                Arc::new(UnavailableExplainer(e))
            }
        };
        ExplainerWorkflow::new(
            self.session.clone(),
            Arc::new(RevelaPackageSource::from_config(&self.config.tools)),
            explainer,
            self.signer.clone(),
            self.config.contract.network,
        )
    }
}

/// Switches `contract` to `network`.
///
/// The RPC endpoint follows only while it is the public fullnode of the
/// previous network; an explicitly configured URL is kept.
pub fn override_network(contract: &mut ContractConfig, network: SuiNetwork) {
    if contract.rpc_url == contract.network.fullnode_url() {
        contract.rpc_url = network.fullnode_url();
    } else if contract.network != network {
        tracing::warn!(
            "[Bootstrap] Keeping configured RPC URL {} for {}",
            contract.rpc_url,
            network
        );
    }
    contract.network = network;
}

/// Stands in for the explainer when it could not be configured.
struct UnavailableExplainer(VisMoveError);

#[async_trait]
impl Explainer for UnavailableExplainer {
    async fn explain(&self, _request: ExplanationRequest) -> vismove_core::Result<FunctionExplanation> {
        Err(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_follows_default_fullnode() {
        let mut contract = ContractConfig::default();
        assert_eq!(contract.rpc_url, SuiNetwork::Testnet.fullnode_url());

        override_network(&mut contract, SuiNetwork::Mainnet);

        assert_eq!(contract.network, SuiNetwork::Mainnet);
        assert_eq!(contract.rpc_url, "https://fullnode.mainnet.sui.io:443");
    }

    #[test]
    fn test_override_keeps_custom_rpc_url() {
        let mut contract = ContractConfig {
            rpc_url: "http://127.0.0.1:9000".to_string(),
            ..ContractConfig::default()
        };

        override_network(&mut contract, SuiNetwork::Devnet);

        assert_eq!(contract.network, SuiNetwork::Devnet);
        assert_eq!(contract.rpc_url, "http://127.0.0.1:9000");
    }
}
