//! Contract session: the connected wallet account and everything loaded for it.
//!
//! `ContractSession` reacts to account changes by loading (or clearing) the
//! user's profile and explanations in the [`AppStore`], and builds the vmc
//! transactions the user can sign. Transactions are returned, never submitted.

use std::sync::Arc;

use tokio::sync::RwLock;
use vismove_core::AppStore;
use vismove_core::config::Category;
use vismove_core::error::{Result, VisMoveError};
use vismove_core::explanation::RegistryStats;
use vismove_core::notification::Notification;
use vismove_core::transaction::Transaction;
use vismove_core::wallet::WalletAccount;
use vismove_infrastructure::ContractService;

pub const WALLET_REQUIRED_MESSAGE: &str = "Please connect your wallet first";

/// Hook layer between the wallet, the contract service and the store.
///
/// # Thread Safety
///
/// The account lives behind a `tokio::sync::RwLock`; the store is shared.
/// A superseding account change does not cancel an in-flight load, so the
/// last load to finish wins.
pub struct ContractSession {
    service: Arc<ContractService>,
    store: Arc<AppStore>,
    account: RwLock<Option<WalletAccount>>,
}

impl ContractSession {
    pub fn new(service: Arc<ContractService>, store: Arc<AppStore>) -> Self {
        Self {
            service,
            store,
            account: RwLock::new(None),
        }
    }

    pub fn service(&self) -> &Arc<ContractService> {
        &self.service
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    /// Switches the connected account.
    ///
    /// With an account, profile and explanations are loaded concurrently.
    /// Without one, both are cleared from the store.
    pub async fn set_account(&self, account: Option<WalletAccount>) {
        *self.account.write().await = account.clone();

        match account {
            Some(account) => {
                tracing::info!(
                    "[ContractSession] Account connected: {}",
                    account.short_address()
                );
                futures::join!(
                    self.load_user_data(&account.address),
                    self.load_user_explanations(&account.address)
                );
            }
            None => {
                tracing::info!("[ContractSession] Account disconnected");
                self.store.set_user_profile(None);
                self.store.set_explanations(Vec::new());
            }
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.account.read().await.is_some()
    }

    pub async fn user_address(&self) -> Option<String> {
        self.account
            .read()
            .await
            .as_ref()
            .map(|account| account.address.clone())
    }

    /// Reloads the profile of `address`, bracketed by the loading flag.
    pub async fn load_user_data(&self, address: &str) {
        self.store.set_is_loading(true);
        let profile = self.service.get_user_profile(address).await;
        self.store.set_user_profile(profile);
        self.store.set_is_loading(false);
    }

    pub async fn load_user_explanations(&self, address: &str) {
        let explanations = self.service.get_user_explanations(address).await;
        self.store.set_explanations(explanations);
    }

    /// Builds `vmc::create_explanation`; `None` without a wallet or on a
    /// build failure.
    pub async fn create_explanation(
        &self,
        title: &str,
        package_id: &str,
        module_name: &str,
        function_name: &str,
        explanation_text: &str,
    ) -> Option<Transaction> {
        self.build_with_wallet("Failed to create explanation", || {
            self.service.create_explanation_tx(
                title,
                package_id,
                module_name,
                function_name,
                explanation_text,
            )
        })
        .await
    }

    pub async fn rate_explanation(&self, explanation_id: &str, rating: u64) -> Option<Transaction> {
        self.build_with_wallet("Failed to rate explanation", || {
            self.service.rate_explanation_tx(explanation_id, rating)
        })
        .await
    }

    pub async fn register_user(&self, username: &str) -> Option<Transaction> {
        self.build_with_wallet("Failed to register user", || {
            self.service.register_user_tx(username)
        })
        .await
    }

    /// Builds `vmc::add_user_preference` for the loaded profile.
    pub async fn add_preference(&self, preference: &str) -> Option<Transaction> {
        if let Err(e) = self.require_wallet().await {
            self.report_missing_wallet(e);
            return None;
        }
        let Some(profile) = self.store.snapshot().user_profile else {
            self.store.add_notification(Notification::error(
                "No user profile found; register before adding preferences",
            ));
            return None;
        };
        self.build_with_wallet("Failed to add preference", || {
            self.service.add_user_preference_tx(&profile.id, preference)
        })
        .await
    }

    pub async fn get_registry_stats(&self) -> RegistryStats {
        self.service.get_registry_stats().await
    }

    pub async fn get_explanations_by_category(&self, category: Category) -> Vec<String> {
        self.service.get_explanations_by_category(category).await
    }

    /// Fails with [`VisMoveError::WalletNotConnected`] when no account is set.
    pub async fn require_wallet(&self) -> Result<()> {
        if self.is_connected().await {
            Ok(())
        } else {
            Err(VisMoveError::WalletNotConnected)
        }
    }

    fn report_missing_wallet(&self, error: VisMoveError) {
        tracing::warn!("[ContractSession] {}", error);
        self.store
            .add_notification(Notification::error(WALLET_REQUIRED_MESSAGE));
    }

    async fn build_with_wallet<F>(&self, failure_message: &str, build: F) -> Option<Transaction>
    where
        F: FnOnce() -> Result<Transaction>,
    {
        if let Err(e) = self.require_wallet().await {
            self.report_missing_wallet(e);
            return None;
        }

        self.store.set_is_loading(true);
        let result = build();
        self.store.set_is_loading(false);

        match result {
            Ok(tx) => Some(tx),
            Err(e) => {
                tracing::error!("[ContractSession] {}: {}", failure_message, e);
                self.store
                    .add_notification(Notification::error(failure_message));
                None
            }
        }
    }
}
