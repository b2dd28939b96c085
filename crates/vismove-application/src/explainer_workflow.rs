//! Contract explainer workflow.
//!
//! Drives the explain-a-package flow: parse a package id, list its modules,
//! list a module's functions, ask the explainer about one function, then
//! optionally save the explanation on chain and rate it. User-facing outcomes
//! are reported as notifications in the shared store; methods return `None`
//! whenever a step could not complete.

use std::sync::Arc;

use vismove_core::MoveAddress;
use vismove_core::config::{SuiNetwork, validate_rating};
use vismove_core::explainer::{DynExplainer, ExplanationRequest, FunctionExplanation, ViewMode};
use vismove_core::notification::Notification;
use vismove_core::package::{DynPackageSource, ModuleSources, extract_functions};
use vismove_core::transaction::Transaction;
use vismove_core::wallet::{DynTransactionSigner, TransactionReceipt};

use crate::contract_session::ContractSession;

pub const INVALID_PACKAGE_TITLE: &str = "Invalid package ID";
pub const EXPLANATION_FAILED_TITLE: &str = "Explanation Failed";

/// State of one explainer screen.
pub struct ExplainerWorkflow {
    session: Arc<ContractSession>,
    package_source: DynPackageSource,
    explainer: DynExplainer,
    signer: DynTransactionSigner,
    network: SuiNetwork,

    package_id: Option<MoveAddress>,
    modules: ModuleSources,
    selected_module: Option<String>,
    selected_function: Option<String>,
    explanation: Option<FunctionExplanation>,
    view_mode: ViewMode,
    saved_explanation_id: Option<String>,
}

impl ExplainerWorkflow {
    pub fn new(
        session: Arc<ContractSession>,
        package_source: DynPackageSource,
        explainer: DynExplainer,
        signer: DynTransactionSigner,
        network: SuiNetwork,
    ) -> Self {
        Self {
            session,
            package_source,
            explainer,
            signer,
            network,
            package_id: None,
            modules: ModuleSources::new(),
            selected_module: None,
            selected_function: None,
            explanation: None,
            view_mode: ViewMode::default(),
            saved_explanation_id: None,
        }
    }

    // ------------------------------------------------------------------
    // Steps
    // ------------------------------------------------------------------

    /// Fetches the modules of `package_id` and returns their names.
    ///
    /// Ids must be `0x` followed by hex digits; anything else is reported as
    /// an invalid package id and nothing is fetched.
    pub async fn parse_package(&mut self, package_id: &str) -> Option<Vec<String>> {
        let package_id: MoveAddress = match package_id.trim().parse() {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("[ExplainerWorkflow] Rejected package id: {}", e);
                self.notify(
                    Notification::error("Package IDs are 0x followed by hex digits")
                        .with_title(INVALID_PACKAGE_TITLE),
                );
                return None;
            }
        };

        self.reset();
        let modules = match self
            .package_source
            .package_modules(&package_id, self.network)
            .await
        {
            Ok(modules) => modules,
            Err(e) => {
                tracing::error!(
                    "[ExplainerWorkflow] Failed to load package {}: {}",
                    package_id,
                    e
                );
                self.notify(
                    Notification::error(e.to_string()).with_title("Failed to load package"),
                );
                return None;
            }
        };

        self.package_id = Some(package_id);
        self.modules = modules;
        Some(self.module_names())
    }

    /// Selects a module of the parsed package and returns its functions.
    pub fn select_module(&mut self, name: &str) -> Option<Vec<String>> {
        let Some(source) = self.modules.get(name) else {
            self.notify(Notification::error(format!(
                "Module '{name}' is not part of the package"
            )));
            return None;
        };
        let functions = extract_functions(source);

        self.selected_module = Some(name.to_string());
        self.selected_function = None;
        self.explanation = None;
        self.saved_explanation_id = None;
        Some(functions)
    }

    /// Asks the explainer about `name` in the selected module.
    pub async fn select_function(&mut self, name: &str) -> Option<&FunctionExplanation> {
        let Some(source) = self.selected_module_source() else {
            self.notify(Notification::error("Select a module first"));
            return None;
        };
        let request = ExplanationRequest {
            contract_code: source.to_string(),
            function_name: name.to_string(),
        };

        self.selected_function = Some(name.to_string());
        self.explanation = None;
        self.saved_explanation_id = None;

        match self.explainer.explain(request).await {
            Ok(explanation) => {
                self.explanation = Some(explanation);
                self.explanation.as_ref()
            }
            Err(e) => {
                tracing::error!("[ExplainerWorkflow] Explanation of {} failed: {}", name, e);
                self.notify(
                    Notification::error(e.to_string()).with_title(EXPLANATION_FAILED_TITLE),
                );
                None
            }
        }
    }

    /// Switches the displayed view of the current explanation.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> Option<&str> {
        self.view_mode = mode;
        self.current_view()
    }

    /// Builds the create-explanation transaction and hands it to the signer.
    pub async fn save_explanation(&mut self, title: &str) -> Option<TransactionReceipt> {
        let (Some(package_id), Some(module), Some(function), Some(explanation)) = (
            self.package_id.as_ref(),
            self.selected_module.as_deref(),
            self.selected_function.as_deref(),
            self.explanation.as_ref(),
        ) else {
            self.notify(Notification::error("Generate an explanation before saving it"));
            return None;
        };

        let tx = self
            .session
            .create_explanation(
                title,
                &package_id.to_canonical_string(),
                module,
                function,
                &explanation.explanation,
            )
            .await?;

        let receipt = self
            .submit(tx, "Explanation saved", "Failed to save explanation")
            .await?;
        self.saved_explanation_id = receipt.created_object_ids.first().cloned();
        Some(receipt)
    }

    /// Rates the explanation saved in this workflow.
    pub async fn rate(&mut self, rating: u64) -> Option<TransactionReceipt> {
        let Some(explanation_id) = self.saved_explanation_id.clone() else {
            self.notify(Notification::error("Save the explanation before rating it"));
            return None;
        };
        self.rate_by_id(&explanation_id, rating).await
    }

    /// Rates any explanation object.
    pub async fn rate_by_id(&self, explanation_id: &str, rating: u64) -> Option<TransactionReceipt> {
        if let Err(e) = validate_rating(rating) {
            self.notify(Notification::error(e.to_string()).with_title("Invalid rating"));
            return None;
        }
        let tx = self.session.rate_explanation(explanation_id, rating).await?;
        self.submit(tx, "Rating submitted", "Failed to rate explanation").await
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    pub fn session(&self) -> &Arc<ContractSession> {
        &self.session
    }

    pub fn package_id(&self) -> Option<&MoveAddress> {
        self.package_id.as_ref()
    }

    pub fn module_names(&self) -> Vec<String> {
        self.modules.keys().cloned().collect()
    }

    pub fn selected_module(&self) -> Option<&str> {
        self.selected_module.as_deref()
    }

    pub fn selected_module_source(&self) -> Option<&str> {
        self.selected_module
            .as_ref()
            .and_then(|name| self.modules.get(name))
            .map(String::as_str)
    }

    pub fn selected_function(&self) -> Option<&str> {
        self.selected_function.as_deref()
    }

    pub fn explanation(&self) -> Option<&FunctionExplanation> {
        self.explanation.as_ref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Text of the current explanation in the current view.
    pub fn current_view(&self) -> Option<&str> {
        self.explanation
            .as_ref()
            .map(|explanation| explanation.view(self.view_mode))
    }

    pub fn saved_explanation_id(&self) -> Option<&str> {
        self.saved_explanation_id.as_deref()
    }

    fn reset(&mut self) {
        self.package_id = None;
        self.modules.clear();
        self.selected_module = None;
        self.selected_function = None;
        self.explanation = None;
        self.saved_explanation_id = None;
    }

    async fn submit(
        &self,
        tx: Transaction,
        success_message: &str,
        failure_message: &str,
    ) -> Option<TransactionReceipt> {
        match self.signer.sign_and_execute(tx).await {
            Ok(receipt) => {
                match receipt.digest.as_deref() {
                    Some(digest) => {
                        tracing::info!("[ExplainerWorkflow] {} ({})", success_message, digest);
                        self.notify(Notification::success(success_message));
                    }
                    None => {
                        self.notify(Notification::info("Transaction exported for signing"));
                    }
                }
                Some(receipt)
            }
            Err(e) => {
                tracing::error!("[ExplainerWorkflow] {}: {}", failure_message, e);
                self.notify(Notification::error(e.to_string()).with_title(failure_message));
                None
            }
        }
    }

    fn notify(&self, notification: Notification) {
        self.session.store().add_notification(notification);
    }
}
