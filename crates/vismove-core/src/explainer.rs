//! AI explanation of Move functions.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::Result;

/// What to explain: a function inside a module's source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationRequest {
    pub contract_code: String,
    pub function_name: String,
}

/// Explanation returned by the model.
///
/// One response carries every view the explainer can show, so switching
/// views never needs another request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionExplanation {
    pub explanation: String,
    #[serde(default)]
    pub coin_flow: String,
    #[serde(default)]
    pub uml_sequence_diagram: String,
    #[serde(default)]
    pub concepts_to_explain: Vec<String>,
}

/// Which part of a [`FunctionExplanation`] is displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum ViewMode {
    #[default]
    #[strum(to_string = "Function", serialize = "function")]
    Function,
    #[strum(to_string = "Coin flow", serialize = "coin-flow", serialize = "coin_flow")]
    CoinFlow,
}

impl FunctionExplanation {
    /// Text shown for the given view.
    pub fn view(&self, mode: ViewMode) -> &str {
        match mode {
            ViewMode::Function => &self.explanation,
            ViewMode::CoinFlow => &self.coin_flow,
        }
    }
}

/// Produces natural-language explanations of Move functions.
#[async_trait]
pub trait Explainer: Send + Sync {
    async fn explain(&self, request: ExplanationRequest) -> Result<FunctionExplanation>;
}

pub type DynExplainer = Arc<dyn Explainer>;
