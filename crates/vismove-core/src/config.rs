//! Static contract configuration.
//!
//! Holds the identifiers of the deployed vmc package and the enumerations
//! the package works with. Loading from the environment and the config file
//! lives in `vismove_infrastructure::config_service`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{Result, VisMoveError};

/// Placeholder used for every object id that has not been configured.
pub const PLACEHOLDER_OBJECT_ID: &str = "0x0";

/// Ratings accepted by `vmc::rate_explanation`.
pub const RATING_RANGE: RangeInclusive<u64> = 1..=5;

/// Returns true when `rating` is inside [`RATING_RANGE`].
pub fn is_valid_rating(rating: u64) -> bool {
    RATING_RANGE.contains(&rating)
}

/// Rejects ratings the vmc module would abort on with
/// [`ContractErrorCode::InvalidRating`].
pub fn validate_rating(rating: u64) -> Result<()> {
    if is_valid_rating(rating) {
        return Ok(());
    }
    let code = ContractErrorCode::InvalidRating;
    Err(VisMoveError::InvalidArgument(format!(
        "{} (vmc abort {}): rating must be between {} and {}, got {}",
        code,
        code.code(),
        RATING_RANGE.start(),
        RATING_RANGE.end(),
        rating
    )))
}

/// Sui networks a fullnode can be addressed on.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuiNetwork {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
}

impl SuiNetwork {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Public fullnode JSON-RPC endpoint of this network.
    pub fn fullnode_url(&self) -> String {
        format!("https://fullnode.{}.sui.io:443", self.as_str())
    }
}

/// Entry and view functions exposed by the `vmc` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ContractFunction {
    CreateExplanation,
    RateExplanation,
    RegisterUser,
    AddUserPreference,
    UpdateUserContribution,
    GetExplanationsByCategory,
    GetExplanationInfo,
    GetUserInfo,
}

/// Struct types declared by the `vmc` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, IntoStaticStr)]
pub enum StructKind {
    Explanation,
    UserProfile,
    ExplanationRegistry,
    AdminCap,
}

/// Abort codes raised by the `vmc` module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ContractErrorCode {
    #[strum(serialize = "not authorized")]
    NotAuthorized,
    #[strum(serialize = "explanation not found")]
    ExplanationNotFound,
    #[strum(serialize = "invalid rating")]
    InvalidRating,
}

impl ContractErrorCode {
    pub fn code(&self) -> u64 {
        match self {
            Self::NotAuthorized => 1,
            Self::ExplanationNotFound => 2,
            Self::InvalidRating => 3,
        }
    }
}

/// Explanation categories understood by the registry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    DeFi,
    #[strum(serialize = "NFT")]
    #[serde(rename = "NFT")]
    Nft,
    Gaming,
    Infrastructure,
    Governance,
    Utility,
    Social,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Identifiers of the deployed vmc package and the network it lives on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractConfig {
    pub package_id: String,
    pub registry_id: String,
    pub admin_cap_id: String,
    pub network: SuiNetwork,
    pub rpc_url: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        let network = SuiNetwork::default();
        Self {
            package_id: PLACEHOLDER_OBJECT_ID.to_string(),
            registry_id: PLACEHOLDER_OBJECT_ID.to_string(),
            admin_cap_id: PLACEHOLDER_OBJECT_ID.to_string(),
            rpc_url: network.fullnode_url(),
            network,
        }
    }
}

impl ContractConfig {
    /// `<package>::vmc`
    pub fn vmc_module(&self) -> String {
        format!("{}::vmc", self.package_id)
    }

    /// `<package>::explain`
    pub fn explain_module(&self) -> String {
        format!("{}::explain", self.package_id)
    }

    /// Fully qualified move-call target, e.g. `<package>::vmc::create_explanation`.
    pub fn function(&self, function: ContractFunction) -> String {
        format!("{}::{}", self.vmc_module(), function)
    }

    /// Fully qualified struct type, e.g. `<package>::vmc::Explanation`.
    pub fn struct_type(&self, kind: StructKind) -> String {
        format!("{}::{}", self.vmc_module(), kind)
    }

    /// True when none of the object ids has been configured.
    pub fn is_placeholder(&self) -> bool {
        self.package_id == PLACEHOLDER_OBJECT_ID
            && self.registry_id == PLACEHOLDER_OBJECT_ID
            && self.admin_cap_id == PLACEHOLDER_OBJECT_ID
    }
}

/// External tools invoked by the package reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Move bytecode decompiler, invoked as `<decompiler> -b <module.mv>`.
    pub decompiler: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            decompiler: "revela".to_string(),
        }
    }
}

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RootConfig {
    pub contract: ContractConfig,
    pub tools: ToolsConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_default_config_uses_placeholders_and_testnet() {
        let config = ContractConfig::default();
        assert_eq!(config.package_id, "0x0");
        assert_eq!(config.network, SuiNetwork::Testnet);
        assert_eq!(config.rpc_url, "https://fullnode.testnet.sui.io:443");
        assert!(config.is_placeholder());
    }

    #[test]
    fn test_targets_and_struct_types() {
        let config = ContractConfig {
            package_id: "0xabc".to_string(),
            ..ContractConfig::default()
        };
        assert_eq!(config.vmc_module(), "0xabc::vmc");
        assert_eq!(config.explain_module(), "0xabc::explain");
        assert_eq!(
            config.function(ContractFunction::CreateExplanation),
            "0xabc::vmc::create_explanation"
        );
        assert_eq!(
            config.function(ContractFunction::AddUserPreference),
            "0xabc::vmc::add_user_preference"
        );
        assert_eq!(
            config.struct_type(StructKind::ExplanationRegistry),
            "0xabc::vmc::ExplanationRegistry"
        );
    }

    #[test]
    fn test_rating_range() {
        assert!(!is_valid_rating(0));
        assert!(is_valid_rating(1));
        assert!(is_valid_rating(5));
        assert!(!is_valid_rating(6));
    }

    #[test]
    fn test_network_parsing() {
        assert_eq!(SuiNetwork::from_str("mainnet").unwrap(), SuiNetwork::Mainnet);
        assert!(SuiNetwork::from_str("localnet").is_err());
        assert_eq!(
            SuiNetwork::Devnet.fullnode_url(),
            "https://fullnode.devnet.sui.io:443"
        );
    }

    #[test]
    fn test_categories() {
        let names: Vec<&str> = Category::iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "DeFi",
                "NFT",
                "Gaming",
                "Infrastructure",
                "Governance",
                "Utility",
                "Social",
                "Other"
            ]
        );
        assert_eq!(Category::from_str("nft").unwrap(), Category::Nft);
    }

    #[test]
    fn test_validate_rating_reports_abort_code() {
        for rating in RATING_RANGE {
            assert!(validate_rating(rating).is_ok());
        }
        for rating in [0, 6, u64::MAX] {
            let err = validate_rating(rating).unwrap_err();
            assert!(matches!(err, VisMoveError::InvalidArgument(_)));
            let message = err.to_string();
            assert!(message.contains("invalid rating (vmc abort 3)"), "{message}");
            assert!(message.contains("between 1 and 5"), "{message}");
        }
        assert_eq!(ContractErrorCode::NotAuthorized.code(), 1);
        assert_eq!(ContractErrorCode::ExplanationNotFound.code(), 2);
    }

    #[test]
    fn test_root_config_from_partial_toml() {
        let root: RootConfig = toml::from_str(
            r#"
            [contract]
            package_id = "0x42"
            network = "devnet"
            "#,
        )
        .unwrap();
        assert_eq!(root.contract.package_id, "0x42");
        assert_eq!(root.contract.network, SuiNetwork::Devnet);
        assert_eq!(root.contract.registry_id, "0x0");
        assert_eq!(root.tools.decompiler, "revela");
    }
}
