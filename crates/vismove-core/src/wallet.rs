//! Wallet-side seams: the connected account and transaction signing.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::address::validate_sui_id;
use crate::error::Result;
use crate::transaction::Transaction;

/// The account exposed by a connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
}

impl WalletAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Builds an account after checking the full-length address form.
    pub fn parse(address: &str) -> Result<Self> {
        validate_sui_id(address)?;
        Ok(Self::new(address))
    }

    /// Shortened form for display, e.g. `0x123456...bcdef`.
    pub fn short_address(&self) -> String {
        short_address(&self.address)
    }
}

/// Keeps the first 8 and last 5 characters of an address.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 13 {
        return address.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail}")
}

/// Outcome of handing a transaction to a signer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    /// Digest of the executed transaction; `None` when the signer only
    /// exported the transaction for signing elsewhere.
    pub digest: Option<String>,
    /// Objects created by the transaction, in creation order.
    #[serde(default)]
    pub created_object_ids: Vec<String>,
}

/// Signs and submits transactions on behalf of the connected account.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_and_execute(&self, transaction: Transaction) -> Result<TransactionReceipt>;
}

pub type DynTransactionSigner = Arc<dyn TransactionSigner>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address() {
        assert_eq!(short_address("0x123456789abcdef"), "0x123456...bcdef");
        assert_eq!(short_address("0x2"), "0x2");
    }

    #[test]
    fn test_parse_requires_full_address() {
        assert!(WalletAccount::parse("0x123").is_err());
        let full = format!("0x{}", "ab".repeat(32));
        assert_eq!(WalletAccount::parse(&full).unwrap().address, full);
    }
}
