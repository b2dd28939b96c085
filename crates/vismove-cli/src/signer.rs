use async_trait::async_trait;
use vismove_core::Result;
use vismove_core::transaction::Transaction;
use vismove_core::wallet::{TransactionReceipt, TransactionSigner};

/// Prints transactions as JSON for signing in an external wallet.
///
/// Nothing is submitted, so receipts carry no digest and no created objects.
pub struct ExportSigner;

#[async_trait]
impl TransactionSigner for ExportSigner {
    async fn sign_and_execute(&self, transaction: Transaction) -> Result<TransactionReceipt> {
        println!("{}", transaction.to_json()?);
        Ok(TransactionReceipt::default())
    }
}
