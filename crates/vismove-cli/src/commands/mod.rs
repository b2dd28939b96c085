pub mod account;
pub mod config;
pub mod explain;
pub mod registry;

use vismove_core::notification::Notification;
use vismove_core::transaction::Transaction;

use crate::bootstrap::AppBootstrap;

/// Hands a built transaction to the signer; failures become notifications.
pub async fn submit(bootstrap: &AppBootstrap, tx: Option<Transaction>, success_message: &str) {
    let Some(tx) = tx else {
        return;
    };
    let store = bootstrap.session.store();
    match bootstrap.signer.sign_and_execute(tx).await {
        Ok(receipt) => match receipt.digest {
            Some(digest) => {
                tracing::info!("[Cli] {} ({})", success_message, digest);
                store.add_notification(Notification::success(success_message));
            }
            None => {
                store.add_notification(Notification::info("Transaction exported for signing"))
            }
        },
        Err(e) => {
            tracing::error!("[Cli] Signing failed: {}", e);
            store.add_notification(Notification::error(e.to_string()));
        }
    }
}
