//! Commands acting on the connected wallet's profile.

use anyhow::Result;
use vismove_application::contract_session::WALLET_REQUIRED_MESSAGE;
use vismove_core::notification::Notification;

use crate::bootstrap::AppBootstrap;
use crate::commands::submit;
use crate::output;

pub async fn profile(bootstrap: &AppBootstrap) -> Result<()> {
    if require_wallet(bootstrap).await {
        let snapshot = bootstrap.session.store().snapshot();
        output::print_profile(snapshot.user_profile.as_ref());
    }
    Ok(())
}

pub async fn explanations(bootstrap: &AppBootstrap) -> Result<()> {
    if require_wallet(bootstrap).await {
        output::print_explanations(&bootstrap.session.store().snapshot().explanations);
    }
    Ok(())
}

pub async fn register(bootstrap: &AppBootstrap, username: &str) -> Result<()> {
    let tx = bootstrap.session.register_user(username).await;
    submit(bootstrap, tx, "Registration submitted").await;
    Ok(())
}

pub async fn add_preference(bootstrap: &AppBootstrap, preference: &str) -> Result<()> {
    let tx = bootstrap.session.add_preference(preference).await;
    submit(bootstrap, tx, "Preference added").await;
    Ok(())
}

async fn require_wallet(bootstrap: &AppBootstrap) -> bool {
    match bootstrap.session.require_wallet().await {
        Ok(()) => true,
        Err(e) => {
            tracing::debug!("[Cli] {}", e);
            bootstrap
                .session
                .store()
                .add_notification(Notification::error(WALLET_REQUIRED_MESSAGE));
            false
        }
    }
}
