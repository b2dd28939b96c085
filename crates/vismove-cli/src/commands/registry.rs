//! Reads and writes against the shared explanation registry.

use anyhow::Result;
use vismove_core::config::{Category, validate_rating};
use vismove_core::notification::Notification;
use vismove_core::package::known_packages;

use crate::bootstrap::AppBootstrap;
use crate::commands::submit;
use crate::output;

pub async fn stats(bootstrap: &AppBootstrap) -> Result<()> {
    output::print_stats(&bootstrap.session.get_registry_stats().await);
    Ok(())
}

pub async fn by_category(bootstrap: &AppBootstrap, category: Category) -> Result<()> {
    let ids = bootstrap.session.get_explanations_by_category(category).await;
    output::print_list(&format!("{category} explanations"), &ids);
    Ok(())
}

pub async fn rate(bootstrap: &AppBootstrap, explanation_id: &str, rating: u64) -> Result<()> {
    if let Err(e) = validate_rating(rating) {
        bootstrap
            .session
            .store()
            .add_notification(Notification::error(e.to_string()).with_title("Invalid rating"));
        return Ok(());
    }
    let tx = bootstrap.session.rate_explanation(explanation_id, rating).await;
    submit(bootstrap, tx, "Rating submitted").await;
    Ok(())
}

pub fn packages() -> Result<()> {
    output::print_known_packages(known_packages());
    Ok(())
}
