//! Terminal rendering for store contents.

use colored::Colorize;
use vismove_core::explanation::{ExplanationData, RegistryStats};
use vismove_core::notification::{Notification, NotificationKind};
use vismove_core::package::DexInfo;
use vismove_core::user::UserProfileData;

/// Prints notifications to stderr, oldest first.
pub fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        let line = match &notification.title {
            Some(title) => format!("{}: {}", title, notification.message),
            None => notification.message.clone(),
        };
        let line = match notification.kind {
            NotificationKind::Error => line.red(),
            NotificationKind::Warning => line.yellow(),
            NotificationKind::Success => line.green(),
            NotificationKind::Info => line.blue(),
        };
        eprintln!("{}", line);
    }
}

pub fn print_profile(profile: Option<&UserProfileData>) {
    let Some(profile) = profile else {
        println!("{}", "No profile registered for this address".dimmed());
        return;
    };
    println!("{}", profile.username.bold());
    println!("  id:            {}", profile.id);
    println!("  contributions: {}", profile.contributions);
    println!("  reputation:    {}", profile.reputation);
    if profile.preferences.is_empty() {
        println!("  preferences:   -");
    } else {
        println!("  preferences:   {}", profile.preferences.join(", "));
    }
}

pub fn print_explanations(explanations: &[ExplanationData]) {
    if explanations.is_empty() {
        println!("{}", "No explanations".dimmed());
        return;
    }
    for explanation in explanations {
        println!(
            "{} {}::{} ({} votes, rating {})",
            explanation.title.bold(),
            explanation.module_name,
            explanation.function_name,
            explanation.votes,
            explanation.rating
        );
        println!("  {}", explanation.id.dimmed());
    }
}

pub fn print_stats(stats: &RegistryStats) {
    println!("explanations: {}", stats.total_count);
    println!("categories:   {}", stats.categories_count);
}

pub fn print_known_packages(dexes: &[DexInfo]) {
    for dex in dexes {
        println!("{}", dex.name.bold());
        for package in &dex.packages {
            println!("  {:<14} {}", package.name, package.id);
        }
    }
}

/// Prints a numbered list under a heading.
pub fn print_list(heading: &str, items: &[String]) {
    println!("{}", heading.bold());
    for (index, item) in items.iter().enumerate() {
        println!("  {:>2}. {}", index + 1, item);
    }
}
