//! Shared application state with synchronous change notification.
//!
//! `AppStore` holds a single [`AppSnapshot`] record. Every setter replaces
//! part of the record and then calls every subscribed listener with a copy of
//! the new state. There is no diffing and no batching: a setter that writes
//! the same value still notifies, and concurrent writers are last-write-wins.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::explanation::ExplanationData;
use crate::notification::{Notification, NotificationKind};
use crate::user::UserProfileData;

/// Number of notifications kept in the snapshot; older ones are dropped.
pub const MAX_NOTIFICATIONS: usize = 50;

/// Network selected when the store starts.
pub const DEFAULT_NETWORK: &str = "testnet";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The shared UI state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSnapshot {
    pub user_profile: Option<UserProfileData>,
    pub explanations: Vec<ExplanationData>,
    pub is_loading: bool,
    pub theme: Theme,
    pub selected_network: String,
    pub search_query: String,
    pub selected_category: Option<String>,
    pub notifications: Vec<Notification>,
}

impl Default for AppSnapshot {
    fn default() -> Self {
        Self {
            user_profile: None,
            explanations: Vec::new(),
            is_loading: false,
            theme: Theme::Light,
            selected_network: DEFAULT_NETWORK.to_string(),
            search_query: String::new(),
            selected_category: None,
            notifications: Vec::new(),
        }
    }
}

/// Callback invoked after every mutation.
pub type Listener = Arc<dyn Fn(&AppSnapshot) + Send + Sync>;

/// Handle returned by [`AppStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

static GLOBAL_STORE: Lazy<Arc<AppStore>> = Lazy::new(|| Arc::new(AppStore::new()));

/// Observable container for [`AppSnapshot`].
pub struct AppStore {
    state: RwLock<AppSnapshot>,
    listeners: RwLock<Vec<(SubscriptionId, Listener)>>,
    next_id: AtomicU64,
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStore {
    /// Creates a store with the fixed startup defaults.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(AppSnapshot::default()),
            listeners: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// The process-wide store instance.
    pub fn global() -> Arc<AppStore> {
        GLOBAL_STORE.clone()
    }

    /// Registers a listener; it is called after every subsequent mutation.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&AppSnapshot) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push((id, Arc::new(listener)));
        id
    }

    /// Removes a listener. Returns false when the id was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.write().unwrap_or_else(|e| e.into_inner());
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> AppSnapshot {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set_user_profile(&self, profile: Option<UserProfileData>) {
        self.update(|state| state.user_profile = profile);
    }

    pub fn set_explanations(&self, explanations: Vec<ExplanationData>) {
        self.update(|state| state.explanations = explanations);
    }

    pub fn add_explanation(&self, explanation: ExplanationData) {
        self.update(|state| state.explanations.push(explanation));
    }

    pub fn set_is_loading(&self, loading: bool) {
        self.update(|state| state.is_loading = loading);
    }

    pub fn set_theme(&self, theme: Theme) {
        self.update(|state| state.theme = theme);
    }

    pub fn set_selected_network(&self, network: impl Into<String>) {
        let network = network.into();
        self.update(|state| state.selected_network = network);
    }

    pub fn set_search_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.update(|state| state.search_query = query);
    }

    pub fn set_selected_category(&self, category: Option<String>) {
        self.update(|state| state.selected_category = category);
    }

    /// Records a notification and logs it.
    pub fn add_notification(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Error => {
                tracing::error!("[Notification] {}: {}", notification.kind, notification.message)
            }
            NotificationKind::Warning => {
                tracing::warn!("[Notification] {}: {}", notification.kind, notification.message)
            }
            _ => tracing::info!("[Notification] {}: {}", notification.kind, notification.message),
        }

        self.update(|state| {
            state.notifications.push(notification);
            let overflow = state.notifications.len().saturating_sub(MAX_NOTIFICATIONS);
            state.notifications.drain(..overflow);
        });
    }

    /// Returns and clears pending notifications, oldest first.
    pub fn drain_notifications(&self) -> Vec<Notification> {
        let mut drained = Vec::new();
        self.update(|state| drained = std::mem::take(&mut state.notifications));
        drained
    }

    /// Applies `mutate` to the record, then notifies every listener.
    ///
    /// Listeners run after both locks are released, so a listener may read
    /// the store or mutate it again.
    fn update(&self, mutate: impl FnOnce(&mut AppSnapshot)) {
        let snapshot = {
            let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
            mutate(&mut *state);
            state.clone()
        };

        let listeners: Vec<Listener> = self
            .listeners
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    fn counting_listener(store: &AppStore) -> (SubscriptionId, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let id = store.subscribe(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (id, count)
    }

    #[test]
    fn test_defaults() {
        let store = AppStore::new();
        let state = store.snapshot();
        assert!(state.user_profile.is_none());
        assert!(state.explanations.is_empty());
        assert!(!state.is_loading);
        assert_eq!(state.theme, Theme::Light);
        assert_eq!(state.selected_network, "testnet");
        assert!(state.search_query.is_empty());
        assert!(state.selected_category.is_none());
    }

    #[test]
    fn test_every_setter_notifies_even_without_change() {
        let store = AppStore::new();
        let (_, count) = counting_listener(&store);

        store.set_is_loading(false);
        store.set_is_loading(false);
        store.set_theme(Theme::Dark);
        store.set_selected_network("mainnet");
        store.set_search_query("swap");
        store.set_selected_category(Some("DeFi".to_string()));

        assert_eq!(count.load(Ordering::SeqCst), 6);
        let state = store.snapshot();
        assert_eq!(state.theme, Theme::Dark);
        assert_eq!(state.selected_network, "mainnet");
    }

    #[test]
    fn test_listener_receives_new_state() {
        let store = AppStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        store.subscribe(move |state| sink.lock().unwrap().push(state.is_loading));

        store.set_is_loading(true);
        store.set_is_loading(false);

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = AppStore::new();
        let (id, count) = counting_listener(&store);
        store.set_is_loading(true);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.set_is_loading(false);
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_listener_may_reenter_store() {
        let store = Arc::new(AppStore::new());
        let inner = store.clone();
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();
        store.subscribe(move |_| {
            let _ = inner.snapshot();
            counter.fetch_add(1, Ordering::SeqCst);
        });
        store.set_search_query("pool");
        assert_eq!(reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_add_explanation_appends_and_set_replaces() {
        let store = AppStore::new();
        let expl = ExplanationData {
            id: "0x1".to_string(),
            title: "t".to_string(),
            package_id: "0x2".to_string(),
            module_name: "m".to_string(),
            function_name: "f".to_string(),
            explanation_text: "e".to_string(),
            author: "0x3".to_string(),
            rating: 0,
            votes: 0,
            created_at: 0,
        };
        store.add_explanation(expl.clone());
        store.add_explanation(expl.clone());
        assert_eq!(store.snapshot().explanations.len(), 2);
        store.set_explanations(vec![expl]);
        assert_eq!(store.snapshot().explanations.len(), 1);
    }

    #[test]
    fn test_notifications_are_bounded_and_drained() {
        let store = AppStore::new();
        for i in 0..(MAX_NOTIFICATIONS + 5) {
            store.add_notification(Notification::info(format!("n{i}")));
        }
        let state = store.snapshot();
        assert_eq!(state.notifications.len(), MAX_NOTIFICATIONS);
        assert_eq!(state.notifications[0].message, "n5");

        let drained = store.drain_notifications();
        assert_eq!(drained.len(), MAX_NOTIFICATIONS);
        assert!(store.snapshot().notifications.is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        let a = AppStore::global();
        let b = AppStore::global();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
