//! Global application store.

use crate::core::session::PersistedRoot;
use crate::features::auth::state::AuthSlice;
use crate::features::categories::state::{CategoriesState, TreeLoadStrategy};
use crate::features::pictures::state::PicturesState;
use crate::features::products::state::ProductsState;
use crate::models::{Toast, ToastKind};
use yewdux::prelude::Store;

/// Root store composing one slice per feature.
#[derive(Clone, Debug, Default, PartialEq, Store)]
pub struct AppStore {
    /// Authentication slice.
    pub auth: AuthSlice,
    /// Category manager slice.
    pub categories: CategoriesState,
    /// Product catalog slice.
    pub products: ProductsState,
    /// Picture gallery slice.
    pub pictures: PicturesState,
    /// Transient notifications.
    pub toasts: Vec<Toast>,
    /// Monotonic source of toast ids.
    pub toast_seq: u64,
}

impl AppStore {
    /// Seed the store from the persisted root and the configured tree
    /// strategy. Must run before the first render: the route guard reads the
    /// token on the initial paint, so restoring in an effect would bounce a
    /// reloaded session through the login page.
    pub fn hydrate(&mut self, root: Option<PersistedRoot>, strategy: TreeLoadStrategy) {
        self.categories.strategy = strategy;
        let Some(root) = root else {
            return;
        };
        if let Some(token) = root.authentication.auth_token {
            self.auth.token = Some(token);
            self.auth.user = root.user.user_session;
        }
    }

    /// Queue a toast for display.
    pub fn push_message(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast_seq += 1;
        self.toasts.push(Toast::new(self.toast_seq, kind, message));
    }

    /// Drop the toast with `id` once dismissed or expired.
    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::AppStore;
    use crate::app::routes::{Route, resolve_navigation};
    use crate::core::auth::test_support::token_with_exp;
    use crate::core::session::{MemorySession, PersistedRoot, SessionRepository};
    use crate::features::categories::state::TreeLoadStrategy;
    use crate::models::ToastKind;

    #[test]
    fn hydration_restores_the_session_before_the_first_guard_check() {
        let repo = MemorySession::default();
        let token = token_with_exp(2_000);
        repo.save(&PersistedRoot::for_login(token.clone(), None));

        let mut store = AppStore::default();
        store.hydrate(repo.load(), TreeLoadStrategy::LazyPerParent);
        assert_eq!(store.auth.token.as_deref(), Some(token.as_str()));
        assert_eq!(store.categories.strategy, TreeLoadStrategy::LazyPerParent);
        // A reload at /home lands on /home, not /login.
        assert_eq!(
            resolve_navigation(Route::Admin, store.auth.token.as_deref(), 1_000_000),
            Route::Admin
        );
    }

    #[test]
    fn hydration_without_a_persisted_root_stays_signed_out() {
        let mut store = AppStore::default();
        store.hydrate(None, TreeLoadStrategy::EagerFullTree);
        assert!(store.auth.token.is_none());
        assert_eq!(
            resolve_navigation(Route::Admin, store.auth.token.as_deref(), 0),
            Route::Login
        );
    }

    #[test]
    fn toasts_queue_with_fresh_ids_and_dismiss() {
        let mut store = AppStore::default();
        store.push_message(ToastKind::Success, "Category created.");
        store.push_message(ToastKind::Error, "Something went wrong.");
        let first = store.toasts[0].id;
        let second = store.toasts[1].id;
        assert_ne!(first, second);
        store.dismiss_toast(first);
        assert_eq!(store.toasts.len(), 1);
        assert_eq!(store.toasts[0].id, second);
    }
}
