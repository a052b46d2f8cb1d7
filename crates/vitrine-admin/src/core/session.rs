//! Persisted session root and the storage collaborator seam.
//!
//! # Design
//! - Everything the app persists lives under one root key; login writes the
//!   whole root and logout wipes the whole root, never individual fields.
//! - Storage is an injected trait so guard and auth logic can be tested with
//!   an in-memory repository instead of browser `localStorage`.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use vitrine_api_models::User;

/// Single root key holding the serialized [`PersistedRoot`].
pub const ROOT_STORAGE_KEY: &str = "vitrine:root";

/// Authentication slice of the persisted root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    /// Bearer token, present between login and logout.
    pub auth_token: Option<String>,
}

/// User slice of the persisted root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedUser {
    /// Cached profile of the signed-in account.
    pub user_session: Option<User>,
}

/// Everything persisted across reloads, stored under [`ROOT_STORAGE_KEY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedRoot {
    /// Authentication slice.
    pub authentication: PersistedAuth,
    /// User slice.
    pub user: PersistedUser,
}

impl PersistedRoot {
    /// Root written on a successful login.
    #[must_use]
    pub const fn for_login(token: String, user: Option<User>) -> Self {
        Self {
            authentication: PersistedAuth {
                auth_token: Some(token),
            },
            user: PersistedUser { user_session: user },
        }
    }
}

/// Storage collaborator for the persisted root.
pub trait SessionRepository {
    /// Read the root; `None` when absent or unreadable.
    fn load(&self) -> Option<PersistedRoot>;
    /// Write the full root.
    fn save(&self, root: &PersistedRoot);
    /// Remove the root entirely. This is the logout path: the whole persisted
    /// tree goes, not just the auth field.
    fn clear(&self);
}

/// In-memory repository used by tests and native builds.
#[derive(Clone, Debug, Default)]
pub struct MemorySession {
    root: Rc<RefCell<Option<PersistedRoot>>>,
}

impl SessionRepository for MemorySession {
    fn load(&self) -> Option<PersistedRoot> {
        self.root.borrow().clone()
    }

    fn save(&self, root: &PersistedRoot) {
        *self.root.borrow_mut() = Some(root.clone());
    }

    fn clear(&self) {
        *self.root.borrow_mut() = None;
    }
}

/// `localStorage`-backed repository under [`ROOT_STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageSession;

#[cfg(target_arch = "wasm32")]
impl SessionRepository for LocalStorageSession {
    fn load(&self) -> Option<PersistedRoot> {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::get(ROOT_STORAGE_KEY).ok()
    }

    fn save(&self, root: &PersistedRoot) {
        use gloo::console;
        use gloo::storage::{LocalStorage, Storage};
        if let Err(err) = LocalStorage::set(ROOT_STORAGE_KEY, root) {
            console::error!("session persist failed", ROOT_STORAGE_KEY, err.to_string());
        }
    }

    fn clear(&self) {
        use gloo::storage::{LocalStorage, Storage};
        LocalStorage::delete(ROOT_STORAGE_KEY);
    }
}
