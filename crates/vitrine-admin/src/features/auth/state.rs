//! Authentication slice of the store.

use crate::core::fetch::FetchState;
use vitrine_api_models::User;

/// Auth slice: the live token plus a machine per auth operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthSlice {
    /// Bearer token of the signed-in session, if any.
    pub token: Option<String>,
    /// Cached profile of the signed-in account.
    pub user: Option<User>,
    /// Login request lifecycle.
    pub login: FetchState<()>,
    /// Password-recovery email request lifecycle.
    pub recovery: FetchState<()>,
    /// Reset-token validation lifecycle.
    pub token_check: FetchState<()>,
    /// Token-based password reset lifecycle.
    pub token_reset: FetchState<()>,
    /// Signed-in change-password lifecycle.
    pub change_password: FetchState<()>,
    /// Personal-information update lifecycle.
    pub profile_update: FetchState<()>,
}

impl AuthSlice {
    /// Install a fresh session after a successful login.
    pub fn apply_login(&mut self, token: String, user: Option<User>) {
        self.token = Some(token);
        self.user = user;
        self.login.succeed(());
    }

    /// Drop the session and every in-progress auth machine.
    pub fn apply_logout(&mut self) {
        *self = Self::default();
    }

    /// Install the refreshed profile after a successful update.
    pub fn apply_profile(&mut self, user: User) {
        self.user = Some(user);
        self.profile_update.succeed(());
    }
}

#[cfg(test)]
mod tests {
    use super::AuthSlice;
    use vitrine_api_models::User;

    fn user() -> User {
        User {
            id: "u1".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@vitrine.test".to_string(),
            role: "admin".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn login_installs_token_and_resolves_the_machine() {
        let mut auth = AuthSlice::default();
        auth.login.begin();
        auth.apply_login("tok".to_string(), None);
        assert!(auth.token.is_some());
        assert!(auth.login.data().is_some());
    }

    #[test]
    fn profile_update_replaces_the_cached_user() {
        let mut auth = AuthSlice::default();
        auth.apply_login("tok".to_string(), Some(user()));
        auth.profile_update.begin();
        let mut renamed = user();
        renamed.first_name = "Augusta".to_string();
        auth.apply_profile(renamed);
        assert_eq!(
            auth.user.as_ref().map(|u| u.first_name.as_str()),
            Some("Augusta")
        );
        assert!(auth.profile_update.data().is_some());
    }

    #[test]
    fn logout_resets_everything() {
        let mut auth = AuthSlice::default();
        auth.login.begin();
        auth.apply_login("tok".to_string(), None);
        auth.recovery.begin();
        auth.apply_logout();
        assert_eq!(auth, AuthSlice::default());
    }
}
