//! Route table and the navigation guard.
//!
//! The guard is a pure function of the target, the stored token, and a
//! caller-supplied clock; the shell merely executes its verdict.

use crate::core::auth::is_authenticated;
use yew_router::prelude::Routable;

/// Every addressable page of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Routable)]
pub enum Route {
    /// Entry point; resolves to the admin home or the login page.
    #[at("/")]
    Landing,
    /// Sign-in form.
    #[at("/login")]
    Login,
    /// Request a password-recovery email.
    #[at("/password-recovery")]
    PasswordRecovery,
    /// Set a new password from an emailed token.
    #[at("/change-password")]
    ChangePassword,
    /// Admin console home.
    #[at("/home")]
    Admin,
    /// Catch-all.
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    /// Whether the route requires an active session.
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Admin)
    }
}

/// Route the user actually lands on when navigating to `target`.
///
/// Protected targets bounce to [`Route::Login`] without an active session.
/// The landing page and the login page forward signed-in users to the
/// console. Everything else passes through.
#[must_use]
pub fn resolve_navigation(target: Route, token: Option<&str>, now_ms: i64) -> Route {
    let authed = is_authenticated(token, now_ms);
    if target.is_protected() && !authed {
        return Route::Login;
    }
    match target {
        Route::Landing => {
            if authed {
                Route::Admin
            } else {
                Route::Login
            }
        }
        Route::Login if authed => Route::Admin,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::{Route, resolve_navigation};
    use crate::core::auth::test_support::token_with_exp;
    use yew_router::Routable;

    #[test]
    fn protected_routes_require_an_active_session() {
        let live = token_with_exp(2_000);
        assert_eq!(
            resolve_navigation(Route::Admin, Some(&live), 1_000_000),
            Route::Admin
        );
        assert_eq!(resolve_navigation(Route::Admin, None, 1_000_000), Route::Login);
    }

    #[test]
    fn an_expired_token_bounces_to_login() {
        let stale = token_with_exp(1_000);
        assert_eq!(
            resolve_navigation(Route::Admin, Some(&stale), 1_000_000),
            Route::Login
        );
    }

    #[test]
    fn landing_forwards_by_session_state() {
        let live = token_with_exp(2_000);
        assert_eq!(
            resolve_navigation(Route::Landing, Some(&live), 1_000_000),
            Route::Admin
        );
        assert_eq!(resolve_navigation(Route::Landing, None, 0), Route::Login);
    }

    #[test]
    fn login_forwards_signed_in_users_to_the_console() {
        let live = token_with_exp(2_000);
        assert_eq!(
            resolve_navigation(Route::Login, Some(&live), 1_000_000),
            Route::Admin
        );
        assert_eq!(resolve_navigation(Route::Login, None, 0), Route::Login);
    }

    #[test]
    fn public_routes_pass_through_regardless_of_session() {
        for target in [Route::PasswordRecovery, Route::ChangePassword, Route::NotFound] {
            assert_eq!(resolve_navigation(target, None, 0), target);
            let live = token_with_exp(2_000);
            assert_eq!(resolve_navigation(target, Some(&live), 0), target);
        }
    }

    #[test]
    fn paths_round_trip_through_the_route_table() {
        assert_eq!(Route::Admin.to_path(), "/home");
        assert_eq!(Route::recognize("/login"), Some(Route::Login));
        assert_eq!(Route::recognize("/does-not-exist"), Some(Route::NotFound));
    }
}
