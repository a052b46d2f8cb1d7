//! Session token primitives shared across the admin console.
//!
//! # Design
//! - The token is decoded locally (payload segment only); the server stays the
//!   signing authority and the client only needs subject and expiry.
//! - Expiry is a pure function of the token and a caller-supplied clock so the
//!   route guard can be exercised without a browser.
//! - An expired token is unauthenticated but is not purged here; only an
//!   explicit logout or a fresh login rewrites storage.

use base64::{Engine as _, engine::general_purpose};
use serde::Deserialize;

/// Claims decoded from the admin JWT payload segment.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject account id.
    #[serde(rename = "userId")]
    pub user_id: i64,
    /// Account email embedded in the token.
    pub email: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// A decoded bearer session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    /// Raw token attached to outbound requests.
    pub token: String,
    /// Locally decoded claims.
    pub claims: SessionClaims,
}

impl AuthSession {
    /// Decode a raw token into a session. `None` when the token is malformed.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        decode_claims(token).map(|claims| Self {
            token: token.to_string(),
            claims,
        })
    }

    /// Whether the session still grants access at `now_ms`.
    #[must_use]
    pub const fn is_active(&self, now_ms: i64) -> bool {
        self.claims.exp.saturating_mul(1000) > now_ms
    }
}

/// Decode the claims from a JWT without verifying the signature.
#[must_use]
pub fn decode_claims(token: &str) -> Option<SessionClaims> {
    let payload = token.split('.').nth(1)?;
    let bytes = general_purpose::URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Whether a stored token grants access at `now_ms`.
///
/// Holds iff the token is present, decodable, and its expiry is strictly in
/// the future. Missing and malformed tokens are simply unauthenticated.
#[must_use]
pub fn is_authenticated(token: Option<&str>, now_ms: i64) -> bool {
    token
        .and_then(AuthSession::from_token)
        .is_some_and(|session| session.is_active(now_ms))
}

#[cfg(test)]
pub(crate) mod test_support {
    use base64::{Engine as _, engine::general_purpose};

    /// Build an unsigned token whose payload carries the given expiry.
    pub(crate) fn token_with_exp(exp: i64) -> String {
        let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = general_purpose::URL_SAFE_NO_PAD.encode(
            format!(r#"{{"userId":42,"email":"admin@vitrine.test","iat":0,"exp":{exp}}}"#)
                .as_bytes(),
        );
        format!("{header}.{payload}.sig")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::token_with_exp;
    use super::{AuthSession, decode_claims, is_authenticated};

    #[test]
    fn decodes_claims_from_payload_segment() {
        let token = token_with_exp(1_700_000_000);
        let claims = decode_claims(&token).expect("claims");
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.email, "admin@vitrine.test");
        assert_eq!(claims.exp, 1_700_000_000);
    }

    #[test]
    fn malformed_tokens_are_unauthenticated() {
        assert!(!is_authenticated(None, 0));
        assert!(!is_authenticated(Some(""), 0));
        assert!(!is_authenticated(Some("not-a-jwt"), 0));
        assert!(!is_authenticated(Some("a.%%%.c"), 0));
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let token = token_with_exp(1_000);
        // exp * 1000 == now: already expired.
        assert!(!is_authenticated(Some(&token), 1_000_000));
        assert!(!is_authenticated(Some(&token), 1_000_001));
        assert!(is_authenticated(Some(&token), 999_999));
    }

    #[test]
    fn is_authenticated_is_idempotent_for_a_fixed_clock() {
        let token = token_with_exp(2_000);
        let now = 1_500_000;
        let first = is_authenticated(Some(&token), now);
        let second = is_authenticated(Some(&token), now);
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn session_mirrors_token_activity() {
        let token = token_with_exp(5);
        let session = AuthSession::from_token(&token).expect("session");
        assert!(session.is_active(4_999));
        assert!(!session.is_active(5_000));
        assert!(AuthSession::from_token("garbage").is_none());
    }
}
