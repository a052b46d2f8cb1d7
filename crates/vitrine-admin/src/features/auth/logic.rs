//! Client-side form validation for the auth flows.
//!
//! The server revalidates everything; these checks only keep obviously bad
//! input from leaving the form.

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Loose email shape check: one `@` with a dotted domain after it.
#[must_use]
pub fn is_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.contains(char::is_whitespace)
}

/// Password policy: at least [`MIN_PASSWORD_LEN`] characters including a digit.
#[must_use]
pub fn is_acceptable_password(input: &str) -> bool {
    input.chars().count() >= MIN_PASSWORD_LEN && input.chars().any(|c| c.is_ascii_digit())
}

/// First problem with a change-password form, or `None` when it can submit.
#[must_use]
pub fn password_pair_problem(password: &str, confirmation: &str) -> Option<&'static str> {
    if !is_acceptable_password(password) {
        return Some("Passwords need at least 6 characters including a number.");
    }
    if password != confirmation {
        return Some("The passwords do not match.");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{is_acceptable_password, is_email, password_pair_problem};

    #[test]
    fn email_shapes() {
        assert!(is_email("admin@vitrine.test"));
        assert!(is_email("a.b@sub.example.co"));
        assert!(!is_email("admin"));
        assert!(!is_email("@vitrine.test"));
        assert!(!is_email("admin@test"));
        assert!(!is_email("admin@vitrine .test"));
        assert!(!is_email("a@b@c.d"));
    }

    #[test]
    fn password_policy() {
        assert!(is_acceptable_password("abcde1"));
        assert!(!is_acceptable_password("abc1"));
        assert!(!is_acceptable_password("abcdef"));
    }

    #[test]
    fn pair_problems_in_order() {
        assert!(password_pair_problem("short", "short").is_some());
        assert_eq!(
            password_pair_problem("abcde1", "abcde2"),
            Some("The passwords do not match.")
        );
        assert!(password_pair_problem("abcde1", "abcde1").is_none());
    }
}
