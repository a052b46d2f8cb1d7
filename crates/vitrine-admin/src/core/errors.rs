//! Server error-code to display-message mapping.
//!
//! # Design
//! - The server reports opaque codes; the table below owns every string the
//!   end user can see. Unmapped codes fail closed to a generic message so raw
//!   codes never leak into the UI.

/// Fallback shown for transport failures and unmapped codes.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

const MESSAGES: &[(&str, &str)] = &[
    ("LOGIN_FAILED", "Invalid username or password."),
    ("USER_NOT_FOUND", "No account matches that email address."),
    ("USER_NOT_ADMIN", "This account has no access to the admin console."),
    ("WRONG_CURRENT_PASSWORD", "The current password is incorrect."),
    (
        "PASSWORD_COMPLEXITY",
        "Passwords need at least 6 characters including a number.",
    ),
    (
        "EXPIRED_RESET_TOKEN",
        "This password reset link has expired. Please request a new one.",
    ),
    ("INVALID_RESET_TOKEN", "This password reset link is not valid."),
    ("CATEGORY_NOT_FOUND", "That category no longer exists."),
    (
        "CATEGORY_HAS_PRODUCTS",
        "Remove or move the products filed under this category first.",
    ),
    ("PRODUCT_NOT_FOUND", "That product no longer exists."),
    ("PICTURE_NOT_FOUND", "That picture no longer exists."),
    (
        "UPLOAD_TOO_LARGE",
        "The selected pictures exceed the upload size limit.",
    ),
];

/// Human-readable message for a server error code.
#[must_use]
pub fn display_message(code: &str) -> &'static str {
    MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map_or(GENERIC_ERROR_MESSAGE, |(_, message)| message)
}

#[cfg(test)]
mod tests {
    use super::{GENERIC_ERROR_MESSAGE, display_message};

    #[test]
    fn known_codes_map_to_copy() {
        assert_eq!(
            display_message("LOGIN_FAILED"),
            "Invalid username or password."
        );
        assert_eq!(
            display_message("CATEGORY_NOT_FOUND"),
            "That category no longer exists."
        );
    }

    #[test]
    fn unknown_codes_fail_closed() {
        let message = display_message("E_0x7F_INTERNAL");
        assert_eq!(message, GENERIC_ERROR_MESSAGE);
        assert!(!message.contains("E_0x7F_INTERNAL"));
        assert_eq!(display_message(""), GENERIC_ERROR_MESSAGE);
    }
}
