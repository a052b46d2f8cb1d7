//! Cross-feature view models.

/// Severity of a toast notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    /// Neutral information.
    Info,
    /// A completed operation.
    Success,
    /// A failed operation.
    Error,
}

impl ToastKind {
    /// How long a toast of this kind stays up before auto-dismissing, in
    /// milliseconds. Errors linger so the user can actually read them.
    #[must_use]
    pub const fn display_ms(self) -> u32 {
        match self {
            Self::Info | Self::Success => 4_000,
            Self::Error => 8_000,
        }
    }
}

/// One transient notification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// Dismissal handle, unique within the session.
    pub id: u64,
    /// Severity, drives the styling.
    pub kind: ToastKind,
    /// Display text.
    pub message: String,
}

impl Toast {
    /// Build a toast.
    #[must_use]
    pub fn new(id: u64, kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ToastKind;

    #[test]
    fn errors_outlast_confirmations() {
        assert!(ToastKind::Error.display_ms() > ToastKind::Success.display_ms());
        assert_eq!(ToastKind::Info.display_ms(), ToastKind::Success.display_ms());
    }
}
