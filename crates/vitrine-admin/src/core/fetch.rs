//! Fetch lifecycle state machine shared by every async operation.
//!
//! # Design
//! - One machine instance per tracked operation; the triggering control is
//!   disabled while `is_loading()` so at most one request is in flight.
//! - Invalid transitions are ignored rather than panicking: a late `succeed`
//!   after a `reset` must not resurrect stale data.

/// Lifecycle of a single tracked asynchronous operation.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// No request has been issued yet.
    #[default]
    Initial,
    /// A request is in flight.
    Loading,
    /// The request resolved and its data is current.
    Success(T),
    /// The request failed; the payload is ready for display.
    Failure(String),
}

impl<T> FetchState<T> {
    /// Move to `Loading`. Valid from every state: success and failure may
    /// refetch, and `Initial` is the normal entry.
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    /// Store the result. Only honoured from `Loading`.
    pub fn succeed(&mut self, data: T) {
        if matches!(self, Self::Loading) {
            *self = Self::Success(data);
        }
    }

    /// Record a failure message. Only honoured from `Loading`.
    pub fn fail(&mut self, message: impl Into<String>) {
        if matches!(self, Self::Loading) {
            *self = Self::Failure(message.into());
        }
    }

    /// Return to `Initial`, clearing data or error. Ignored while `Loading`.
    pub fn reset(&mut self) {
        if matches!(self, Self::Success(_) | Self::Failure(_)) {
            *self = Self::Initial;
        }
    }

    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Whether no request has been issued (or the machine was reset).
    #[must_use]
    pub const fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Current data, when in `Success`.
    #[must_use]
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Current display message, when in `Failure`.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failure(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FetchState;

    #[test]
    fn happy_path_reaches_success() {
        let mut state = FetchState::default();
        assert!(state.is_initial());
        state.begin();
        assert!(state.is_loading());
        state.succeed(7);
        assert_eq!(state.data(), Some(&7));
    }

    #[test]
    fn succeed_and_fail_require_loading() {
        let mut state = FetchState::Initial;
        state.succeed(1);
        assert!(state.is_initial());
        state.fail("nope");
        assert!(state.is_initial());

        let mut state: FetchState<u8> = FetchState::Success(2);
        state.fail("late transport error");
        assert_eq!(state.data(), Some(&2));
    }

    #[test]
    fn failure_stores_display_message() {
        let mut state: FetchState<()> = FetchState::Initial;
        state.begin();
        state.fail("Failed creating category. Please try again.");
        assert_eq!(
            state.error(),
            Some("Failed creating category. Please try again.")
        );
    }

    #[test]
    fn reset_clears_terminal_states_only() {
        let mut state = FetchState::Success(3);
        state.reset();
        assert!(state.is_initial());

        let mut state: FetchState<u8> = FetchState::Failure("x".to_string());
        state.reset();
        assert!(state.is_initial());

        let mut state: FetchState<u8> = FetchState::Loading;
        state.reset();
        assert!(state.is_loading());
    }

    #[test]
    fn refetch_from_success_goes_through_loading() {
        let mut state = FetchState::Success(1);
        state.begin();
        assert!(state.is_loading());
        state.succeed(2);
        assert_eq!(state.data(), Some(&2));
    }
}
