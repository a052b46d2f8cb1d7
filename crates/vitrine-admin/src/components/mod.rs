//! Shared presentational components.

pub(crate) mod confirm_dialog;
pub(crate) mod message_box;
pub(crate) mod toast;
