//! Cross-feature foundations: fetch machine, session, errors, store.

pub mod auth;
pub mod errors;
pub mod fetch;
pub mod session;
pub mod store;
