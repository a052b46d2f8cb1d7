//! Application shell and routing.

pub mod routes;

#[cfg(target_arch = "wasm32")]
mod shell;

#[cfg(target_arch = "wasm32")]
pub use shell::run_app;
