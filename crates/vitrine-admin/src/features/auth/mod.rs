//! Authentication feature surface: state, logic, and views.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
