//! Picture gallery feature surface: state and views.

pub mod state;
#[cfg(target_arch = "wasm32")]
pub mod view;
