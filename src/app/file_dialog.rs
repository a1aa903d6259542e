//! Delivering exported files: a save dialog natively, a browser download on web.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;
