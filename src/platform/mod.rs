//! Platform abstraction layer
//!
//! Frame clocks and viewport bounds providers for the two build targets:
//! `web` drives requestAnimationFrame, `native` is a manually pumped clock
//! for headless runs and tests.

#[cfg(not(target_arch = "wasm32"))]
pub mod native;
#[cfg(target_arch = "wasm32")]
pub mod web;
