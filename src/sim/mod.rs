//! Deterministic motion simulation
//!
//! All animation logic lives here. This module must be pure and deterministic:
//! - Exactly one update per frame tick
//! - Viewport bounds are caller-supplied snapshots, never cached
//! - No rendering or platform dependencies

pub mod state;
pub mod step;

pub use state::{MotionState, SweepPhase, ViewportBounds};
pub use step::{StepEvents, Wall, step};
