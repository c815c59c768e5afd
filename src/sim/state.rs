//! Motion state and core simulation types
//!
//! The state is owned by the scheduler for the duration of a run and is
//! mutated once per frame by `step`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_SPEED;

/// Direction of the vertical sweep
///
/// The layer traverses the viewport top-to-bottom-to-top in whole-height
/// increments; there is no continuous vertical velocity, only this flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SweepPhase {
    /// Sweeping toward the bottom edge
    Descending,
    /// Sweeping back toward the top edge
    Ascending,
}

/// Viewport size snapshot, taken from the provider once per step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewportBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Complete motion state for one layer (deterministic, serializable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionState {
    /// Top-left corner, fractional coordinates allowed
    pub pos: Vec2,
    /// Element size, fixed for the duration of a run
    pub size: Vec2,
    /// Signed horizontal velocity in pixels per frame
    pub velocity_x: f32,
    /// Current vertical sweep direction
    pub phase: SweepPhase,
}

impl MotionState {
    /// Build the state for a fresh run: moving right at `speed`, sweeping
    /// down. Speed must be a positive finite number; anything else falls
    /// back to the default.
    pub fn reset(size: Vec2, start_pos: Vec2, speed: f32) -> Self {
        let speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            log::warn!("invalid speed {speed}, using default {DEFAULT_SPEED}");
            DEFAULT_SPEED
        };

        Self {
            pos: start_pos,
            size,
            velocity_x: speed,
            phase: SweepPhase::Descending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_initial_state() {
        let state = MotionState::reset(Vec2::new(150.0, 100.0), Vec2::new(10.0, 20.0), 3.0);
        assert_eq!(state.pos, Vec2::new(10.0, 20.0));
        assert_eq!(state.size, Vec2::new(150.0, 100.0));
        assert_eq!(state.velocity_x, 3.0);
        assert_eq!(state.phase, SweepPhase::Descending);
    }

    #[test]
    fn test_reset_rejects_bad_speed() {
        for bad in [0.0, -4.0, f32::NAN, f32::INFINITY] {
            let state = MotionState::reset(Vec2::new(150.0, 100.0), Vec2::ZERO, bad);
            assert_eq!(state.velocity_x, DEFAULT_SPEED);
        }
    }
}
