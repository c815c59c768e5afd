//! Per-frame motion update
//!
//! Advances the motion state by exactly one frame against a fresh bounds
//! snapshot. Pure and deterministic: no clock access, no platform calls.

use super::state::{MotionState, SweepPhase, ViewportBounds};

/// Which side wall was contacted during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
}

/// What happened during one step, for scheduler logging and tests
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepEvents {
    /// Side wall contacted this frame, if any
    pub bounced: Option<Wall>,
    /// New sweep direction, if a vertical extreme was reached this frame
    pub turned: Option<SweepPhase>,
}

/// Advance the motion state by one frame.
///
/// Wall contact flips the horizontal velocity and shifts the layer one
/// element-height along the current sweep direction. The contact frame
/// still commits the pre-flip displacement: x may land up to `|velocity_x|`
/// past the wall and is pulled back by the next frame. The vertical extreme
/// test runs every frame after the shift, so a corner contact clamps to the
/// boundary on the same frame as the flip.
pub fn step(state: &mut MotionState, bounds: ViewportBounds) -> StepEvents {
    let mut events = StepEvents::default();
    let size = state.size;

    // An axis the element does not fit in is pinned instead of reflected,
    // so degenerate viewports cannot make the phase toggle every frame.
    if bounds.width > size.x {
        let tentative = state.pos.x + state.velocity_x;
        let hit = if state.velocity_x > 0.0 {
            (tentative + size.x >= bounds.width).then_some(Wall::Right)
        } else {
            (tentative <= 0.0).then_some(Wall::Left)
        };

        state.pos.x = tentative;
        if let Some(wall) = hit {
            state.velocity_x = -state.velocity_x;
            match state.phase {
                SweepPhase::Descending => state.pos.y += size.y,
                SweepPhase::Ascending => state.pos.y -= size.y,
            }
            events.bounced = Some(wall);
        }
    } else {
        state.pos.x = state.pos.x.clamp(0.0, (bounds.width - size.x).max(0.0));
    }

    if bounds.height > size.y {
        match state.phase {
            SweepPhase::Descending if state.pos.y + size.y >= bounds.height => {
                state.pos.y = bounds.height - size.y;
                state.phase = SweepPhase::Ascending;
                events.turned = Some(SweepPhase::Ascending);
            }
            SweepPhase::Ascending if state.pos.y <= 0.0 => {
                state.pos.y = 0.0;
                state.phase = SweepPhase::Descending;
                events.turned = Some(SweepPhase::Descending);
            }
            _ => {}
        }
    } else {
        state.pos.y = state.pos.y.clamp(0.0, (bounds.height - size.y).max(0.0));
    }

    events
}
