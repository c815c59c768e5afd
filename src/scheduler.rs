//! Frame scheduling and run lifecycle
//!
//! Owns the motion state for the duration of a run and drives the per-frame
//! update at the host's animation-frame cadence. At most one scheduled
//! invocation is outstanding while running: every (re)schedule cancels the
//! previous ticket first, and fired tickets that were superseded are
//! ignored.

use glam::Vec2;

use crate::config::LayerConfig;
use crate::presenter::{Frame, Presenter};
use crate::sim::{MotionState, ViewportBounds, step};

/// Hands out frame callbacks. Implementations pace the callback at the
/// host's animation-frame cadence (or fire on demand in tests).
pub trait FrameClock {
    type Ticket: Copy + Eq;

    /// Schedule one frame callback, returning its ticket.
    fn schedule(&mut self) -> Self::Ticket;

    /// Cancel a previously scheduled callback. Must tolerate tickets that
    /// already fired.
    fn cancel(&mut self, ticket: Self::Ticket);
}

/// Reports the current viewport size. Queried once per step, so resizes
/// are picked up without any caching.
pub trait BoundsProvider {
    fn bounds(&self) -> ViewportBounds;
}

/// Scheduler run state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// Drives the simulation: one `step` per fired frame, published to the
/// presenter, with the next frame scheduled before returning.
pub struct Scheduler<C: FrameClock, B: BoundsProvider, P: Presenter> {
    clock: C,
    bounds: B,
    presenter: P,
    run_state: RunState,
    state: Option<MotionState>,
    pending: Option<C::Ticket>,
}

impl<C: FrameClock, B: BoundsProvider, P: Presenter> Scheduler<C, B, P> {
    pub fn new(clock: C, bounds: B, presenter: P) -> Self {
        Self {
            clock,
            bounds,
            presenter,
            run_state: RunState::Stopped,
            state: None,
            pending: None,
        }
    }

    /// Start a run from a fresh motion state. If a run is already active
    /// its schedule is cancelled first, so two concurrent schedules can
    /// never exist.
    pub fn start(&mut self, config: &LayerConfig) {
        self.cancel_pending();

        let size = Vec2::new(config.width, config.height);
        let start_pos = Vec2::new(config.start_x, config.start_y);
        self.state = Some(MotionState::reset(size, start_pos, config.speed));
        self.presenter.prepare(config);

        self.run_state = RunState::Running;
        self.pending = Some(self.clock.schedule());
        log::info!(
            "run started: {}x{} layer at ({}, {}), speed {}",
            config.width,
            config.height,
            config.start_x,
            config.start_y,
            config.speed
        );
    }

    /// Stop the current run and discard its motion state. Idempotent.
    pub fn stop(&mut self) {
        self.cancel_pending();
        self.run_state = RunState::Stopped;
        self.state = None;
        log::info!("run stopped");
    }

    /// One fired frame callback. Tickets that were cancelled or superseded
    /// no longer match `pending` and are ignored.
    pub fn on_frame(&mut self, ticket: C::Ticket) {
        if self.pending != Some(ticket) {
            return;
        }
        self.pending = None;

        let Some(state) = self.state.as_mut() else {
            return;
        };

        let bounds = self.bounds.bounds();
        let events = step(state, bounds);
        if let Some(wall) = events.bounced {
            log::debug!("bounced off {wall:?} wall at y {}", state.pos.y);
        }
        if let Some(phase) = events.turned {
            log::debug!("sweep turned, now {phase:?}");
        }

        self.presenter.present(&Frame {
            pos: state.pos,
            size: state.size,
        });

        if self.run_state == RunState::Running {
            self.pending = Some(self.clock.schedule());
        }
    }

    /// Viewport resize: keep the motion state, replace the pending
    /// invocation with exactly one new one so the next step reads fresh
    /// bounds.
    pub fn notify_resize(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.cancel_pending();
        self.pending = Some(self.clock.schedule());
    }

    fn cancel_pending(&mut self) {
        if let Some(ticket) = self.pending.take() {
            self.clock.cancel(ticket);
        }
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Motion state of the active run, if any
    pub fn motion(&self) -> Option<&MotionState> {
        self.state.as_ref()
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::platform::native::{FixedBounds, ManualClock};
    use crate::sim::SweepPhase;

    /// Collects published frames into a shared vec
    #[derive(Default)]
    struct RecordingPresenter {
        frames: Rc<RefCell<Vec<Frame>>>,
    }

    impl Presenter for RecordingPresenter {
        fn prepare(&mut self, _config: &LayerConfig) {}

        fn present(&mut self, frame: &Frame) {
            self.frames.borrow_mut().push(*frame);
        }
    }

    type TestScheduler = Scheduler<ManualClock, FixedBounds, RecordingPresenter>;

    fn scheduler() -> (TestScheduler, Rc<RefCell<Vec<Frame>>>) {
        let presenter = RecordingPresenter::default();
        let frames = Rc::clone(&presenter.frames);
        let scheduler = Scheduler::new(
            ManualClock::new(),
            FixedBounds(ViewportBounds::new(800.0, 600.0)),
            presenter,
        );
        (scheduler, frames)
    }

    fn pump(scheduler: &mut TestScheduler, frames: usize) {
        for _ in 0..frames {
            let Some(ticket) = scheduler.clock_mut().pop() else {
                break;
            };
            scheduler.on_frame(ticket);
        }
    }

    #[test]
    fn test_start_schedules_exactly_one_frame() {
        let (mut scheduler, _) = scheduler();
        assert_eq!(scheduler.run_state(), RunState::Stopped);

        scheduler.start(&LayerConfig::default());
        assert_eq!(scheduler.run_state(), RunState::Running);
        assert_eq!(scheduler.clock_mut().outstanding(), 1);
    }

    #[test]
    fn test_frames_drive_motion_and_publish() {
        let (mut scheduler, frames) = scheduler();
        scheduler.start(&LayerConfig::default());

        pump(&mut scheduler, 3);

        let frames = frames.borrow();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].pos, Vec2::new(3.0, 0.0));
        assert_eq!(frames[1].pos, Vec2::new(6.0, 0.0));
        assert_eq!(frames[2].pos, Vec2::new(9.0, 0.0));
        // Exactly one follow-up is scheduled per fired frame
        assert_eq!(scheduler.clock_mut().outstanding(), 1);
    }

    #[test]
    fn test_restart_resets_motion_state() {
        let (mut scheduler, _) = scheduler();
        let config = LayerConfig::default();

        scheduler.start(&config);
        pump(&mut scheduler, 50);

        // Starting again must look exactly like a single fresh start
        scheduler.start(&config);
        assert_eq!(scheduler.clock_mut().outstanding(), 1);

        let state = scheduler.motion().unwrap();
        assert_eq!(state.pos, Vec2::ZERO);
        assert_eq!(state.velocity_x, config.speed);
        assert_eq!(state.phase, SweepPhase::Descending);
    }

    #[test]
    fn test_stop_cancels_pending_and_discards_state() {
        let (mut scheduler, frames) = scheduler();
        scheduler.start(&LayerConfig::default());
        pump(&mut scheduler, 2);

        let stale = scheduler.clock_mut().pop().unwrap();
        scheduler.stop();
        assert_eq!(scheduler.run_state(), RunState::Stopped);
        assert_eq!(scheduler.clock_mut().outstanding(), 0);
        assert!(scheduler.motion().is_none());

        // A callback that was already in flight when we stopped is a no-op
        scheduler.on_frame(stale);
        assert_eq!(frames.borrow().len(), 2);

        // stop is idempotent
        scheduler.stop();
    }

    #[test]
    fn test_resize_replaces_pending_with_exactly_one() {
        let (mut scheduler, frames) = scheduler();
        scheduler.start(&LayerConfig::default());
        pump(&mut scheduler, 5);
        let before = *scheduler.motion().unwrap();

        let superseded = scheduler.clock_mut().pop().unwrap();
        scheduler.notify_resize();
        assert_eq!(scheduler.clock_mut().outstanding(), 1);

        // Motion state survives the resize untouched
        assert_eq!(*scheduler.motion().unwrap(), before);

        // The superseded ticket must not produce a duplicate step
        scheduler.on_frame(superseded);
        assert_eq!(frames.borrow().len(), 5);

        // The replacement ticket continues the run seamlessly
        pump(&mut scheduler, 10);
        assert_eq!(frames.borrow().len(), 15);
        assert_eq!(scheduler.clock_mut().outstanding(), 1);
    }

    #[test]
    fn test_resize_while_stopped_is_noop() {
        let (mut scheduler, _) = scheduler();
        scheduler.notify_resize();
        assert_eq!(scheduler.clock_mut().outstanding(), 0);
        assert_eq!(scheduler.run_state(), RunState::Stopped);
    }
}
