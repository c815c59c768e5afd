//! Presentation adapters
//!
//! The scheduler pushes one `Frame` per tick; an adapter decides how to
//! paint it. The DOM adapter lives behind `wasm32`; the native binary and
//! tests use recording/logging adapters.

use glam::Vec2;

use crate::config::LayerConfig;

#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Per-frame render output: position plus the (unchanged) element size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub pos: Vec2,
    pub size: Vec2,
}

pub trait Presenter {
    /// Apply one-time appearance configuration at the start of a run.
    fn prepare(&mut self, config: &LayerConfig);

    /// Paint one frame.
    fn present(&mut self, frame: &Frame);
}

/// Presenter that logs frames, used by the native headless binary
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn prepare(&mut self, config: &LayerConfig) {
        log::info!(
            "layer \"{}\": {}x{} {} at opacity {}",
            config.label,
            config.width,
            config.height,
            config.color,
            config.opacity
        );
    }

    fn present(&mut self, frame: &Frame) {
        log::debug!("frame at ({:.1}, {:.1})", frame.pos.x, frame.pos.y);
    }
}
