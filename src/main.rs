//! Bounce Layer entry point
//!
//! The browser build wires the scheduler to requestAnimationFrame; the
//! native build runs a short headless simulation and prints the final
//! motion snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    bounce_layer::platform::web::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use bounce_layer::LayerConfig;
    use bounce_layer::platform::native::{FixedBounds, ManualClock};
    use bounce_layer::presenter::LogPresenter;
    use bounce_layer::scheduler::Scheduler;
    use bounce_layer::sim::ViewportBounds;

    env_logger::init();
    log::info!("bounce-layer (headless) starting");

    let config = LayerConfig::load();
    let mut scheduler = Scheduler::new(
        ManualClock::new(),
        FixedBounds(ViewportBounds::new(800.0, 600.0)),
        LogPresenter,
    );
    scheduler.start(&config);

    // Ten seconds' worth of frames at the usual 60 Hz cadence
    for _ in 0..600 {
        let Some(ticket) = scheduler.clock_mut().pop() else {
            break;
        };
        scheduler.on_frame(ticket);
    }

    if let Some(state) = scheduler.motion() {
        match serde_json::to_string_pretty(state) {
            Ok(json) => println!("{json}"),
            Err(err) => log::error!("snapshot serialization failed: {err}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
