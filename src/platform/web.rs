//! Browser platform layer
//!
//! requestAnimationFrame-backed frame clock and window-backed viewport
//! bounds. Each fired frame steps the scheduler, which schedules its
//! successor before returning, giving the usual RAF callback chain.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use crate::config::{LayerConfig, RawConfig};
use crate::consts::{FALLBACK_VIEWPORT_HEIGHT, FALLBACK_VIEWPORT_WIDTH};
use crate::presenter::dom::DomPresenter;
use crate::scheduler::{BoundsProvider, FrameClock, Scheduler};
use crate::sim::ViewportBounds;

/// Element the animation drives and reads its configuration from
const LAYER_ELEMENT_ID: &str = "layer";

pub type WebScheduler = Scheduler<RafClock, WindowBounds, DomPresenter>;

/// The browser app: one scheduler wired to RAF, window bounds, and the DOM
pub struct App {
    pub scheduler: WebScheduler,
}

/// Viewport bounds from `window.innerWidth`/`innerHeight`, re-read on every
/// call so resizes are picked up without caching
pub struct WindowBounds;

impl BoundsProvider for WindowBounds {
    fn bounds(&self) -> ViewportBounds {
        let Some(window) = web_sys::window() else {
            return ViewportBounds::new(FALLBACK_VIEWPORT_WIDTH, FALLBACK_VIEWPORT_HEIGHT);
        };
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_WIDTH as f64);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(FALLBACK_VIEWPORT_HEIGHT as f64);
        ViewportBounds::new(width as f32, height as f32)
    }
}

/// Frame clock over requestAnimationFrame. Tickets are generation numbers;
/// the live RAF handle is kept alongside its ticket for cancellation.
pub struct RafClock {
    app: Weak<RefCell<App>>,
    next_ticket: u64,
    live: Option<(u64, i32)>,
}

impl RafClock {
    pub fn new() -> Self {
        Self {
            app: Weak::new(),
            next_ticket: 0,
            live: None,
        }
    }

    /// Wire the clock back to the app so fired frames reach the scheduler.
    pub fn attach(&mut self, app: Weak<RefCell<App>>) {
        self.app = app;
    }
}

impl Default for RafClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for RafClock {
    type Ticket = u64;

    fn schedule(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;

        let app = self.app.clone();
        let closure = Closure::once(move |_time: f64| {
            if let Some(app) = app.upgrade() {
                app.borrow_mut().scheduler.on_frame(ticket);
            }
        });
        let handle = web_sys::window()
            .and_then(|w| w.request_animation_frame(closure.as_ref().unchecked_ref()).ok())
            .unwrap_or(0);
        closure.forget();

        self.live = Some((ticket, handle));
        ticket
    }

    fn cancel(&mut self, ticket: u64) {
        if let Some((live, handle)) = self.live {
            if live == ticket {
                self.live = None;
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(handle);
                }
            }
        }
    }
}

/// Read the layer configuration from the element's data attributes; an
/// unconfigured element falls back to the last persisted config.
fn config_from_dom(element_id: &str) -> LayerConfig {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id));

    let Some(element) = element else {
        return LayerConfig::load();
    };

    let raw = RawConfig {
        color: element.get_attribute("data-color"),
        width: element.get_attribute("data-width"),
        height: element.get_attribute("data-height"),
        label: element.get_attribute("data-label"),
        opacity: element.get_attribute("data-opacity"),
        speed: element.get_attribute("data-speed"),
        start_x: element.get_attribute("data-start-x"),
        start_y: element.get_attribute("data-start-y"),
    };

    if raw.is_empty() {
        LayerConfig::load()
    } else {
        let config = LayerConfig::from_raw(&raw);
        config.save();
        config
    }
}

/// Browser entry point: wire the scheduler to the DOM and start the run.
pub fn run() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("failed to init logger");

    log::info!("bounce-layer starting");

    let Some(presenter) = DomPresenter::from_element_id(LAYER_ELEMENT_ID) else {
        log::error!("no #{LAYER_ELEMENT_ID} element in the document");
        return;
    };
    let config = config_from_dom(LAYER_ELEMENT_ID);

    let app = Rc::new(RefCell::new(App {
        scheduler: Scheduler::new(RafClock::new(), WindowBounds, presenter),
    }));
    app.borrow_mut()
        .scheduler
        .clock_mut()
        .attach(Rc::downgrade(&app));

    app.borrow_mut().scheduler.start(&config);
    setup_resize_listener(Rc::clone(&app));

    log::info!("bounce-layer running");
}

/// Resize keeps the motion state; it only forces a fresh bounds read by
/// replacing the pending frame with exactly one new one.
fn setup_resize_listener(app: Rc<RefCell<App>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        app.borrow_mut().scheduler.notify_resize();
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}
