//! DOM presentation adapter
//!
//! Paints the layer as an absolutely positioned element by writing inline
//! styles. Appearance (color, size, label, opacity) is applied once at
//! `prepare`; only `left`/`top` change per frame.

use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use super::{Frame, Presenter};
use crate::config::LayerConfig;

pub struct DomPresenter {
    element: HtmlElement,
}

impl DomPresenter {
    /// Look up the layer element by id.
    pub fn from_element_id(id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let element = document
            .get_element_by_id(id)?
            .dyn_into::<HtmlElement>()
            .ok()?;
        Some(Self { element })
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Err(err) = self.element.style().set_property(property, value) {
            log::warn!("failed to set style {property}: {err:?}");
        }
    }
}

impl Presenter for DomPresenter {
    fn prepare(&mut self, config: &LayerConfig) {
        self.set_style("position", "absolute");
        self.set_style("background-color", &config.color);
        self.set_style("width", &format!("{}px", config.width));
        self.set_style("height", &format!("{}px", config.height));
        self.set_style("opacity", &config.opacity.to_string());
        self.element.set_text_content(Some(&config.label));
    }

    fn present(&mut self, frame: &Frame) {
        self.set_style("left", &format!("{}px", frame.pos.x));
        self.set_style("top", &format!("{}px", frame.pos.y));
    }
}
