// ============================================================================
// ELEMENT HELPERS - basic DOM access
// ============================================================================

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, Window};

use crate::maps::traits::CoordinateFields;

pub fn window() -> Option<Window> {
    web_sys::window()
}

pub fn document() -> Option<Document> {
    window()?.document()
}

pub fn get_element_by_id(id: &str) -> Option<Element> {
    document()?.get_element_by_id(id)
}

pub fn get_input_by_id(id: &str) -> Option<HtmlInputElement> {
    get_element_by_id(id)?.dyn_into::<HtmlInputElement>().ok()
}

pub fn set_text_content(element: &Element, text: &str) {
    element.set_text_content(Some(text));
}

pub fn set_inner_html(element: &Element, html: &str) {
    element.set_inner_html(html);
}

/// `window.location.href = url`
pub fn redirect(url: &str) -> Result<(), JsValue> {
    window()
        .ok_or_else(|| JsValue::from_str("No window"))?
        .location()
        .set_href(url)
}

/// Put `message` in the element and make it visible. No element, no-op.
pub fn show_error(element: Option<&Element>, message: &str) {
    let Some(element) = element else {
        return;
    };
    set_text_content(element, message);
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html_element.style().set_property("display", "block") {
            log::warn!("⚠️ [DOM] Could not show error element: {:?}", e);
        }
    }
}

/// The rescue form's latitude/longitude inputs; either may be missing.
#[derive(Clone, Debug, Default)]
pub struct CoordinateInputs {
    latitude: Option<HtmlInputElement>,
    longitude: Option<HtmlInputElement>,
}

impl CoordinateInputs {
    pub fn find(latitude_id: &str, longitude_id: &str) -> Self {
        Self {
            latitude: get_input_by_id(latitude_id),
            longitude: get_input_by_id(longitude_id),
        }
    }
}

impl CoordinateFields for CoordinateInputs {
    fn write(&self, latitude: &str, longitude: &str) {
        if let Some(input) = &self.latitude {
            input.set_value(latitude);
        }
        if let Some(input) = &self.longitude {
            input.set_value(longitude);
        }
    }
}
