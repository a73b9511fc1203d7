// ============================================================================
// GOOGLE MAPS FFI - bindings to the global `google.maps` namespace
// ============================================================================
// The page loads the Maps JS API itself; we only consume it once present.
// ============================================================================

use gloo_timers::future::TimeoutFuture;
use js_sys::{Function, Object, Reflect};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::ReadinessConfig;
use crate::error::{MapError, ReadinessError};
use crate::maps::readiness::{wait_until_ready, Ready};
use crate::maps::traits::{MapRenderer, MarkerHandle, MarkerOptions};
use crate::models::geo::Coordinates;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    #[derive(Clone, Debug)]
    pub type GoogleMap;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new_map(container: &Element, options: &JsValue) -> Result<GoogleMap, JsValue>;

    #[wasm_bindgen(method, js_class = "Map", js_name = addListener)]
    fn add_listener(this: &GoogleMap, event: &str, handler: &Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Marker)]
    #[derive(Clone, Debug)]
    pub type GoogleMarker;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"], js_class = "Marker")]
    fn new_marker(options: &JsValue) -> Result<GoogleMarker, JsValue>;

    #[wasm_bindgen(method, js_class = "Marker", js_name = getPosition)]
    fn get_position(this: &GoogleMarker) -> Option<LatLng>;

    #[wasm_bindgen(method, js_class = "Marker", js_name = setPosition)]
    fn set_position(this: &GoogleMarker, position: &JsValue);

    #[wasm_bindgen(method, js_class = "Marker", js_name = addListener)]
    fn add_listener(this: &GoogleMarker, event: &str, handler: &Function) -> JsValue;

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    pub type LatLng;

    #[wasm_bindgen(method, js_class = "LatLng")]
    fn lat(this: &LatLng) -> f64;

    #[wasm_bindgen(method, js_class = "LatLng")]
    fn lng(this: &LatLng) -> f64;

    #[wasm_bindgen(js_namespace = ["google", "maps"])]
    #[derive(Clone, Debug)]
    pub type InfoWindow;

    #[wasm_bindgen(constructor, catch, js_namespace = ["google", "maps"])]
    fn new(options: &JsValue) -> Result<InfoWindow, JsValue>;

    #[wasm_bindgen(method, js_class = "InfoWindow")]
    fn open(this: &InfoWindow, map: &GoogleMap, anchor: &GoogleMarker);
}

/// `window.google.maps` exists
pub fn is_loaded() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    Reflect::get(&window, &JsValue::from_str("google"))
        .ok()
        .filter(|google| google.is_object())
        .and_then(|google| Reflect::get(&google, &JsValue::from_str("maps")).ok())
        .map(|maps| maps.is_object())
        .unwrap_or(false)
}

/// Resolves once the SDK script has run, or fails after `policy.timeout_ms`.
pub async fn wait_for_maps_library(policy: ReadinessConfig) -> Result<Ready, ReadinessError> {
    wait_until_ready(is_loaded, policy, TimeoutFuture::new).await
}

fn js_error(e: JsValue) -> MapError {
    MapError::Js(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

fn lat_lng_literal(position: Coordinates) -> Result<JsValue, MapError> {
    let literal = Object::new();
    Reflect::set(&literal, &"lat".into(), &position.latitude.into()).map_err(js_error)?;
    Reflect::set(&literal, &"lng".into(), &position.longitude.into()).map_err(js_error)?;
    Ok(literal.into())
}

fn to_coordinates(lat_lng: &LatLng) -> Coordinates {
    Coordinates::new(lat_lng.lat(), lat_lng.lng())
}

impl MarkerHandle for GoogleMarker {
    fn position(&self) -> Option<Coordinates> {
        self.get_position().as_ref().map(to_coordinates)
    }

    fn set_position(&self, position: Coordinates) {
        match lat_lng_literal(position) {
            Ok(literal) => GoogleMarker::set_position(self, &literal),
            Err(e) => log::error!("❌ [MAP] Could not move marker: {}", e),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GoogleMapsRenderer;

impl MapRenderer for GoogleMapsRenderer {
    type Container = Element;
    type Map = GoogleMap;
    type Marker = GoogleMarker;

    fn is_available(&self) -> bool {
        is_loaded()
    }

    fn create_map(&self, container: &Element, center: Coordinates, zoom: f64) -> Result<GoogleMap, MapError> {
        let options = Object::new();
        Reflect::set(&options, &"center".into(), &lat_lng_literal(center)?).map_err(js_error)?;
        Reflect::set(&options, &"zoom".into(), &zoom.into()).map_err(js_error)?;
        GoogleMap::new_map(container, &options).map_err(js_error)
    }

    fn add_marker(&self, map: &GoogleMap, marker: MarkerOptions) -> Result<GoogleMarker, MapError> {
        let options = Object::new();
        Reflect::set(&options, &"position".into(), &lat_lng_literal(marker.position)?).map_err(js_error)?;
        Reflect::set(&options, &"map".into(), map).map_err(js_error)?;
        if let Some(title) = &marker.title {
            Reflect::set(&options, &"title".into(), &title.into()).map_err(js_error)?;
        }
        if let Some(label) = &marker.label {
            Reflect::set(&options, &"label".into(), &label.into()).map_err(js_error)?;
        }
        if marker.draggable {
            Reflect::set(&options, &"draggable".into(), &JsValue::TRUE).map_err(js_error)?;
        }
        GoogleMarker::new_marker(&options).map_err(js_error)
    }

    fn attach_popup(&self, map: &GoogleMap, marker: &GoogleMarker, content_html: &str) -> Result<(), MapError> {
        let options = Object::new();
        Reflect::set(&options, &"content".into(), &content_html.into()).map_err(js_error)?;
        let info_window = InfoWindow::new(&options).map_err(js_error)?;

        let map = map.clone();
        let anchor = marker.clone();
        let on_click = Closure::wrap(Box::new(move |_event: JsValue| {
            info_window.open(&map, &anchor);
        }) as Box<dyn FnMut(JsValue)>);
        marker.add_listener("click", on_click.as_ref().unchecked_ref());
        // Marker listeners live as long as the page
        on_click.forget();
        Ok(())
    }

    fn on_marker_drag_end(&self, marker: &GoogleMarker, mut handler: Box<dyn FnMut(Coordinates)>) -> Result<(), MapError> {
        let dragged = marker.clone();
        let on_drag_end = Closure::wrap(Box::new(move |_event: JsValue| {
            if let Some(position) = MarkerHandle::position(&dragged) {
                handler(position);
            }
        }) as Box<dyn FnMut(JsValue)>);
        marker.add_listener("dragend", on_drag_end.as_ref().unchecked_ref());
        on_drag_end.forget();
        Ok(())
    }

    fn on_map_click(&self, map: &GoogleMap, mut handler: Box<dyn FnMut(Coordinates)>) -> Result<(), MapError> {
        let on_click = Closure::wrap(Box::new(move |event: JsValue| {
            let lat_lng = Reflect::get(&event, &JsValue::from_str("latLng"))
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null());
            if let Some(lat_lng) = lat_lng {
                handler(to_coordinates(lat_lng.unchecked_ref::<LatLng>()));
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.add_listener("click", on_click.as_ref().unchecked_ref());
        on_click.forget();
        Ok(())
    }
}
