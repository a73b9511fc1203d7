// ============================================================================
// APP - page bootstrap + functions exported to the page scripts
// ============================================================================

use futures::future::Abortable;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::element::{get_element_by_id, show_error as show_error_in, CoordinateInputs};
use crate::dom::events::{on_dom_ready, on_window_event};
use crate::error::to_js_error;
use crate::maps::google::{wait_for_maps_library, GoogleMapsRenderer};
use crate::maps::widget::{init_create_rescue_map, init_map_simple as init_nearby_map};
use crate::models::outcome::WidgetOutcome;
use crate::models::rescue::NearbyMapOptions;
use crate::models::session::UserProfile;
use crate::services::api_client::ApiClient;
use crate::services::geolocation::BrowserGeolocation;
use crate::services::transport::HttpMethod;
use crate::stores::session_store::LocalSessionStore;
use crate::utils::constants::{LATITUDE_INPUT_ID, LONGITUDE_INPUT_ID, MAP_ID, RESCUE_FORM_ID};
use crate::utils::single_run::SingleRun;
use crate::views::{guards, navbar};

thread_local! {
    static CREATE_RESCUE_MAP: SingleRun = SingleRun::new();
}

/// Runs on every page once the DOM is parsed.
pub fn boot() -> Result<(), JsValue> {
    on_dom_ready(|| {
        if let Err(e) = navbar::render_navbar(&LocalSessionStore::local()) {
            log::error!("❌ [BOOT] Navbar render failed: {:?}", e);
        }

        if get_element_by_id(MAP_ID).is_some() && get_element_by_id(RESCUE_FORM_ID).is_some() {
            spawn_local(start_create_rescue_map());
        }
    })
}

/// Create-rescue page: wait for the SDK, then place the draggable marker.
/// A new call replaces a run still in progress; leaving the page abandons it.
async fn start_create_rescue_map() {
    let (registration, watch_pagehide) =
        CREATE_RESCUE_MAP.with(|slot| (slot.begin(), slot.claim_listener()));

    if watch_pagehide {
        let watched = on_window_event("pagehide", |_| {
            CREATE_RESCUE_MAP.with(|slot| {
                slot.cancel();
            });
        });
        if let Err(e) = watched {
            log::warn!("⚠️ [BOOT] Could not watch pagehide: {:?}", e);
        }
    }

    let run = async {
        if let Err(e) = wait_for_maps_library(CONFIG.readiness).await {
            log::warn!("⚠️ [MAP] {}", e);
            return;
        }
        let container = get_element_by_id(MAP_ID);
        let fields = CoordinateInputs::find(LATITUDE_INPUT_ID, LONGITUDE_INPUT_ID);
        match init_create_rescue_map(&GoogleMapsRenderer, container.as_ref(), fields, &BrowserGeolocation).await {
            Ok(WidgetOutcome::Rendered(_)) => {}
            Ok(WidgetOutcome::Skipped(reason)) => log::info!("🗺️ [MAP] Rescue map skipped: {:?}", reason),
            Err(e) => log::error!("❌ [MAP] Rescue map failed: {}", e),
        }
    };

    if Abortable::new(run, registration).await.is_err() {
        log::info!("🛑 [MAP] Rescue map setup cancelled");
    }
}

/// `undefined`/`null` read as "not given".
fn from_js<T: DeserializeOwned>(value: JsValue) -> Result<Option<T>, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value).map(Some).map_err(to_js_error)
}

/// Plain objects, not `Map`s, on the JS side.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(to_js_error)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[wasm_bindgen(js_name = setToken)]
pub fn set_token(token: &str) -> Result<(), JsValue> {
    LocalSessionStore::local().set_token(token).map_err(to_js_error)
}

#[wasm_bindgen(js_name = getToken)]
pub fn get_token() -> Option<String> {
    LocalSessionStore::local().token()
}

#[wasm_bindgen(js_name = removeToken)]
pub fn remove_token() -> Result<(), JsValue> {
    LocalSessionStore::local().remove_token().map_err(to_js_error)
}

/// Stores the profile object as given.
#[wasm_bindgen(js_name = setUser)]
pub fn set_user(user: JsValue) -> Result<(), JsValue> {
    match from_js::<UserProfile>(user)? {
        Some(user) => LocalSessionStore::local().set_user(&user).map_err(to_js_error),
        None => LocalSessionStore::local().remove_user().map_err(to_js_error),
    }
}

/// Profile object, `undefined` when there is none.
#[wasm_bindgen(js_name = getUser)]
pub fn get_user() -> Result<JsValue, JsValue> {
    match LocalSessionStore::local().user() {
        Some(user) => to_js(&user),
        None => Ok(JsValue::UNDEFINED),
    }
}

#[wasm_bindgen(js_name = clearAuth)]
pub fn clear_auth() -> Result<(), JsValue> {
    LocalSessionStore::local().clear_auth().map_err(to_js_error)
}

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

/// Resolves to the decoded body; rejects with the error message.
#[wasm_bindgen(js_name = apiRequest)]
pub async fn api_request(
    path: String,
    method: Option<String>,
    body: JsValue,
    auth: Option<bool>,
) -> Result<JsValue, JsValue> {
    let method_name = method.unwrap_or_else(|| "GET".to_string());
    let method = HttpMethod::parse(&method_name)
        .ok_or_else(|| JsValue::from_str(&format!("Unsupported method {}", method_name)))?;
    let body: Option<Value> = from_js(body)?;

    let data = ApiClient::new()
        .request(&path, method, body.as_ref(), auth.unwrap_or(false))
        .await
        .map_err(to_js_error)?;

    to_js(&data)
}

// ---------------------------------------------------------------------------
// Page helpers
// ---------------------------------------------------------------------------

#[wasm_bindgen(js_name = renderNavbar)]
pub fn render_navbar() -> Result<(), JsValue> {
    navbar::render_navbar(&LocalSessionStore::local()).map(|_| ())
}

#[wasm_bindgen(js_name = requireAuth)]
pub fn require_auth(redirect: Option<String>) -> bool {
    let target = redirect.unwrap_or_else(|| CONFIG.login_page.clone());
    guards::require_auth(&LocalSessionStore::local(), &target)
}

#[wasm_bindgen(js_name = showError)]
pub fn show_error(element: Option<Element>, message: &str) {
    show_error_in(element.as_ref(), message);
}

/// Same setup boot runs on the create-rescue page, for pages that load
/// their form later.
#[wasm_bindgen(js_name = initCreateRescueMap)]
pub fn init_create_rescue_map_export() {
    spawn_local(start_create_rescue_map());
}

/// Nearby-cases map: `{ lat, lng, markers: [...] }`.
#[wasm_bindgen(js_name = initMapSimple)]
pub fn init_map_simple(options: JsValue) -> Result<(), JsValue> {
    let options: NearbyMapOptions = from_js(options)?.unwrap_or_default();
    let container = get_element_by_id(MAP_ID);
    match init_nearby_map(&GoogleMapsRenderer, container.as_ref(), &options).map_err(to_js_error)? {
        WidgetOutcome::Rendered(view) => {
            log::info!("🗺️ [MAP] {} markers on nearby map", view.markers.len());
        }
        WidgetOutcome::Skipped(reason) => log::info!("🗺️ [MAP] Nearby map skipped: {:?}", reason),
    }
    Ok(())
}
