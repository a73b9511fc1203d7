// ============================================================================
// RESCUE WEB - browser layer of the Animal NGO community app (Rust → WASM)
// ============================================================================
// - stores:     token + user profile in localStorage
// - services:   API client (bearer token, JSON), geolocation
// - views:      shared navbar, auth guard
// - maps:       rescue maps on top of the Google Maps JS API
// - viewmodels: map data preparation (no SDK calls)
// ============================================================================

pub mod config;
pub mod dom;
pub mod error;
pub mod maps;
pub mod models;
pub mod services;
pub mod stores;
pub mod utils;
pub mod viewmodels;
pub mod views;

#[cfg(target_arch = "wasm32")]
mod app;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if config::CONFIG.is_logging_enabled() {
        log::Level::Info
    } else {
        log::Level::Warn
    };
    wasm_logger::init(wasm_logger::Config::new(level));
    log::info!("🐾 Rescue web layer loaded (API: {})", config::CONFIG.api_base);

    app::boot()
}
