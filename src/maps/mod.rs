// Rescue maps: SDK-agnostic widget + platform renderers

#[cfg(target_arch = "wasm32")]
pub mod google;

pub mod readiness;
pub mod traits;
pub mod widget;

pub use traits::{CoordinateFields, MapRenderer, MarkerHandle, MarkerOptions};
