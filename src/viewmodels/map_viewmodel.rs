// ============================================================================
// MAP VIEWMODEL - data preparation for the rescue maps
// ============================================================================
// No SDK calls here: centre resolution, coordinate formatting and popup
// markup only.
// ============================================================================

use crate::config::CONFIG;
use crate::models::geo::Coordinates;
use crate::models::rescue::MarkerDescriptor;
use crate::utils::constants::{COORDINATE_PRECISION, DEFAULT_CASE_TITLE};
use crate::utils::html::escape_html;

/// A rescue case ready to be pinned
#[derive(Debug, Clone, PartialEq)]
pub struct CasePin {
    pub position: Coordinates,
    pub title: String,
    pub popup_html: String,
}

pub struct MapViewModel;

impl MapViewModel {
    pub fn fallback_center() -> Coordinates {
        Coordinates::new(CONFIG.map.fallback_lat, CONFIG.map.fallback_lng)
    }

    pub fn default_zoom() -> f64 {
        CONFIG.map.default_zoom
    }

    /// Zero, NaN, infinite and missing all count as "no value".
    pub fn usable_coordinate(value: Option<f64>) -> Option<f64> {
        value.filter(|v| v.is_finite() && *v != 0.0)
    }

    /// Each component falls back on its own.
    pub fn resolve_center(lat: Option<f64>, lng: Option<f64>) -> Coordinates {
        let fallback = Self::fallback_center();
        Coordinates::new(
            Self::usable_coordinate(lat).unwrap_or(fallback.latitude),
            Self::usable_coordinate(lng).unwrap_or(fallback.longitude),
        )
    }

    /// Value written after a drag or click
    pub fn format_coordinate(value: f64) -> String {
        format!("{:.*}", COORDINATE_PRECISION, value)
    }

    pub fn case_pin(marker: &MarkerDescriptor) -> Option<CasePin> {
        let latitude = Self::usable_coordinate(marker.latitude)?;
        let longitude = Self::usable_coordinate(marker.longitude)?;

        let title = marker
            .title
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_CASE_TITLE)
            .to_string();

        Some(CasePin {
            position: Coordinates::new(latitude, longitude),
            title,
            popup_html: Self::popup_html(marker),
        })
    }

    /// Entries without both coordinates are left out.
    pub fn case_pins(markers: &[MarkerDescriptor]) -> Vec<CasePin> {
        let pins: Vec<CasePin> = markers.iter().filter_map(Self::case_pin).collect();
        if pins.len() < markers.len() {
            log::info!("📍 [MAP] {} of {} cases have no coordinates, skipped",
                       markers.len() - pins.len(), markers.len());
        }
        pins
    }

    pub fn popup_html(marker: &MarkerDescriptor) -> String {
        format!(
            "<div style=\"max-width:220px\"><strong>{}</strong><p>{}</p><p>Status: {}</p></div>",
            escape_html(marker.title.as_deref().unwrap_or("")),
            escape_html(marker.description.as_deref().unwrap_or("")),
            escape_html(marker.status.as_deref().unwrap_or("")),
        )
    }
}
