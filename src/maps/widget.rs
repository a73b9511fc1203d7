// ============================================================================
// RESCUE MAP WIDGET
// ============================================================================
// - create-rescue page: one draggable marker feeding the lat/lng inputs
// - nearby page: "you are here" marker + one pin per case with a popup
// Missing container or SDK → Skipped, never an error.
// ============================================================================

use crate::error::MapError;
use crate::maps::traits::{CoordinateFields, MapRenderer, MarkerHandle, MarkerOptions};
use crate::models::geo::Coordinates;
use crate::models::outcome::{SkipReason, WidgetOutcome};
use crate::models::rescue::NearbyMapOptions;
use crate::services::geolocation::LocationProvider;
use crate::utils::constants::{MAP_ID, USER_MARKER_LABEL, USER_MARKER_TITLE};
use crate::viewmodels::map_viewmodel::MapViewModel;

/// Lives as long as the page view.
#[derive(Debug, Clone, PartialEq)]
pub struct MapViewState<M> {
    pub center: Coordinates,
    pub zoom: f64,
    pub markers: Vec<M>,
}

/// The container to draw into, or why there is nothing to draw.
fn check_preconditions<'c, R: MapRenderer>(
    renderer: &R,
    container: Option<&'c R::Container>,
) -> Result<&'c R::Container, SkipReason> {
    let Some(container) = container else {
        log::debug!("🗺️ [MAP] No #{} container on this page", MAP_ID);
        return Err(SkipReason::MissingElement(MAP_ID));
    };
    if !renderer.is_available() {
        log::warn!("⚠️ [MAP] Maps library not loaded, skipping map");
        return Err(SkipReason::LibraryUnavailable);
    }
    Ok(container)
}

/// Centre on the device position (or the fallback) and let the user pick
/// the rescue location.
pub async fn init_create_rescue_map<R, F, L>(
    renderer: &R,
    container: Option<&R::Container>,
    fields: F,
    location: &L,
) -> Result<WidgetOutcome<MapViewState<R::Marker>>, MapError>
where
    R: MapRenderer,
    F: CoordinateFields,
    L: LocationProvider,
{
    let container = match check_preconditions(renderer, container) {
        Ok(container) => container,
        Err(reason) => return Ok(WidgetOutcome::Skipped(reason)),
    };

    let center = match location.current_position().await {
        Ok(position) => {
            log::info!("📍 [MAP] Device position ({}, {})", position.latitude, position.longitude);
            MapViewModel::resolve_center(Some(position.latitude), Some(position.longitude))
        }
        Err(e) => {
            log::info!("📍 [MAP] No device position ({}), using fallback centre", e);
            MapViewModel::fallback_center()
        }
    };

    create_rescue_map(renderer, container, center, fields).map(WidgetOutcome::Rendered)
}

/// Map + draggable marker. Dragging the marker or clicking the map writes
/// the coordinates (6 decimals) into the form.
pub fn create_rescue_map<R, F>(
    renderer: &R,
    container: &R::Container,
    center: Coordinates,
    fields: F,
) -> Result<MapViewState<R::Marker>, MapError>
where
    R: MapRenderer,
    F: CoordinateFields,
{
    let zoom = MapViewModel::default_zoom();
    let map = renderer.create_map(container, center, zoom)?;
    let marker = renderer.add_marker(&map, MarkerOptions::at(center).draggable())?;

    fields.write(&center.latitude.to_string(), &center.longitude.to_string());

    {
        let fields = fields.clone();
        renderer.on_marker_drag_end(
            &marker,
            Box::new(move |position: Coordinates| write_rounded(&fields, position)),
        )?;
    }

    {
        let marker = marker.clone();
        renderer.on_map_click(
            &map,
            Box::new(move |position: Coordinates| {
                marker.set_position(position);
                write_rounded(&fields, position);
            }),
        )?;
    }

    log::info!("✅ [MAP] Rescue map ready at ({}, {})", center.latitude, center.longitude);
    Ok(MapViewState {
        center,
        zoom,
        markers: vec![marker],
    })
}

fn write_rounded<F: CoordinateFields>(fields: &F, position: Coordinates) {
    fields.write(
        &MapViewModel::format_coordinate(position.latitude),
        &MapViewModel::format_coordinate(position.longitude),
    );
}

/// Nearby-cases map. The user's own marker is always `markers[0]`.
pub fn init_map_simple<R: MapRenderer>(
    renderer: &R,
    container: Option<&R::Container>,
    options: &NearbyMapOptions,
) -> Result<WidgetOutcome<MapViewState<R::Marker>>, MapError> {
    let container = match check_preconditions(renderer, container) {
        Ok(container) => container,
        Err(reason) => return Ok(WidgetOutcome::Skipped(reason)),
    };

    let center = MapViewModel::resolve_center(options.lat, options.lng);
    let zoom = MapViewModel::default_zoom();
    let map = renderer.create_map(container, center, zoom)?;

    let mut markers = Vec::with_capacity(options.markers.len() + 1);
    markers.push(renderer.add_marker(
        &map,
        MarkerOptions::at(center).title(USER_MARKER_TITLE).label(USER_MARKER_LABEL),
    )?);

    for pin in MapViewModel::case_pins(&options.markers) {
        let marker = renderer.add_marker(&map, MarkerOptions::at(pin.position).title(pin.title))?;
        renderer.attach_popup(&map, &marker, &pin.popup_html)?;
        markers.push(marker);
    }

    log::info!("✅ [MAP] Nearby map ready with {} case markers", markers.len() - 1);
    Ok(WidgetOutcome::Rendered(MapViewState { center, zoom, markers }))
}
