use crate::error::MapError;
use crate::models::geo::Coordinates;

/// Handle to a marker already on the map. Cheap to clone.
pub trait MarkerHandle: Clone + 'static {
    fn position(&self) -> Option<Coordinates>;
    fn set_position(&self, position: Coordinates);
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerOptions {
    pub position: Coordinates,
    pub title: Option<String>,
    pub label: Option<String>,
    pub draggable: bool,
}

impl MarkerOptions {
    pub fn at(position: Coordinates) -> Self {
        Self {
            position,
            title: None,
            label: None,
            draggable: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }
}

/// What the rescue pages need from a maps SDK
pub trait MapRenderer {
    type Container;
    type Map: Clone + 'static;
    type Marker: MarkerHandle;

    /// Has the SDK finished loading?
    fn is_available(&self) -> bool;

    fn create_map(&self, container: &Self::Container, center: Coordinates, zoom: f64) -> Result<Self::Map, MapError>;

    fn add_marker(&self, map: &Self::Map, options: MarkerOptions) -> Result<Self::Marker, MapError>;

    /// Popup opened when the marker is clicked. `content_html` must already be escaped.
    fn attach_popup(&self, map: &Self::Map, marker: &Self::Marker, content_html: &str) -> Result<(), MapError>;

    fn on_marker_drag_end(&self, marker: &Self::Marker, handler: Box<dyn FnMut(Coordinates)>) -> Result<(), MapError>;

    fn on_map_click(&self, map: &Self::Map, handler: Box<dyn FnMut(Coordinates)>) -> Result<(), MapError>;
}

/// The latitude/longitude inputs of the rescue form
pub trait CoordinateFields: Clone + 'static {
    fn write(&self, latitude: &str, longitude: &str);
}
