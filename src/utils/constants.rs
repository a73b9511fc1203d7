/// localStorage key holding the raw bearer token
pub const TOKEN_KEY: &str = "token";

/// localStorage key holding the JSON-encoded user profile
pub const USER_KEY: &str = "user";

// Element ids the host pages provide
pub const NAVBAR_ID: &str = "app-navbar";
pub const LOGOUT_ID: &str = "nav-logout";
pub const MAP_ID: &str = "map";
pub const LATITUDE_INPUT_ID: &str = "latitude";
pub const LONGITUDE_INPUT_ID: &str = "longitude";
pub const RESCUE_FORM_ID: &str = "rescueForm";

/// Decimal places written into the coordinate inputs
pub const COORDINATE_PRECISION: usize = 6;

pub const USER_MARKER_TITLE: &str = "You are here";
pub const USER_MARKER_LABEL: &str = "You";
pub const DEFAULT_CASE_TITLE: &str = "Rescue case";
