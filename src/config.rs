use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base: String,
    pub login_page: String,
    pub enable_logging: bool,
    pub map: MapConfig,
    pub readiness: ReadinessConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:3001/api".to_string(),
            login_page: "login.html".to_string(),
            enable_logging: true,
            map: MapConfig::default(),
            readiness: ReadinessConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    pub fallback_lat: f64,
    pub fallback_lng: f64,
    pub default_zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        // Geographic centre of India
        Self {
            fallback_lat: 20.5937,
            fallback_lng: 78.9629,
            default_zoom: 12.0,
        }
    }
}

/// How long the page waits for the maps script to show up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReadinessConfig {
    pub poll_interval_ms: u32,
    pub timeout_ms: u32,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 200,
            timeout_ms: 6000,
        }
    }
}

impl AppConfig {
    /// Load configuration from compile-time environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base: option_env!("API_BASE")
                .map(|s| s.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            login_page: option_env!("LOGIN_PAGE")
                .map(|s| s.to_string())
                .unwrap_or(defaults.login_page),
            enable_logging: option_env!("ENABLE_LOGGING")
                .unwrap_or("true").parse().unwrap_or(true),
            map: MapConfig {
                fallback_lat: option_env!("FALLBACK_MAP_LAT")
                    .unwrap_or("20.5937").parse().unwrap_or(defaults.map.fallback_lat),
                fallback_lng: option_env!("FALLBACK_MAP_LNG")
                    .unwrap_or("78.9629").parse().unwrap_or(defaults.map.fallback_lng),
                default_zoom: option_env!("DEFAULT_MAP_ZOOM")
                    .unwrap_or("12").parse().unwrap_or(defaults.map.default_zoom),
            },
            readiness: ReadinessConfig {
                poll_interval_ms: option_env!("MAPS_POLL_INTERVAL_MS")
                    .unwrap_or("200").parse().unwrap_or(defaults.readiness.poll_interval_ms),
                timeout_ms: option_env!("MAPS_READY_TIMEOUT_MS")
                    .unwrap_or("6000").parse().unwrap_or(defaults.readiness.timeout_ms),
            },
        }
    }

    pub fn is_logging_enabled(&self) -> bool {
        self.enable_logging
    }
}

lazy_static::lazy_static! {
    pub static ref CONFIG: AppConfig = AppConfig::from_env();
}
