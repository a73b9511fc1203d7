// ============================================================================
// ERRORS - one enum per concern
// ============================================================================

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("localStorage is not available")]
    Unavailable,

    #[error("Could not write '{0}' to storage")]
    WriteFailed(String),

    #[error("Could not remove '{0}' from storage")]
    RemoveFailed(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("No auth token")]
    Unauthenticated,

    /// Non-2xx response; `message` is the best human-readable text we found.
    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    #[error("Maps library is not loaded")]
    LibraryUnavailable,

    #[error("Maps library call failed: {0}")]
    Js(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Geolocation is not supported")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Position unavailable: {0}")]
    Unavailable(String),

    #[error("Location lookup cancelled")]
    Cancelled,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadinessError {
    #[error("Dependency not ready after {waited_ms} ms ({attempts} checks)")]
    TimedOut { waited_ms: u32, attempts: u32 },
}

/// JS side only ever sees the message.
pub fn to_js_error<E: std::fmt::Display>(error: E) -> JsValue {
    JsValue::from_str(&error.to_string())
}
