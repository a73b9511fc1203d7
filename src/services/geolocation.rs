// ============================================================================
// GEOLOCATION - navigator.geolocation.getCurrentPosition as a future
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{AbortRegistration, Abortable};
use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

use crate::error::GeolocationError;
use crate::models::geo::Coordinates;

/// W3C PositionError.PERMISSION_DENIED
const PERMISSION_DENIED: f64 = 1.0;

#[allow(async_fn_in_trait)]
pub trait LocationProvider {
    /// Resolves once the platform answers; no timeout of its own.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Same lookup, resolving to `Cancelled` when the handle is aborted.
pub async fn current_position_cancellable<L: LocationProvider>(
    provider: &L,
    registration: AbortRegistration,
) -> Result<Coordinates, GeolocationError> {
    Abortable::new(provider.current_position(), registration)
        .await
        .map_err(|_| GeolocationError::Cancelled)?
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserGeolocation;

type Reply = Rc<RefCell<Option<oneshot::Sender<Result<Coordinates, GeolocationError>>>>>;

impl LocationProvider for BrowserGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let geolocation = web_sys::window()
            .ok_or(GeolocationError::Unsupported)?
            .navigator()
            .geolocation()
            .map_err(|_| GeolocationError::Unsupported)?;

        let (sender, receiver) = oneshot::channel();
        let reply: Reply = Rc::new(RefCell::new(Some(sender)));

        let on_success = {
            let reply = reply.clone();
            Closure::wrap(Box::new(move |position: JsValue| {
                if let Some(sender) = reply.borrow_mut().take() {
                    let _ = sender.send(read_position(&position));
                }
            }) as Box<dyn FnMut(JsValue)>)
        };

        let on_error = {
            let reply = reply.clone();
            Closure::wrap(Box::new(move |error: JsValue| {
                if let Some(sender) = reply.borrow_mut().take() {
                    let _ = sender.send(Err(read_error(&error)));
                }
            }) as Box<dyn FnMut(JsValue)>)
        };

        geolocation
            .get_current_position_with_error_callback(
                on_success.as_ref().unchecked_ref(),
                Some(on_error.as_ref().unchecked_ref()),
            )
            .map_err(|e| GeolocationError::Unavailable(format!("{:?}", e)))?;

        // The browser calls back at most once, after this function has returned
        on_success.forget();
        on_error.forget();

        receiver
            .await
            .unwrap_or_else(|_| Err(GeolocationError::Unavailable("callback dropped".into())))
    }
}

fn read_position(position: &JsValue) -> Result<Coordinates, GeolocationError> {
    let coords = Reflect::get(position, &JsValue::from_str("coords"))
        .map_err(|_| GeolocationError::Unavailable("no coords".into()))?;
    let field = |name: &str| {
        Reflect::get(&coords, &JsValue::from_str(name))
            .ok()
            .and_then(|v| v.as_f64())
            .ok_or_else(|| GeolocationError::Unavailable(format!("missing {}", name)))
    };
    Ok(Coordinates::new(field("latitude")?, field("longitude")?))
}

fn read_error(error: &JsValue) -> GeolocationError {
    let code = Reflect::get(error, &JsValue::from_str("code"))
        .ok()
        .and_then(|v| v.as_f64());
    if code == Some(PERMISSION_DENIED) {
        return GeolocationError::PermissionDenied;
    }
    let message = Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "unknown error".to_string());
    GeolocationError::Unavailable(message)
}
