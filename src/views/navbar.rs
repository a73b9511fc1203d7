// ============================================================================
// NAVBAR - shared header, rendered on every page
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::CONFIG;
use crate::dom::element::{get_element_by_id, redirect, set_inner_html};
use crate::dom::events::on_click;
use crate::models::outcome::{RenderStatus, SkipReason};
use crate::stores::session_store::SessionStore;
use crate::utils::constants::{LOGOUT_ID, NAVBAR_ID};
use crate::utils::storage::KeyValueStorage;

/// Fixed markup; only the trailing link pair depends on the session.
pub fn navbar_html(authenticated: bool) -> String {
    let session_links = if authenticated {
        format!(
            r##"<a href="dashboard.html">Dashboard</a>
            <a href="#" id="{}">Logout</a>"##,
            LOGOUT_ID
        )
    } else {
        r#"<a href="login.html">Login</a>
            <a href="register.html">Register</a>"#
            .to_string()
    };

    format!(
        r#"<div class="navbar">
      <div class="inner">
        <div style="display:flex;align-items:center;gap:1rem;">
          <div class="brand"><a href="index.html" style="color:white;text-decoration:none;">Animal NGO</a></div>
          <div class="small" style="color:white">Community rescue &amp; donations</div>
        </div>
        <div class="nav-links" style="display:flex;align-items:center;">
          <a href="donations.html">Donations</a>
          <a href="rescue-nearby.html">Nearby Rescues</a>
          {}
        </div>
      </div>
    </div>"#,
        session_links
    )
}

/// Navbar for whatever session is stored right now.
pub fn navbar_for<B: KeyValueStorage>(store: &SessionStore<B>) -> (bool, String) {
    let authenticated = store.is_authenticated();
    (authenticated, navbar_html(authenticated))
}

/// Render into `#app-navbar`.
pub fn render_navbar<B>(store: &SessionStore<B>) -> Result<RenderStatus, JsValue>
where
    B: KeyValueStorage + Clone + 'static,
{
    render_navbar_into(get_element_by_id(NAVBAR_ID).as_ref(), store)
}

/// Replaces the container's content entirely on every call.
pub fn render_navbar_into<B>(container: Option<&Element>, store: &SessionStore<B>) -> Result<RenderStatus, JsValue>
where
    B: KeyValueStorage + Clone + 'static,
{
    let Some(container) = container else {
        return Ok(RenderStatus::Skipped(SkipReason::MissingElement(NAVBAR_ID)));
    };

    let (authenticated, html) = navbar_for(store);
    set_inner_html(container, &html);

    if authenticated {
        if let Some(logout) = get_element_by_id(LOGOUT_ID) {
            let store = store.clone();
            on_click(&logout, move |e: web_sys::MouseEvent| {
                e.prevent_default();
                if let Err(err) = store.clear_auth() {
                    log::error!("❌ [NAV] Logout could not clear storage: {}", err);
                }
                if let Err(err) = redirect(&CONFIG.login_page) {
                    log::error!("❌ [NAV] Redirect to login failed: {:?}", err);
                }
            })?;
        }
    }

    log::debug!("🧭 [NAV] Navbar rendered (authenticated: {})", authenticated);
    Ok(RenderStatus::Rendered { authenticated })
}
