use crate::dom::element::redirect;
use crate::stores::session_store::SessionStore;
use crate::utils::storage::KeyValueStorage;

/// Where to send the visitor, if anywhere. Pages that need a login only
/// check for the token, not the profile.
pub fn auth_redirect<'a, B: KeyValueStorage>(store: &SessionStore<B>, redirect_to: &'a str) -> Option<&'a str> {
    match store.token() {
        Some(_) => None,
        None => Some(redirect_to),
    }
}

/// `false` (and a redirect) when there is no token.
pub fn require_auth<B: KeyValueStorage>(store: &SessionStore<B>, redirect_to: &str) -> bool {
    match auth_redirect(store, redirect_to) {
        None => true,
        Some(target) => {
            log::info!("🔒 [AUTH] No token, redirecting to {}", target);
            if let Err(e) = redirect(target) {
                log::error!("❌ [AUTH] Redirect failed: {:?}", e);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;

    #[test]
    fn redirects_only_without_token() {
        let store = SessionStore::new(MemoryStorage::new());
        assert_eq!(auth_redirect(&store, "login.html"), Some("login.html"));

        store.set_token("t").unwrap();
        assert_eq!(auth_redirect(&store, "login.html"), None);
        assert!(require_auth(&store, "login.html"));
    }
}
