// ============================================================================
// SESSION STORE - token + user profile persisted in origin storage
// ============================================================================

use crate::error::StorageError;
use crate::models::session::{Session, UserProfile};
use crate::utils::constants::{TOKEN_KEY, USER_KEY};
use crate::utils::storage::{load_json, save_json, BrowserStorage, KeyValueStorage};

/// Session persisted in `window.localStorage`
pub type LocalSessionStore = SessionStore<BrowserStorage>;

#[derive(Clone, Debug, Default)]
pub struct SessionStore<B: KeyValueStorage> {
    backend: B,
}

impl LocalSessionStore {
    pub fn local() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<B: KeyValueStorage> SessionStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored as-is, not JSON-encoded.
    pub fn set_token(&self, token: &str) -> Result<(), StorageError> {
        self.backend.set_item(TOKEN_KEY, token)
    }

    pub fn token(&self) -> Option<String> {
        match self.backend.get_item(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("⚠️ [SESSION] Could not read token: {}", e);
                None
            }
        }
    }

    pub fn remove_token(&self) -> Result<(), StorageError> {
        self.backend.remove_item(TOKEN_KEY)
    }

    pub fn set_user(&self, user: &UserProfile) -> Result<(), StorageError> {
        save_json(&self.backend, USER_KEY, user)
    }

    /// Any JSON is a profile. Only text that does not parse counts as corrupt;
    /// that is treated as "no user" and dropped from storage.
    pub fn user(&self) -> Option<UserProfile> {
        match load_json::<_, UserProfile>(&self.backend, USER_KEY) {
            Ok(user) => user.filter(|u| !u.is_null()),
            Err(StorageError::Serialization(e)) => {
                log::warn!("⚠️ [SESSION] Stored user is not valid JSON ({}), discarding it", e);
                if let Err(e) = self.backend.remove_item(USER_KEY) {
                    log::error!("❌ [SESSION] Could not remove corrupt user: {}", e);
                }
                None
            }
            Err(e) => {
                log::warn!("⚠️ [SESSION] Could not read user: {}", e);
                None
            }
        }
    }

    pub fn remove_user(&self) -> Result<(), StorageError> {
        self.backend.remove_item(USER_KEY)
    }

    /// Logout. Both keys are attempted even if the first removal fails.
    pub fn clear_auth(&self) -> Result<(), StorageError> {
        let token = self.remove_token();
        let user = self.remove_user();
        log::info!("🚪 [SESSION] Auth cleared");
        token.and(user)
    }

    pub fn session(&self) -> Session {
        Session {
            token: self.token(),
            user: self.user(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().has_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::storage::MemoryStorage;
    use serde_json::json;

    fn store() -> SessionStore<MemoryStorage> {
        SessionStore::new(MemoryStorage::new())
    }

    #[test]
    fn token_roundtrips_until_removed() {
        let store = store();
        for token in ["abc", "eyJhbGciOiJIUzI1NiJ9.e30.sig", "with spaces and \"quotes\""] {
            store.set_token(token).unwrap();
            assert_eq!(store.token().as_deref(), Some(token));
        }
        store.remove_token().unwrap();
        assert_eq!(store.token(), None);
    }

    #[test]
    fn token_is_stored_raw() {
        let store = store();
        store.set_token("abc").unwrap();
        assert_eq!(store.backend().get_item(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn user_roundtrips_and_clear_auth_removes_both() {
        let store = store();
        let user = UserProfile::from(json!({"_id": "u-1", "name": "Ravi"}));
        store.set_token("t").unwrap();
        store.set_user(&user).unwrap();

        let session = store.session();
        assert_eq!(session.token.as_deref(), Some("t"));
        assert_eq!(session.user, Some(user));
        assert!(store.is_authenticated());

        store.clear_auth().unwrap();
        assert_eq!(store.session(), Session::default());
        assert!(store.backend().is_empty());
    }

    #[test]
    fn token_and_user_may_be_out_of_sync() {
        let store = store();
        store.set_token("only-token").unwrap();
        assert!(store.session().has_token());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn missing_user_is_none() {
        assert_eq!(store().user(), None);
    }

    #[test]
    fn corrupt_user_is_treated_as_absent_and_removed() {
        let store = store();
        store.backend().set_item(USER_KEY, "{\"name\": ").unwrap();
        assert_eq!(store.user(), None);
        assert_eq!(store.backend().get_item(USER_KEY).unwrap(), None);
    }

    #[test]
    fn underscore_id_survives_storage() {
        let store = store();
        let user: UserProfile = serde_json::from_str(r#"{"_id":"u-17","name":"Asha"}"#).unwrap();
        store.set_user(&user).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&store.backend().get_item(USER_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(raw, json!({"_id": "u-17", "name": "Asha"}));
        assert_eq!(store.user().unwrap().id(), Some(&json!("u-17")));
    }

    #[test]
    fn profile_with_non_string_fields_is_kept() {
        let store = store();
        let raw = r#"{"name":{"first":"Asha","last":"K"},"role":["volunteer"]}"#;
        store.backend().set_item(USER_KEY, raw).unwrap();

        let user = store.user().unwrap();
        assert_eq!(user.get("role"), Some(&json!(["volunteer"])));
        assert_eq!(store.backend().get_item(USER_KEY).unwrap().as_deref(), Some(raw));
        assert!(store.is_authenticated());
    }

    #[test]
    fn stored_null_is_no_user() {
        let store = store();
        store.backend().set_item(USER_KEY, "null").unwrap();
        assert_eq!(store.user(), None);
        assert!(!store.is_authenticated());
    }
}
