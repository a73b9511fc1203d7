use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Profile returned by the backend at login. Kept exactly as received
/// (`_id`, nested names, role lists...), the accessors only read from it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Value);

impl UserProfile {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Backend ids come as `_id`; `id` is accepted too.
    pub fn id(&self) -> Option<&Value> {
        self.get("_id").or_else(|| self.get("id"))
    }

    pub fn name(&self) -> Option<&str> {
        self.get("name").and_then(Value::as_str)
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    pub fn display_name(&self) -> Option<&str> {
        self.name().or(self.email())
    }

    /// A stored `null` is the same as no profile.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl From<Value> for UserProfile {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Snapshot of what is in storage. Token and user are written separately
/// so either one can be missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// The navbar treats a stored profile as "logged in".
    pub fn has_user(&self) -> bool {
        self.user.is_some()
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_serializes_exactly_as_received() {
        let raw = json!({
            "_id": "u-17",
            "name": "Asha",
            "email": "asha@example.org",
            "phone": "+91 555 0101",
            "volunteer": true
        });
        let user: UserProfile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.id(), Some(&json!("u-17")));
        assert_eq!(user.display_name(), Some("Asha"));

        assert_eq!(serde_json::to_value(&user).unwrap(), raw);
    }

    #[test]
    fn non_string_fields_are_still_a_valid_profile() {
        let user: UserProfile =
            serde_json::from_str(r#"{"name":{"first":"Asha","last":"K"},"role":["volunteer"]}"#).unwrap();
        assert_eq!(user.name(), None);
        assert_eq!(user.get("role"), Some(&json!(["volunteer"])));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user = UserProfile::from(json!({"email": "a@b.c"}));
        assert_eq!(user.display_name(), Some("a@b.c"));
    }
}
