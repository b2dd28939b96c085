//! UserProfileData domain model.
//!
//! Mirrors an on-chain `vmc::UserProfile` object. Preferences are not part of
//! the object fields; they live in a dynamic field named `"preferences"`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::explanation::{string_field, u64_field};

/// Name of the dynamic field holding a profile's preferences.
pub const PREFERENCES_FIELD: &str = "preferences";

/// A registered user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileData {
    pub id: String,
    pub username: String,
    pub contributions: u64,
    pub reputation: u64,
    #[serde(default)]
    pub preferences: Vec<String>,
}

impl UserProfileData {
    /// Builds a profile from the move fields of a `UserProfile` object.
    ///
    /// Preferences start empty; they are filled in by a second lookup.
    pub fn from_fields(object_id: &str, fields: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            id: object_id.to_string(),
            username: string_field(fields, "username")?,
            contributions: u64_field(fields, "contributions")?,
            reputation: u64_field(fields, "reputation")?,
            preferences: Vec::new(),
        })
    }

    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences;
        self
    }
}

/// Reads the `value` list of a preferences dynamic-field object.
///
/// Non-string entries are dropped; a missing or non-list value yields an
/// empty list.
pub fn preferences_from_fields(fields: &Map<String, Value>) -> Vec<String> {
    fields
        .get("value")
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_fields() {
        let fields = json!({
            "username": "testuser",
            "contributions": "5",
            "reputation": "100"
        });
        let profile = UserProfileData::from_fields("0xabc123", fields.as_object().unwrap()).unwrap();
        assert_eq!(profile.username, "testuser");
        assert_eq!(profile.contributions, 5);
        assert_eq!(profile.reputation, 100);
        assert!(profile.preferences.is_empty());
    }

    #[test]
    fn test_from_fields_requires_username() {
        let fields = json!({ "contributions": "5", "reputation": "100" });
        assert!(UserProfileData::from_fields("0xabc123", fields.as_object().unwrap()).is_none());
    }

    #[test]
    fn test_preferences_from_fields() {
        let fields = json!({ "name": "preferences", "value": ["DeFi", 3, "NFT"] });
        assert_eq!(
            preferences_from_fields(fields.as_object().unwrap()),
            vec!["DeFi".to_string(), "NFT".to_string()]
        );

        let empty = json!({ "name": "preferences" });
        assert!(preferences_from_fields(empty.as_object().unwrap()).is_empty());
    }
}
