//! Explanation domain models.
//!
//! An explanation is an on-chain `vmc::Explanation` object. Numeric fields
//! arrive string-encoded (`u64` values are JSON strings on the RPC wire).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// An explanation object owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationData {
    pub id: String,
    pub title: String,
    pub package_id: String,
    pub module_name: String,
    pub function_name: String,
    pub explanation_text: String,
    pub author: String,
    pub rating: u64,
    pub votes: u64,
    pub created_at: u64,
}

impl ExplanationData {
    /// Builds an explanation from the move fields of an `Explanation` object.
    ///
    /// Returns `None` when any expected field is missing or has the wrong shape.
    pub fn from_fields(object_id: &str, fields: &Map<String, Value>) -> Option<Self> {
        Some(Self {
            id: object_id.to_string(),
            title: string_field(fields, "title")?,
            package_id: string_field(fields, "package_id")?,
            module_name: string_field(fields, "module_name")?,
            function_name: string_field(fields, "function_name")?,
            explanation_text: string_field(fields, "explanation_text")?,
            author: string_field(fields, "author")?,
            rating: u64_field(fields, "rating")?,
            votes: u64_field(fields, "votes")?,
            created_at: u64_field(fields, "created_at")?,
        })
    }
}

/// Aggregate counters of the explanation registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    pub total_count: u64,
    pub categories_count: u64,
}

impl RegistryStats {
    /// Reads `total_count` and the number of keys under `categories.fields`.
    pub fn from_fields(fields: &Map<String, Value>) -> Option<Self> {
        let total_count = u64_field(fields, "total_count")?;
        let categories_count = category_map(fields).map_or(0, |map| map.len() as u64);
        Some(Self {
            total_count,
            categories_count,
        })
    }
}

/// The `categories.fields` map of a registry object, if present.
pub fn category_map(fields: &Map<String, Value>) -> Option<&Map<String, Value>> {
    fields
        .get("categories")
        .and_then(|c| c.get("fields"))
        .and_then(Value::as_object)
}

pub(crate) fn string_field(fields: &Map<String, Value>, name: &str) -> Option<String> {
    fields.get(name).and_then(Value::as_str).map(str::to_string)
}

/// Reads an integer that may be string-encoded or a plain JSON number.
pub(crate) fn u64_field(fields: &Map<String, Value>, name: &str) -> Option<u64> {
    parse_u64(fields.get(name)?)
}

pub(crate) fn parse_u64(value: &Value) -> Option<u64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_u64(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn explanation_fields() -> Map<String, Value> {
        json!({
            "title": "Swap",
            "package_id": "0x1eab",
            "module_name": "pool",
            "function_name": "swap",
            "explanation_text": "Swaps coin A for coin B",
            "author": "0x42",
            "rating": "4",
            "votes": "12",
            "created_at": "1700000000000"
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_from_fields_parses_string_integers() {
        let expl = ExplanationData::from_fields("0xe1", &explanation_fields()).unwrap();
        assert_eq!(expl.id, "0xe1");
        assert_eq!(expl.module_name, "pool");
        assert_eq!(expl.rating, 4);
        assert_eq!(expl.votes, 12);
        assert_eq!(expl.created_at, 1_700_000_000_000);
    }

    #[test]
    fn test_from_fields_rejects_missing_or_malformed() {
        let mut missing = explanation_fields();
        missing.remove("author");
        assert!(ExplanationData::from_fields("0xe1", &missing).is_none());

        let mut malformed = explanation_fields();
        malformed.insert("votes".to_string(), json!("many"));
        assert!(ExplanationData::from_fields("0xe1", &malformed).is_none());
    }

    #[test]
    fn test_registry_stats_counts_category_keys() {
        let fields = json!({
            "total_count": "7",
            "categories": { "fields": { "DeFi": [], "NFT": [], "Gaming": [] } }
        });
        let stats = RegistryStats::from_fields(fields.as_object().unwrap()).unwrap();
        assert_eq!(stats.total_count, 7);
        assert_eq!(stats.categories_count, 3);
    }

    #[test]
    fn test_registry_stats_without_categories() {
        let fields = json!({ "total_count": 2 });
        let stats = RegistryStats::from_fields(fields.as_object().unwrap()).unwrap();
        assert_eq!(stats, RegistryStats { total_count: 2, categories_count: 0 });
    }

    #[test]
    fn test_parse_u64_rejects_negative_and_float() {
        assert_eq!(parse_u64(&json!(-1)), None);
        assert_eq!(parse_u64(&json!(1.5)), None);
        assert_eq!(parse_u64(&json!(" 9 ")), Some(9));
    }
}
