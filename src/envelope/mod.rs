//! Response envelope handling
//!
//! Cloud providers disagree about the shape of a list response. Some wrap
//! the items in a named array field (`Images.Image`), some return a bare
//! array, and pagination metadata appears either as top-level body fields
//! (`PageNumber`, `PageSize`, `TotalCount`) or as response headers. This
//! module extracts items and metadata from either shape, and normalizes
//! metadata maps to canonical lower-case keys.

use crate::types::JsonValue;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Walk a dot-notation path into a JSON value
///
/// Numeric segments index into arrays (`links.actions.0`). Returns None
/// if any segment is missing.
pub fn extract_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let mut current = value;
    for part in path.split('.') {
        current = match current {
            JsonValue::Object(map) => map.get(part)?,
            JsonValue::Array(arr) => arr.get(part.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Extract the item array from a response body
///
/// With a path, the field at the path is unwrapped (`Images.Image` style);
/// a missing field yields an empty list rather than an error. Without a
/// path, the body itself must be a bare array.
pub fn extract_items(body: &JsonValue, path: Option<&str>) -> Vec<JsonValue> {
    let target = match path {
        Some(p) => match extract_path(body, p) {
            Some(v) => v,
            None => return Vec::new(),
        },
        None => body,
    };
    match target {
        JsonValue::Array(arr) => arr.clone(),
        JsonValue::Null => Vec::new(),
        other => vec![other.clone()],
    }
}

/// Extract a string-ish field (strings pass through, numbers are rendered)
pub fn extract_string(body: &JsonValue, path: &str) -> Option<String> {
    match extract_path(body, path)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Extract an unsigned integer field (numeric or numeric-string)
pub fn extract_u64(body: &JsonValue, path: &str) -> Option<u64> {
    match extract_path(body, path)? {
        JsonValue::Number(n) => n.as_u64(),
        JsonValue::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Read an unsigned integer from a response header
pub fn header_u64(headers: &HeaderMap, name: &str) -> Option<u64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.parse().ok())
}

/// Normalize a metadata map to lower-case keys
///
/// Some providers upper/lower-case metadata keys unpredictably between
/// write and read. Keys are canonicalized on ingestion; values are kept
/// as submitted. On a case collision the later entry wins.
pub fn normalize_metadata(metadata: HashMap<String, String>) -> HashMap<String, String> {
    metadata
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect()
}

/// Serde helper: deserialize a string map with lower-cased keys
///
/// Used on domain-record metadata fields via `#[serde(deserialize_with)]`.
pub fn lowercase_keys<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, String>::deserialize(deserializer)?;
    Ok(normalize_metadata(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_extract_path_nested() {
        let body = json!({"Images": {"Image": [{"ImageId": "m-1"}]}});
        let v = extract_path(&body, "Images.Image").unwrap();
        assert!(v.is_array());
        assert!(extract_path(&body, "Images.Missing").is_none());
        assert!(extract_path(&body, "Images.Image.Deeper").is_none());
    }

    #[test]
    fn test_extract_path_array_index() {
        let body = json!({"links": {"actions": ["36805096", "36805097"]}});
        let v = extract_path(&body, "links.actions.0").unwrap();
        assert_eq!(v, "36805096");
        assert!(extract_path(&body, "links.actions.9").is_none());
    }

    #[test]
    fn test_extract_items_named_field() {
        let body = json!({"Images": {"Image": [{"ImageId": "m-1"}, {"ImageId": "m-2"}]}});
        let items = extract_items(&body, Some("Images.Image"));
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["ImageId"], "m-1");
    }

    #[test]
    fn test_extract_items_bare_array() {
        let body = json!([{"id": 1}, {"id": 2}, {"id": 3}]);
        assert_eq!(extract_items(&body, None).len(), 3);
    }

    #[test]
    fn test_extract_items_missing_field_is_empty() {
        let body = json!({"RequestId": "abc"});
        assert!(extract_items(&body, Some("Images.Image")).is_empty());
    }

    #[test]
    fn test_extract_items_null_is_empty() {
        let body = json!({"droplets": null});
        assert!(extract_items(&body, Some("droplets")).is_empty());
    }

    #[test]
    fn test_extract_u64_number_and_string() {
        let body = json!({"TotalCount": 28, "PageNumber": "2"});
        assert_eq!(extract_u64(&body, "TotalCount"), Some(28));
        assert_eq!(extract_u64(&body, "PageNumber"), Some(2));
        assert_eq!(extract_u64(&body, "PageSize"), None);
    }

    #[test]
    fn test_extract_string_renders_numbers() {
        let body = json!({"next": "tok-2", "page": 3});
        assert_eq!(extract_string(&body, "next"), Some("tok-2".to_string()));
        assert_eq!(extract_string(&body, "page"), Some("3".to_string()));
    }

    #[test]
    fn test_header_u64() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Container-Object-Count", "42".parse().unwrap());
        assert_eq!(header_u64(&headers, "X-Container-Object-Count"), Some(42));
        assert_eq!(header_u64(&headers, "X-Missing"), None);
    }

    #[test]
    fn test_normalize_metadata() {
        let mut raw = HashMap::new();
        raw.insert("Billing-Code".to_string(), "eng".to_string());
        raw.insert("ENV".to_string(), "prod".to_string());

        let normalized = normalize_metadata(raw);
        assert_eq!(normalized.get("billing-code"), Some(&"eng".to_string()));
        assert_eq!(normalized.get("env"), Some(&"prod".to_string()));
        assert!(!normalized.contains_key("ENV"));
    }
}
