//! Request options for list and create operations
//!
//! Each endpoint recognizes an enumerated set of optional parameters;
//! callers supply them through these builders. On the wire the options
//! are flattened into query-string or form key/value pairs, with
//! list-valued options comma-joined (`ssh_key_ids=5,4`). JSON-encoded
//! creates keep native arrays instead.

use crate::types::{JsonObject, JsonValue};

/// Optional parameters for a list call
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    params: Vec<(String, String)>,
}

impl ListOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single parameter
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    /// Add a list-valued parameter, comma-joined
    #[must_use]
    pub fn param_list<V: ToString>(mut self, key: impl Into<String>, values: &[V]) -> Self {
        let joined = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((key.into(), joined));
        self
    }

    /// The flattened key/value pairs
    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Value of a single create option
#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    /// String value
    Str(String),
    /// Integer value
    Int(i64),
    /// Boolean value
    Bool(bool),
    /// List value (comma-joined on query/form encodings)
    List(Vec<String>),
}

impl OptionValue {
    /// Render as a single wire value
    pub fn to_wire(&self) -> String {
        match self {
            Self::Str(s) => s.clone(),
            Self::Int(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::List(values) => values.join(","),
        }
    }

    /// Render as a JSON value (lists stay arrays)
    pub fn to_json(&self) -> JsonValue {
        match self {
            Self::Str(s) => JsonValue::String(s.clone()),
            Self::Int(n) => JsonValue::Number((*n).into()),
            Self::Bool(b) => JsonValue::Bool(*b),
            Self::List(values) => JsonValue::Array(
                values
                    .iter()
                    .map(|v| JsonValue::String(v.clone()))
                    .collect(),
            ),
        }
    }
}

/// Required and optional parameters for a create call
#[derive(Debug, Clone, Default)]
pub struct CreateOptions {
    params: Vec<(String, OptionValue)>,
}

impl CreateOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a string parameter
    #[must_use]
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params
            .push((key.into(), OptionValue::Str(value.into())));
        self
    }

    /// Set an integer parameter
    #[must_use]
    pub fn set_int(mut self, key: impl Into<String>, value: i64) -> Self {
        self.params.push((key.into(), OptionValue::Int(value)));
        self
    }

    /// Set a boolean parameter
    #[must_use]
    pub fn set_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.params.push((key.into(), OptionValue::Bool(value)));
        self
    }

    /// Set a list-valued parameter
    #[must_use]
    pub fn set_list<V: ToString>(mut self, key: impl Into<String>, values: &[V]) -> Self {
        self.params.push((
            key.into(),
            OptionValue::List(values.iter().map(ToString::to_string).collect()),
        ));
        self
    }

    /// Whether no parameters have been set
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Flatten into key/value pairs for query or form encoding
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(k, v)| (k.clone(), v.to_wire()))
            .collect()
    }

    /// Render as a JSON object body
    pub fn to_json(&self) -> JsonValue {
        let mut object = JsonObject::new();
        for (key, value) in &self.params {
            object.insert(key.clone(), value.to_json());
        }
        JsonValue::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_list_options_pairs() {
        let options = ListOptions::new()
            .param("RegionId", "cn-hangzhou")
            .param("Status", "Running");
        assert_eq!(
            options.as_pairs(),
            &[
                ("RegionId".to_string(), "cn-hangzhou".to_string()),
                ("Status".to_string(), "Running".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_values_comma_joined() {
        let options = ListOptions::new().param_list("ssh_key_ids", &[5, 4]);
        assert_eq!(
            options.as_pairs(),
            &[("ssh_key_ids".to_string(), "5,4".to_string())]
        );
    }

    #[test]
    fn test_create_options_to_pairs() {
        let options = CreateOptions::new()
            .set("instance_name", "web-01")
            .set("v_switch_id", "vsw-123")
            .set_int("size_gb", 80)
            .set_bool("backups", false)
            .set_list("ssh_key_ids", &[5, 4]);
        let pairs = options.to_pairs();
        assert_eq!(pairs[0], ("instance_name".to_string(), "web-01".to_string()));
        assert_eq!(pairs[2], ("size_gb".to_string(), "80".to_string()));
        assert_eq!(pairs[3], ("backups".to_string(), "false".to_string()));
        assert_eq!(pairs[4], ("ssh_key_ids".to_string(), "5,4".to_string()));
    }

    #[test]
    fn test_create_options_to_json_keeps_arrays() {
        let options = CreateOptions::new()
            .set("name", "web-01")
            .set_int("size_gb", 80)
            .set_list("ssh_keys", &["5", "4"]);
        assert_eq!(
            options.to_json(),
            json!({"name": "web-01", "size_gb": 80, "ssh_keys": ["5", "4"]})
        );
    }
}
