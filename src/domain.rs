//! Typed domain records
//!
//! Immutable value objects for the built-in provider shapes. Fields map
//! 1:1 to provider JSON keys; lists default to empty, nullable fields
//! are `Option`, and metadata keys are normalized to lower-case on
//! ingestion. These pair with [`crate::resource::ProviderClient::list_as`]
//! and `get_as` for callers who prefer records over raw JSON.

use crate::envelope;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A compute instance (count-paginated provider shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(rename = "InstanceId")]
    pub instance_id: String,

    #[serde(rename = "InstanceName", default)]
    pub instance_name: Option<String>,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "ImageId", default)]
    pub image_id: Option<String>,

    #[serde(rename = "VSwitchId", default)]
    pub v_switch_id: Option<String>,

    #[serde(rename = "CreationTime", default)]
    pub creation_time: Option<DateTime<Utc>>,

    #[serde(rename = "SecurityGroupIds", default)]
    pub security_group_ids: Vec<String>,

    /// Instance tags, keys normalized to lower-case
    #[serde(
        rename = "Tags",
        default,
        deserialize_with = "envelope::lowercase_keys"
    )]
    pub tags: HashMap<String, String>,
}

/// A machine image (count-paginated provider shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "ImageId")]
    pub image_id: String,

    #[serde(rename = "ImageName", default)]
    pub image_name: Option<String>,

    #[serde(rename = "OSType", default)]
    pub os_type: Option<String>,

    #[serde(rename = "Size", default)]
    pub size_gb: Option<u64>,
}

/// A droplet-style server (token-paginated provider shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub id: u64,

    pub name: String,

    pub status: String,

    #[serde(default)]
    pub region: Option<String>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Free-form metadata, keys normalized to lower-case
    #[serde(default, deserialize_with = "envelope::lowercase_keys")]
    pub metadata: HashMap<String, String>,
}

/// An asynchronous provider operation, polled until a terminal state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,

    pub status: String,

    #[serde(default)]
    pub resource_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_instance_from_provider_json() {
        let instance: Instance = serde_json::from_value(json!({
            "InstanceId": "i-bp67acfmxazb4p",
            "InstanceName": "web-01",
            "Status": "Running",
            "ImageId": "m-25skctu",
            "CreationTime": "2024-01-15T10:30:00Z",
            "SecurityGroupIds": ["sg-1", "sg-2"],
            "Tags": {"Billing-Code": "eng", "ENV": "prod"}
        }))
        .unwrap();

        assert_eq!(instance.instance_id, "i-bp67acfmxazb4p");
        assert_eq!(instance.status, "Running");
        assert_eq!(instance.security_group_ids, vec!["sg-1", "sg-2"]);
        // Metadata keys normalized regardless of submitted case
        assert_eq!(instance.tags.get("billing-code"), Some(&"eng".to_string()));
        assert_eq!(instance.tags.get("env"), Some(&"prod".to_string()));
    }

    #[test]
    fn test_instance_lists_default_empty() {
        let instance: Instance = serde_json::from_value(json!({
            "InstanceId": "i-1",
            "Status": "Stopped"
        }))
        .unwrap();

        assert!(instance.security_group_ids.is_empty());
        assert!(instance.tags.is_empty());
        assert!(instance.instance_name.is_none());
        assert!(instance.creation_time.is_none());
    }

    #[test]
    fn test_server_from_provider_json() {
        let server: Server = serde_json::from_value(json!({
            "id": 3164494,
            "name": "web-01",
            "status": "active",
            "region": "nyc3",
            "created_at": "2024-03-01T12:00:00Z",
            "tags": ["web", "prod"],
            "metadata": {"Owner": "platform"}
        }))
        .unwrap();

        assert_eq!(server.id, 3164494);
        assert_eq!(server.tags, vec!["web", "prod"]);
        assert_eq!(server.metadata.get("owner"), Some(&"platform".to_string()));
    }

    #[test]
    fn test_image_optional_fields() {
        let image: Image = serde_json::from_value(json!({"ImageId": "m-1"})).unwrap();
        assert_eq!(image.image_id, "m-1");
        assert!(image.image_name.is_none());
        assert!(image.size_gb.is_none());
    }
}
