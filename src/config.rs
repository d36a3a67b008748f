//! Provider profile configuration
//!
//! A provider profile is a YAML document describing one cloud provider:
//! endpoint, auth scheme, transport tuning, and the resources it exposes
//! with their pagination, envelope and delete conventions. Profiles are
//! loaded from a file or string, or taken from the built-in catalog.

use crate::auth::{AuthConfig, Location};
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use crate::types::{BackoffType, Method, ParamEncoding, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Profile
// ============================================================================

/// Complete provider profile loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderProfile {
    /// Kind of document (always "provider")
    #[serde(default = "default_kind")]
    pub kind: String,

    /// Profile format version
    #[serde(default = "default_version")]
    pub version: String,

    /// Provider metadata
    pub metadata: ProfileMetadata,

    /// Base URL for API requests
    pub base_url: String,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthDef,

    /// HTTP transport configuration
    #[serde(default)]
    pub http: HttpDef,

    /// Default request settings applied to every call
    #[serde(default)]
    pub request_defaults: RequestDefaults,

    /// Resource definitions
    #[serde(default)]
    pub resources: Vec<ResourceDef>,
}

fn default_kind() -> String {
    "provider".to_string()
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ProviderProfile {
    /// Look up a resource definition by name
    pub fn resource(&self, name: &str) -> Result<&ResourceDef> {
        self.resources
            .iter()
            .find(|r| r.name == name)
            .ok_or_else(|| Error::UnknownResource {
                provider: self.metadata.name.clone(),
                resource: name.to_string(),
            })
    }

    /// Validate the profile for structural problems
    pub fn validate(&self) -> Result<()> {
        if self.metadata.name.is_empty() {
            return Err(Error::missing_field("metadata.name"));
        }
        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        let mut seen = std::collections::HashSet::new();
        for resource in &self.resources {
            if resource.name.is_empty() {
                return Err(Error::missing_field("resources[].name"));
            }
            if !seen.insert(&resource.name) {
                return Err(Error::config(format!(
                    "duplicate resource name '{}'",
                    resource.name
                )));
            }
            if resource.path.is_empty() {
                return Err(Error::config(format!(
                    "resource '{}' has an empty path",
                    resource.name
                )));
            }
            if let PaginationDef::Count {
                page_size,
                total_path,
                total_header,
                ..
            } = &resource.pagination
            {
                if *page_size == 0 {
                    return Err(Error::config(format!(
                        "resource '{}': count pagination requires page_size > 0",
                        resource.name
                    )));
                }
                // Without a total the walk can never advance past page 1
                if total_path.is_none() && total_header.is_none() {
                    return Err(Error::config(format!(
                        "resource '{}': count pagination requires total_path or total_header",
                        resource.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Provider metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileMetadata {
    /// Unique provider name (e.g., "aliyun-ecs")
    pub name: String,

    /// Human-readable title
    #[serde(default)]
    pub title: Option<String>,

    /// Description of the provider
    #[serde(default)]
    pub description: Option<String>,
}

// ============================================================================
// Auth Definition
// ============================================================================

/// Auth declaration as written in a profile
///
/// Secrets may be inline (`token`) or pulled from the environment at
/// client-build time (`token_env`), so profiles can be committed without
/// credentials in them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDef {
    /// No authentication
    #[default]
    None,

    /// Bearer token
    Bearer {
        #[serde(default)]
        token: Option<String>,
        #[serde(default)]
        token_env: Option<String>,
    },

    /// API key in a header or query parameter
    ApiKey {
        #[serde(default)]
        location: Location,
        name: String,
        #[serde(default)]
        prefix: Option<String>,
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        value_env: Option<String>,
    },

    /// HTTP basic auth
    Basic {
        username: String,
        #[serde(default)]
        password: Option<String>,
        #[serde(default)]
        password_env: Option<String>,
    },
}

impl AuthDef {
    /// Resolve the declaration into a runtime [`AuthConfig`]
    pub fn resolve(&self) -> Result<AuthConfig> {
        match self {
            AuthDef::None => Ok(AuthConfig::None),
            AuthDef::Bearer { token, token_env } => Ok(AuthConfig::Bearer {
                token: resolve_secret(token.as_deref(), token_env.as_deref(), "auth.token")?,
            }),
            AuthDef::ApiKey {
                location,
                name,
                prefix,
                value,
                value_env,
            } => Ok(AuthConfig::ApiKey {
                location: *location,
                name: name.clone(),
                prefix: prefix.clone(),
                value: resolve_secret(value.as_deref(), value_env.as_deref(), "auth.value")?,
            }),
            AuthDef::Basic {
                username,
                password,
                password_env,
            } => Ok(AuthConfig::Basic {
                username: username.clone(),
                password: resolve_secret(
                    password.as_deref(),
                    password_env.as_deref(),
                    "auth.password",
                )?,
            }),
        }
    }
}

fn resolve_secret(inline: Option<&str>, env_var: Option<&str>, field: &str) -> Result<String> {
    if let Some(value) = inline {
        return Ok(value.to_string());
    }
    if let Some(var) = env_var {
        return std::env::var(var)
            .map_err(|_| Error::config(format!("environment variable '{var}' is not set")));
    }
    Err(Error::missing_field(field))
}

// ============================================================================
// HTTP Definition
// ============================================================================

/// Transport tuning as written in a profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpDef {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Max retries for transient failures
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff delay in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Max backoff delay in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    3
}
fn default_initial_backoff_ms() -> u64 {
    100
}
fn default_max_backoff_ms() -> u64 {
    60_000
}

impl Default for HttpDef {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl HttpDef {
    /// Build an [`HttpClientConfig`] for a base URL and default headers
    pub fn to_client_config(&self, base_url: &str, headers: &StringMap) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }
}

/// Default request settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestDefaults {
    /// Query parameters added to every request (e.g., `RegionId`)
    #[serde(default)]
    pub params: StringMap,

    /// Headers added to every request
    #[serde(default)]
    pub headers: StringMap,
}

// ============================================================================
// Resource Definition
// ============================================================================

/// One resource exposed by a provider (instances, images, droplets, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Resource name used by callers
    pub name: String,

    /// List endpoint path
    pub path: String,

    /// Single-resource path with an `{id}` placeholder
    /// (defaults to `{path}/{id}`)
    #[serde(default)]
    pub item_path: Option<String>,

    /// Dot path to the item array in a list response
    /// (e.g., `Images.Image`, `droplets`); absent for bare arrays
    #[serde(default)]
    pub envelope: Option<String>,

    /// Dot path unwrapping a single-resource response (e.g., `droplet`)
    #[serde(default)]
    pub item_envelope: Option<String>,

    /// Pagination convention for the list endpoint
    #[serde(default)]
    pub pagination: PaginationDef,

    /// Create convention
    #[serde(default)]
    pub create: CreateDef,

    /// Delete convention
    #[serde(default)]
    pub delete: DeleteDef,

    /// Dot path to the status field on a single-resource record
    #[serde(default)]
    pub status_path: Option<String>,

    /// Status-polling tuning
    #[serde(default)]
    pub poll: PollDef,
}

impl ResourceDef {
    /// Render the single-resource path for an id
    pub fn item_path_for(&self, id: &str) -> String {
        match &self.item_path {
            Some(template) => template.replace("{id}", id),
            None => format!("{}/{}", self.path.trim_end_matches('/'), id),
        }
    }

    /// Render the delete path for an id
    pub fn delete_path_for(&self, id: &str) -> String {
        match &self.delete.path {
            Some(template) => template.replace("{id}", id),
            None => self.item_path_for(id),
        }
    }
}

/// Pagination conventions supported by the toolkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PaginationDef {
    /// Single-page listing
    #[default]
    None,

    /// Count-based: `PageNumber`/`PageSize`/`TotalCount` arithmetic
    Count {
        /// Query parameter carrying the page number
        page_param: String,
        /// Query parameter carrying the page size
        size_param: String,
        /// Requested page size
        page_size: u32,
        /// Dot path to the returned page number (falls back to the
        /// requested marker when absent)
        #[serde(default)]
        number_path: Option<String>,
        /// Dot path to the returned page size
        #[serde(default)]
        size_path: Option<String>,
        /// Dot path to the total count in the body
        #[serde(default)]
        total_path: Option<String>,
        /// Response header carrying the total count (Swift-style)
        #[serde(default)]
        total_header: Option<String>,
    },

    /// Token-based: the response embeds the next-page token verbatim
    Token {
        /// Query parameter carrying the marker on the next request
        marker_param: String,
        /// Dot path to the next-page token in the body
        token_path: String,
    },
}

/// Create conventions for a resource
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDef {
    /// HTTP method (POST unless stated otherwise)
    #[serde(default = "default_create_method")]
    pub method: Method,

    /// Path override (defaults to the resource path)
    #[serde(default)]
    pub path: Option<String>,

    /// How create parameters are carried
    #[serde(default)]
    pub encoding: ParamEncoding,

    /// Dot path to the provider-assigned id in the response
    #[serde(default)]
    pub id_path: Option<String>,

    /// Dot path to the asynchronous operation/event id in the response
    #[serde(default)]
    pub operation_path: Option<String>,
}

fn default_create_method() -> Method {
    Method::POST
}

impl Default for CreateDef {
    fn default() -> Self {
        Self {
            method: Method::POST,
            path: None,
            encoding: ParamEncoding::default(),
            id_path: None,
            operation_path: None,
        }
    }
}

/// Delete conventions for a resource
///
/// Providers disagree about deleting an absent resource: some treat 404
/// as already-deleted, others surface it. `missing_ok` records the
/// provider's contract; the default is the lenient reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDef {
    /// HTTP method (DELETE unless the provider models delete as an action POST)
    #[serde(default = "default_delete_method")]
    pub method: Method,

    /// Path override with an `{id}` placeholder (defaults to the item path)
    #[serde(default)]
    pub path: Option<String>,

    /// Whether a 404 counts as success
    #[serde(default = "default_true")]
    pub missing_ok: bool,
}

fn default_delete_method() -> Method {
    Method::DELETE
}

fn default_true() -> bool {
    true
}

impl Default for DeleteDef {
    fn default() -> Self {
        Self {
            method: Method::DELETE,
            path: None,
            missing_ok: true,
        }
    }
}

/// Status-polling tuning for asynchronous resource operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollDef {
    /// Fixed sleep between probes, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub interval_secs: u64,

    /// Overall ceiling, in seconds
    #[serde(default = "default_poll_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_poll_interval_secs() -> u64 {
    2
}

fn default_poll_timeout_secs() -> u64 {
    1800
}

impl Default for PollDef {
    fn default() -> Self {
        Self {
            interval_secs: default_poll_interval_secs(),
            timeout_secs: default_poll_timeout_secs(),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Load and validate a provider profile from a YAML file
pub fn load_profile(path: impl AsRef<Path>) -> Result<ProviderProfile> {
    let content = std::fs::read_to_string(path.as_ref())?;
    load_profile_from_str(&content)
}

/// Load and validate a provider profile from a YAML string
pub fn load_profile_from_str(yaml: &str) -> Result<ProviderProfile> {
    let profile: ProviderProfile = serde_yaml::from_str(yaml)?;
    profile.validate()?;
    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = r#"
metadata:
  name: test-cloud
base_url: "https://api.test-cloud.example"
resources:
  - name: servers
    path: /v2/servers
    envelope: servers
"#;

    #[test]
    fn test_load_minimal_profile() {
        let profile = load_profile_from_str(MINIMAL).unwrap();
        assert_eq!(profile.kind, "provider");
        assert_eq!(profile.metadata.name, "test-cloud");
        assert_eq!(profile.resources.len(), 1);
        assert!(matches!(
            profile.resources[0].pagination,
            PaginationDef::None
        ));
        assert!(profile.resources[0].delete.missing_ok);
    }

    #[test]
    fn test_load_profile_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provider.yaml");
        std::fs::write(&path, MINIMAL).unwrap();

        let profile = load_profile(&path).unwrap();
        assert_eq!(profile.metadata.name, "test-cloud");
    }

    #[test]
    fn test_count_pagination_parsed() {
        let yaml = r#"
metadata:
  name: count-cloud
base_url: "https://api.example"
resources:
  - name: instances
    path: /DescribeInstances
    envelope: Instances.Instance
    pagination:
      type: count
      page_param: PageNumber
      size_param: PageSize
      page_size: 10
      total_path: TotalCount
"#;
        let profile = load_profile_from_str(yaml).unwrap();
        match &profile.resources[0].pagination {
            PaginationDef::Count {
                page_param,
                page_size,
                total_path,
                ..
            } => {
                assert_eq!(page_param, "PageNumber");
                assert_eq!(*page_size, 10);
                assert_eq!(total_path.as_deref(), Some("TotalCount"));
            }
            other => panic!("expected count pagination, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let yaml = r#"
metadata:
  name: bad-cloud
base_url: "https://api.example"
resources:
  - name: instances
    path: /DescribeInstances
    pagination:
      type: count
      page_param: PageNumber
      size_param: PageSize
      page_size: 0
"#;
        let err = load_profile_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_count_without_total_source_rejected() {
        let yaml = r#"
metadata:
  name: bad-cloud
base_url: "https://api.example"
resources:
  - name: instances
    path: /DescribeInstances
    pagination:
      type: count
      page_param: PageNumber
      size_param: PageSize
      page_size: 10
"#;
        let err = load_profile_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("total_path or total_header"));
    }

    #[test]
    fn test_duplicate_resource_rejected() {
        let yaml = r#"
metadata:
  name: dup-cloud
base_url: "https://api.example"
resources:
  - name: servers
    path: /a
  - name: servers
    path: /b
"#;
        let err = load_profile_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("duplicate resource"));
    }

    #[test]
    fn test_item_and_delete_paths() {
        let resource = ResourceDef {
            name: "droplets".to_string(),
            path: "/v2/droplets".to_string(),
            item_path: None,
            envelope: Some("droplets".to_string()),
            item_envelope: Some("droplet".to_string()),
            pagination: PaginationDef::default(),
            create: CreateDef::default(),
            delete: DeleteDef {
                method: Method::DELETE,
                path: Some("/v2/droplets/{id}/destroy".to_string()),
                missing_ok: true,
            },
            status_path: None,
            poll: PollDef::default(),
        };
        assert_eq!(resource.item_path_for("42"), "/v2/droplets/42");
        assert_eq!(resource.delete_path_for("42"), "/v2/droplets/42/destroy");
    }

    #[test]
    fn test_auth_resolution_from_env() {
        let def = AuthDef::Bearer {
            token: None,
            token_env: Some("STRATUS_TEST_TOKEN".to_string()),
        };
        std::env::set_var("STRATUS_TEST_TOKEN", "from-env");
        let auth = def.resolve().unwrap();
        assert!(matches!(auth, AuthConfig::Bearer { token } if token == "from-env"));
        std::env::remove_var("STRATUS_TEST_TOKEN");
    }

    #[test]
    fn test_auth_resolution_missing() {
        let def = AuthDef::Bearer {
            token: None,
            token_env: None,
        };
        assert!(def.resolve().is_err());
    }

    #[test]
    fn test_http_def_to_client_config() {
        let def = HttpDef {
            timeout_secs: 10,
            max_retries: 1,
            ..HttpDef::default()
        };
        let mut headers = StringMap::new();
        headers.insert("X-Region".to_string(), "fra1".to_string());
        let config = def.to_client_config("https://api.example", &headers);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.base_url.as_deref(), Some("https://api.example"));
        assert_eq!(
            config.default_headers.get("X-Region"),
            Some(&"fra1".to_string())
        );
    }
}
