//! Provider resource client
//!
//! The typed façade over one provider profile: `list` (pageable),
//! `get`, `create`, `delete`, and status waiting. This is where
//! provider status-code conventions are enforced:
//!
//! - 404 on a list endpoint: empty result, not an error
//! - 404 on a single-resource GET: `None`
//! - 404 on delete: success or [`Error::NotFound`] per the profile's
//!   `missing_ok` policy
//! - 409 on create: [`Error::AlreadyExists`]
//! - any other non-2xx: [`Error::HttpStatus`]
//!
//! The client is stateless apart from its configuration; concurrent
//! callers share nothing mutable.

mod options;

pub use options::{CreateOptions, ListOptions, OptionValue};

use crate::config::{PaginationDef, ProviderProfile, ResourceDef};
use crate::envelope;
use crate::error::{Error, Result};
use crate::http::{response_error, HttpClient, RequestConfig};
use crate::pagination::{count_based_next, Marker, Page, PageFetcher, Pages};
use crate::poll::{self, Probe};
use crate::types::{JsonValue, OptionStringExt, ParamEncoding};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// Result of a create call
///
/// Providers return a provider-assigned id, an asynchronous
/// operation/event id, or both; the raw body is kept for callers that
/// need more.
#[derive(Debug, Clone)]
pub struct CreateResult {
    /// Provider-assigned resource id
    pub id: Option<String>,
    /// Asynchronous operation/event id, when the create is async
    pub operation_id: Option<String>,
    /// Full response body
    pub body: JsonValue,
}

/// REST client for one provider profile
pub struct ProviderClient {
    profile: ProviderProfile,
    http: Arc<HttpClient>,
}

impl ProviderClient {
    /// Build a client from a validated profile
    ///
    /// Resolves credentials and constructs the transport; fails on a
    /// structurally invalid profile or unresolvable secrets.
    pub fn new(profile: ProviderProfile) -> Result<Self> {
        profile.validate()?;
        let auth = profile.auth.resolve()?;
        let config = profile
            .http
            .to_client_config(&profile.base_url, &profile.request_defaults.headers);
        Ok(Self {
            http: Arc::new(HttpClient::with_auth(config, auth)),
            profile,
        })
    }

    /// The profile this client was built from
    pub fn profile(&self) -> &ProviderProfile {
        &self.profile
    }

    /// List a resource, returning a pageable handle over raw records
    pub async fn list(&self, resource: &str, options: ListOptions) -> Result<Pages<JsonValue>> {
        self.list_as::<JsonValue>(resource, options).await
    }

    /// List a resource, deserializing records into `T`
    ///
    /// The returned handle holds the already-fetched first page;
    /// `concat()` walks the rest lazily.
    pub async fn list_as<T>(&self, resource: &str, options: ListOptions) -> Result<Pages<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        let def = self.profile.resource(resource)?.clone();
        let mut base_params: Vec<(String, String)> = self
            .profile
            .request_defaults
            .params
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        base_params.extend(options.as_pairs().iter().cloned());

        let fetcher: Arc<dyn PageFetcher<T>> = Arc::new(ListFetcher {
            http: Arc::clone(&self.http),
            resource: def,
            base_params,
            _item: PhantomData,
        });
        let first = fetcher.fetch_page(None).await?;
        Ok(Pages::new(first, fetcher))
    }

    /// Fetch a single resource by id; 404 yields `None`
    pub async fn get(&self, resource: &str, id: &str) -> Result<Option<JsonValue>> {
        self.get_as::<JsonValue>(resource, id).await
    }

    /// Fetch a single resource by id, deserializing into `T`
    pub async fn get_as<T: DeserializeOwned>(&self, resource: &str, id: &str) -> Result<Option<T>> {
        let def = self.profile.resource(resource)?;
        let path = def.item_path_for(id);
        let request = self.base_request();

        let response = self.http.get_with_config(&path, request).await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(resource, id, "single-resource GET returned 404");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }

        let body: JsonValue = response.json().await.map_err(Error::Http)?;
        let record = match def.item_envelope.as_deref() {
            Some(path) => envelope::extract_path(&body, path)
                .cloned()
                .unwrap_or(JsonValue::Null),
            None => body,
        };
        if record.is_null() {
            return Ok(None);
        }
        let value = serde_json::from_value(record)
            .map_err(|e| Error::decode(format!("record for '{resource}/{id}': {e}")))?;
        Ok(Some(value))
    }

    /// Create a resource
    ///
    /// Parameters are carried per the profile's encoding: a JSON body,
    /// a form body, or query parameters (action-style APIs). A 409
    /// collision with a same-named resource surfaces as
    /// [`Error::AlreadyExists`].
    pub async fn create(&self, resource: &str, options: CreateOptions) -> Result<CreateResult> {
        let def = self.profile.resource(resource)?;
        let path = def.create.path.clone().unwrap_or_else(|| def.path.clone());

        let mut request = self.base_request();
        match def.create.encoding {
            ParamEncoding::Json => request = request.json(options.to_json()),
            ParamEncoding::Form => request = request.form_pairs(options.to_pairs()),
            ParamEncoding::Query => {
                for (key, value) in options.to_pairs() {
                    request = request.query(key, value);
                }
            }
        }

        let response = self
            .http
            .request(def.create.method.into(), &path, request)
            .await?;
        let status = response.status();
        if status == StatusCode::CONFLICT {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::already_exists(format!("{resource}: {body}")));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found(format!("{resource} create endpoint")));
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }

        let body: JsonValue = response.json().await.map_err(Error::Http)?;
        let id = def
            .create
            .id_path
            .as_deref()
            .and_then(|p| envelope::extract_string(&body, p));
        let operation_id = def
            .create
            .operation_path
            .as_deref()
            .and_then(|p| envelope::extract_string(&body, p));
        debug!(resource, ?id, ?operation_id, "created resource");
        Ok(CreateResult {
            id,
            operation_id,
            body,
        })
    }

    /// Delete a resource by id
    ///
    /// Whether a 404 counts as success follows the profile's
    /// `missing_ok` policy; it is a provider contract, not a universal
    /// rule.
    pub async fn delete(&self, resource: &str, id: &str) -> Result<()> {
        let def = self.profile.resource(resource)?;
        let path = def.delete_path_for(id);
        let request = self.base_request();

        let response = self
            .http
            .request(def.delete.method.into(), &path, request)
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if def.delete.missing_ok {
                debug!(resource, id, "delete of absent resource treated as success");
                return Ok(());
            }
            return Err(Error::not_found(format!("{resource} {id}")));
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }
        Ok(())
    }

    /// Poll a resource's status field until it reaches one of `wanted`
    ///
    /// Uses the resource's `status_path` and `poll` tuning. An absent
    /// resource reads as state `ABSENT`, which is terminal only when
    /// listed in `wanted` (the usual way to wait out a delete).
    pub async fn wait_for_state(
        &self,
        resource: &str,
        id: &str,
        wanted: &[&str],
    ) -> Result<String> {
        let def = self.profile.resource(resource)?;
        let status_path = def.status_path.clone().ok_or_else(|| {
            Error::config(format!("resource '{resource}' declares no status_path"))
        })?;
        let poll_def = def.poll.clone();
        let wanted_display = wanted.join("|");

        poll::wait_until(&poll_def, &wanted_display, || {
            let status_path = status_path.clone();
            async move {
                let record = self.get(resource, id).await?;
                let state = match &record {
                    Some(body) => envelope::extract_string(body, &status_path)
                        .ok_or_else(|| {
                            Error::decode(format!(
                                "no status at '{status_path}' for {resource}/{id}"
                            ))
                        })?,
                    None => "ABSENT".to_string(),
                };
                if wanted.contains(&state.as_str()) {
                    Ok(Probe::Terminal(state))
                } else {
                    Ok(Probe::Pending(state))
                }
            }
        })
        .await
    }

    fn base_request(&self) -> RequestConfig {
        let mut request = RequestConfig::new();
        for (key, value) in &self.profile.request_defaults.params {
            request = request.query(key, value);
        }
        request
    }
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderClient")
            .field("provider", &self.profile.metadata.name)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Page fetching
// ============================================================================

/// One-page fetcher for a resource's list endpoint
struct ListFetcher<T> {
    http: Arc<HttpClient>,
    resource: ResourceDef,
    base_params: Vec<(String, String)>,
    _item: PhantomData<fn() -> T>,
}

#[async_trait]
impl<T> PageFetcher<T> for ListFetcher<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    async fn fetch_page(&self, marker: Option<&Marker>) -> Result<Page<T>> {
        let mut request = RequestConfig::new();
        for (key, value) in &self.base_params {
            request = request.query(key, value);
        }
        match &self.resource.pagination {
            PaginationDef::None => {}
            PaginationDef::Count {
                page_param,
                size_param,
                page_size,
                ..
            } => {
                let page = marker.and_then(Marker::page_number).unwrap_or(1);
                request = request
                    .query(page_param, page.to_string())
                    .query(size_param, page_size.to_string());
            }
            PaginationDef::Token { marker_param, .. } => {
                if let Some(marker) = marker {
                    request = request.query(marker_param, marker.as_query_value());
                }
            }
        }

        let response = self
            .http
            .get_with_config(&self.resource.path, request)
            .await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(resource = %self.resource.name, "list returned 404, treating as empty");
            return Ok(Page::empty());
        }
        if !status.is_success() {
            return Err(response_error(response).await);
        }

        let headers = response.headers().clone();
        let body: JsonValue = response.json().await.map_err(Error::Http)?;
        let raw_items = envelope::extract_items(&body, self.resource.envelope.as_deref());
        let next = next_marker(
            &self.resource.pagination,
            &body,
            &headers,
            raw_items.len(),
            marker,
        );

        let mut items = Vec::with_capacity(raw_items.len());
        for raw in raw_items {
            items.push(serde_json::from_value(raw).map_err(|e| {
                Error::decode(format!("list record for '{}': {e}", self.resource.name))
            })?);
        }
        Ok(Page::new(items, next))
    }
}

/// Compute the next marker from a list response
fn next_marker(
    pagination: &PaginationDef,
    body: &JsonValue,
    headers: &reqwest::header::HeaderMap,
    items_len: usize,
    requested: Option<&Marker>,
) -> Option<Marker> {
    match pagination {
        PaginationDef::None => None,
        PaginationDef::Count {
            page_size,
            number_path,
            size_path,
            total_path,
            total_header,
            ..
        } => {
            let page_number = number_path
                .as_deref()
                .and_then(|p| envelope::extract_u64(body, p))
                .map(|n| n as u32)
                .or_else(|| requested.and_then(Marker::page_number))
                .unwrap_or(1);
            let size = size_path
                .as_deref()
                .and_then(|p| envelope::extract_u64(body, p))
                .map_or(*page_size, |n| n as u32);
            let total = total_path
                .as_deref()
                .and_then(|p| envelope::extract_u64(body, p))
                .or_else(|| {
                    total_header
                        .as_deref()
                        .and_then(|h| envelope::header_u64(headers, h))
                })?;
            count_based_next(page_number, size, total)
        }
        PaginationDef::Token {
            marker_param,
            token_path,
        } => {
            // An empty page never has a continuation
            if items_len == 0 {
                return None;
            }
            let token = envelope::extract_string(body, token_path).none_if_empty()?;
            // Some providers hand back a full next-page URL instead of a
            // bare token; the marker is its `marker_param` query value
            if token.starts_with("http://") || token.starts_with("https://") {
                let next = url::Url::parse(&token).ok()?;
                let value = next
                    .query_pairs()
                    .find(|(key, _)| key == marker_param)
                    .map(|(_, value)| value.into_owned())?;
                return Some(Marker::Token(value));
            }
            Some(Marker::Token(token))
        }
    }
}
