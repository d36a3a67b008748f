//! HTTP transport
//!
//! A thin reqwest wrapper handling the transport-level concerns the
//! resource layer should not see: bounded retry with backoff for 5xx,
//! 429 and connection failures, request timeouts, default headers, and
//! base-URL resolution.
//!
//! Status-code conventions (404-as-empty, 409-as-already-exists) are a
//! provider-contract concern and live in [`crate::resource`]; this layer
//! returns the final response for any non-retryable status.

mod client;

pub use client::{response_error, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
