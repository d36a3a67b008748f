// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # stratus
//!
//! A Rust-native multi-cloud REST client toolkit. Provider APIs differ
//! in envelopes, markers and error conventions; the control flow is the
//! same everywhere. stratus implements that control flow once and lets
//! YAML provider profiles describe the differences.
//!
//! ## Features
//!
//! - **Unified pagination**: count-based (`PageNumber`/`TotalCount`
//!   arithmetic) and token-based markers behind one lazy, pull-based
//!   [`pagination::Pages`] handle
//! - **Provider profiles**: endpoint, auth, envelope, pagination and
//!   delete conventions declared in YAML, with built-ins embedded
//! - **Contract-aware errors**: 404-as-empty lists, 404-as-`None` gets,
//!   per-provider idempotent delete, 409-as-already-exists
//! - **Status polling**: fixed-interval, ceiling-bounded waits for
//!   asynchronous provider operations
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use stratus::catalog;
//! use stratus::resource::{ListOptions, ProviderClient};
//! use stratus::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let profile = catalog::load_builtin("digitalocean")?;
//!     let client = ProviderClient::new(profile)?;
//!
//!     // First page only
//!     let pages = client.list("droplets", ListOptions::new()).await?;
//!     println!("{} droplets on page 1", pages.first_page().len());
//!
//!     // Or walk every page lazily
//!     let all = client
//!         .list("droplets", ListOptions::new())
//!         .await?
//!         .collect()
//!         .await?;
//!     println!("{} droplets total", all.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ProviderClient                         │
//! │  list() → Pages    get() → Option    create()    delete()   │
//! └─────────────────────────────────────────────────────────────┘
//!                │
//! ┌──────────┬───┴───────┬───────────────┬───────────┬─────────┐
//! │   Auth   │   HTTP    │  Pagination   │ Envelope  │  Poll   │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────┤
//! │ API Key  │ GET/POST  │ Count marker  │ Dot paths │ Fixed   │
//! │ Bearer   │ Retry     │ Token marker  │ Headers   │ interval│
//! │ Basic    │ Backoff   │ Lazy concat   │ Metadata  │ Ceiling │
//! └──────────┴───────────┴───────────────┴───────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the toolkit
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication schemes
pub mod auth;

/// HTTP transport with bounded retry
pub mod http;

/// Response envelope handling
pub mod envelope;

/// Pages, markers and lazy concatenation
pub mod pagination;

/// Bounded status polling
pub mod poll;

/// Provider profile configuration and loading
pub mod config;

/// Built-in provider profiles
pub mod catalog;

/// Provider resource client
pub mod resource;

/// Typed domain records
pub mod domain;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{load_profile, load_profile_from_str, ProviderProfile};
pub use error::{Error, Result};
pub use pagination::{Marker, Page, PageFetcher, Pages};
pub use resource::{CreateOptions, CreateResult, ListOptions, ProviderClient};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
