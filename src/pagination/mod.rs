//! Pagination module
//!
//! The one mechanism every provider shares: list endpoints return one
//! page at a time, keyed by a marker (a page number or an opaque token),
//! and callers want either a single page or a lazy walk over all of them.
//!
//! # Overview
//!
//! - [`Page`] wraps one fetched page: ordered items plus the next marker.
//! - [`Marker`] is the provider cursor, never reused for a page already
//!   returned.
//! - [`PageFetcher`] issues one idempotent GET for a given marker.
//! - [`Pages`] is the lazy handle: `first_page()` for manual pagination,
//!   `concat()` for a pull-based stream spanning all pages. Page *k+1*
//!   is fetched only once page *k* is exhausted, so memory is bounded to
//!   one page and abandoned iteration issues no further requests.

mod stream;
mod types;

pub use stream::Pages;
pub use types::{count_based_next, Marker, Page, PageFetcher};
