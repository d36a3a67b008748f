//! Pagination types and traits

use crate::error::Result;
use async_trait::async_trait;

/// A provider pagination cursor
///
/// Two encodings appear in the wild: a monotonically increasing page
/// number, and an opaque string token handed back by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Marker {
    /// Page-number cursor (1-based on every supported provider)
    Page(u32),
    /// Opaque token cursor, passed through verbatim
    Token(String),
}

impl Marker {
    /// Create a page-number marker
    pub fn page(number: u32) -> Self {
        Self::Page(number)
    }

    /// Create a token marker
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// Render the marker as a query-parameter value
    pub fn as_query_value(&self) -> String {
        match self {
            Self::Page(n) => n.to_string(),
            Self::Token(t) => t.clone(),
        }
    }

    /// The page number, if this is a page-number marker
    pub fn page_number(&self) -> Option<u32> {
        match self {
            Self::Page(n) => Some(*n),
            Self::Token(_) => None,
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_query_value())
    }
}

/// One fetched page of results
///
/// Items keep the provider response order. The next marker is absent when
/// this is the last page.
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    next_marker: Option<Marker>,
}

impl<T> Page<T> {
    /// Create a page from items and an optional next marker
    pub fn new(items: Vec<T>, next_marker: Option<Marker>) -> Self {
        Self { items, next_marker }
    }

    /// An empty terminal page (the 404-as-empty list convention)
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_marker: None,
        }
    }

    /// The items of this page, in response order
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, yielding its items
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// The marker for the following page, absent on the last page
    pub fn next_marker(&self) -> Option<&Marker> {
        self.next_marker.as_ref()
    }

    /// Whether a further page exists
    pub fn has_next(&self) -> bool {
        self.next_marker.is_some()
    }

    /// Number of items on this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether this page holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Split the page into items and next marker
    pub fn into_parts(self) -> (Vec<T>, Option<Marker>) {
        (self.items, self.next_marker)
    }

    /// Map the item type, keeping the marker
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            next_marker: self.next_marker,
        }
    }
}

/// Compute the next marker under the count-based rule
///
/// A further page exists iff `page_number * page_size < total_count`.
/// With `total_count < page_size` there is exactly one page, so the
/// marker is absent even on page 1.
pub fn count_based_next(page_number: u32, page_size: u32, total_count: u64) -> Option<Marker> {
    if page_size == 0 {
        return None;
    }
    if u64::from(page_number) * u64::from(page_size) < total_count {
        Some(Marker::Page(page_number + 1))
    } else {
        None
    }
}

/// Fetches one page of results for a given marker
///
/// `None` requests the first page. Implementations issue exactly one
/// idempotent GET; a 404 on the list endpoint yields `Page::empty()`
/// rather than an error.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    /// Fetch the page identified by `marker` (or the first page)
    async fn fetch_page(&self, marker: Option<&Marker>) -> Result<Page<T>>;
}
