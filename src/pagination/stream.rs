//! Lazy concatenation over successive pages

use super::types::{Marker, Page, PageFetcher};
use crate::error::Result;
use futures::stream::{self, Stream, TryStreamExt};
use std::sync::Arc;
use tracing::debug;

/// A pageable listing handle: the first page plus the means to fetch more
///
/// Callers wanting manual pagination read `first_page()` and drive
/// `next_page()` themselves; callers wanting everything call `concat()`
/// or `collect()`. A fresh `list()` call is required to restart from
/// page 1.
pub struct Pages<T> {
    first: Page<T>,
    fetcher: Arc<dyn PageFetcher<T>>,
}

impl<T: Send + 'static> Pages<T> {
    /// Create a handle from an already-fetched first page and its fetcher
    pub fn new(first: Page<T>, fetcher: Arc<dyn PageFetcher<T>>) -> Self {
        Self { first, fetcher }
    }

    /// The first page, without triggering further requests
    pub fn first_page(&self) -> &Page<T> {
        &self.first
    }

    /// Fetch one specific page by marker (manual pagination control)
    pub async fn next_page(&self, marker: &Marker) -> Result<Page<T>> {
        self.fetcher.fetch_page(Some(marker)).await
    }

    /// Lazily concatenate all pages into one stream of items
    ///
    /// Items are yielded in page-fetch order, then in-page order. Page
    /// *k+1* is requested only when page *k* is exhausted; stopping early
    /// issues no further requests. A failed fetch surfaces as the
    /// stream's next element; items already yielded stand.
    pub fn concat(self) -> impl Stream<Item = Result<T>> + Send {
        struct Walk<T> {
            items: std::vec::IntoIter<T>,
            next_marker: Option<Marker>,
            fetcher: Arc<dyn PageFetcher<T>>,
            pages_fetched: usize,
        }

        let (items, next_marker) = self.first.into_parts();
        let walk = Walk {
            items: items.into_iter(),
            next_marker,
            fetcher: self.fetcher,
            pages_fetched: 1,
        };

        stream::try_unfold(walk, |mut walk| async move {
            loop {
                if let Some(item) = walk.items.next() {
                    return Ok(Some((item, walk)));
                }
                let Some(marker) = walk.next_marker.take() else {
                    debug!(pages = walk.pages_fetched, "pagination exhausted");
                    return Ok(None);
                };
                let page = walk.fetcher.fetch_page(Some(&marker)).await?;
                walk.pages_fetched += 1;
                debug!(
                    page = walk.pages_fetched,
                    items = page.len(),
                    "fetched next page"
                );
                let (items, next_marker) = page.into_parts();
                walk.items = items.into_iter();
                walk.next_marker = next_marker;
            }
        })
    }

    /// Drain `concat()` into a vector
    pub async fn collect(self) -> Result<Vec<T>> {
        self.concat().try_collect().await
    }
}

impl<T> std::fmt::Debug for Pages<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pages")
            .field("first_page_len", &self.first.len())
            .field("next_marker", &self.first.next_marker())
            .finish_non_exhaustive()
    }
}
