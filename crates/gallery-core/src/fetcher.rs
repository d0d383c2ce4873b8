//! Page fetcher - normalized, infallible page loads.
//!
//! Wraps a [`PageSource`] so that navigation and background extension never
//! see an error: any failure becomes an empty page with a zero total.

use crate::catalog::PageSource;
use crate::error::CatalogError;
use crate::model::Page;

/// Result of one page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// Normalized rows.
    pub page: Page,
    /// Total rows reported by the catalog (0 on failure).
    pub total_count: usize,
    /// User-facing reason when the load failed.
    pub notice: Option<&'static str>,
}

impl FetchedPage {
    fn failed(page_index: usize, page_size: usize, err: &CatalogError) -> Self {
        Self {
            page: Page::empty(page_index, page_size),
            total_count: 0,
            notice: Some(err.user_message()),
        }
    }

    /// Whether the load failed rather than returning rows or running past
    /// the end.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.notice.is_some()
    }
}

/// Fetches and normalizes catalog pages.
#[derive(Debug, Clone)]
pub struct PageFetcher<S> {
    source: S,
}

impl<S: PageSource> PageFetcher<S> {
    /// Wraps a page source.
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Fetches a one-based page.
    ///
    /// Never fails: invalid arguments, transport errors and parse errors all
    /// yield an empty page and a zero total, and are logged. The page number
    /// times the page size must fit in a `usize`.
    pub async fn fetch(&self, page_number: usize, page_size: usize) -> FetchedPage {
        let page_index = page_number.saturating_sub(1);

        // The row offset must be representable for the catalog to serve it.
        if page_number == 0 || page_size == 0 || page_number.checked_mul(page_size).is_none() {
            let err = CatalogError::InvalidRequest {
                page: page_number,
                size: page_size,
            };
            tracing::warn!("Rejected page request: {}", err);
            return FetchedPage::failed(page_index, page_size, &err);
        }

        match self.source.list_artworks(page_number, page_size).await {
            Ok(listing) => {
                let total_count = listing.pagination.total;
                let items = listing.into_items();
                tracing::debug!(
                    page = page_number,
                    rows = items.len(),
                    total = total_count,
                    "Fetched artworks page"
                );
                FetchedPage {
                    page: Page {
                        items,
                        page_index,
                        page_size,
                    },
                    total_count,
                    notice: None,
                }
            }
            Err(err) => {
                tracing::warn!(
                    page = page_number,
                    retryable = err.is_retryable(),
                    "Error fetching artworks: {}",
                    err
                );
                FetchedPage::failed(page_index, page_size, &err)
            }
        }
    }
}
