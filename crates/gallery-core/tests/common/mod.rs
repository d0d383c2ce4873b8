//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use gallery_core::catalog::{ApiArtwork, ApiPagination, ArtworkListing, PageSource};
use gallery_core::{ArtworkId, CatalogError, Item, PageController, PageFetcher, SharedSelection};
use tokio::sync::Semaphore;

/// In-memory catalog with ids `1..=size`.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<Inner>,
}

struct Inner {
    records: Vec<ApiArtwork>,
    requests: Mutex<Vec<usize>>,
    failing: HashSet<usize>,
    failure: fn() -> CatalogError,
    gate_from: Option<usize>,
    gate: Semaphore,
}

impl MemoryCatalog {
    pub fn new(size: u64) -> Self {
        Self::build(size, HashSet::new(), network_error, None)
    }

    /// Catalog whose listed one-based pages fail with a network error.
    pub fn failing_on(size: u64, pages: &[usize]) -> Self {
        Self::failing_with(size, pages, network_error)
    }

    /// Catalog whose listed one-based pages fail with `failure()`.
    pub fn failing_with(size: u64, pages: &[usize], failure: fn() -> CatalogError) -> Self {
        Self::build(size, pages.iter().copied().collect(), failure, None)
    }

    /// Catalog where requests for one-based pages `>= from` wait for
    /// [`MemoryCatalog::release`].
    pub fn gated_from(size: u64, from: usize) -> Self {
        Self::build(size, HashSet::new(), network_error, Some(from))
    }

    fn build(
        size: u64,
        failing: HashSet<usize>,
        failure: fn() -> CatalogError,
        gate_from: Option<usize>,
    ) -> Self {
        let records = (1..=size)
            .map(|id| ApiArtwork {
                id,
                title: Some(format!("Artwork {id}")),
                place_of_origin: None,
                artist_display: Some(format!("Artist {id}")),
                inscriptions: None,
                date_start: Some(1900),
                date_end: Some(1901),
            })
            .collect();

        Self {
            inner: Arc::new(Inner {
                records,
                requests: Mutex::new(Vec::new()),
                failing,
                failure,
                gate_from,
                gate: Semaphore::new(0),
            }),
        }
    }

    /// One-based page numbers requested so far, in order.
    pub fn requests(&self) -> Vec<usize> {
        self.inner.requests.lock().unwrap().clone()
    }

    /// Lets `n` gated requests through.
    pub fn release(&self, n: usize) {
        self.inner.gate.add_permits(n);
    }
}

impl PageSource for MemoryCatalog {
    async fn list_artworks(&self, page: usize, limit: usize) -> gallery_core::Result<ArtworkListing> {
        self.inner.requests.lock().unwrap().push(page);

        if self.inner.gate_from.is_some_and(|from| page >= from) {
            self.inner.gate.acquire().await.unwrap().forget();
        }

        if self.inner.failing.contains(&page) {
            return Err((self.inner.failure)());
        }

        let start = (page - 1).saturating_mul(limit);
        let data = self
            .inner
            .records
            .iter()
            .skip(start)
            .take(limit)
            .cloned()
            .collect();

        Ok(ArtworkListing {
            data,
            pagination: ApiPagination {
                total: self.inner.records.len(),
            },
        })
    }
}

pub fn network_error() -> CatalogError {
    CatalogError::Network("connection reset".to_string())
}

pub fn malformed_body() -> CatalogError {
    CatalogError::JsonParse("expected value at line 1 column 1".to_string())
}

pub fn server_error() -> CatalogError {
    CatalogError::Status {
        status: 502,
        body: "Bad Gateway".to_string(),
    }
}

pub fn controller(catalog: &MemoryCatalog, rows: usize) -> PageController<MemoryCatalog> {
    PageController::new(PageFetcher::new(catalog.clone()), SharedSelection::new(), rows)
}

pub fn ids(items: &[Item]) -> Vec<ArtworkId> {
    items.iter().map(|item| item.id).collect()
}

pub fn selected(controller: &PageController<MemoryCatalog>) -> Vec<ArtworkId> {
    controller.selection().snapshot().into_iter().collect()
}

/// Yields until the catalog has seen a request for `page`.
pub async fn wait_for_request(catalog: &MemoryCatalog, page: usize) {
    for _ in 0..1000 {
        if catalog.requests().contains(&page) {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("page {page} was never requested");
}
