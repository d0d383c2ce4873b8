//! Remote catalog access.
//!
//! [`PageSource`] is the seam between the selection core and the network:
//! the HTTP [`CatalogClient`] implements it for production, tests plug in
//! an in-memory catalog.

pub mod client;
pub mod types;

use std::future::Future;

pub use client::CatalogClient;
pub use types::{ApiArtwork, ApiPagination, ArtworkListing};

use crate::error::Result;

/// A paged artwork listing.
pub trait PageSource: Send + Sync {
    /// Lists one page of artworks. `page` is one-based.
    fn list_artworks(
        &self,
        page: usize,
        limit: usize,
    ) -> impl Future<Output = Result<ArtworkListing>> + Send;
}
