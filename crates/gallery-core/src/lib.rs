//! Paged artwork catalog with cross-page row selection.
//!
//! # Overview
//!
//! The catalog is only available one page at a time. A user may still ask
//! for "the first N rows" to be selected; the crate selects what the visible
//! page offers and then walks forward through further pages in the
//! background until N rows are selected or the catalog runs out.
//!
//! # Architecture
//!
//! - [`catalog`] - HTTP client and wire types behind the [`PageSource`] trait
//! - [`fetcher`] - normalized, infallible page loads
//! - [`selection`] - the selection store and its generation token
//! - [`extender`] - the background page walk
//! - [`controller`] - navigation and event handling for a display layer
//! - [`projector`] - which visible rows are selected
//!
//! # Example
//!
//! ```no_run
//! use gallery_core::{
//!     CatalogClient, CatalogSettings, PageController, PageFetcher, SharedSelection,
//! };
//!
//! async fn select_forty() -> gallery_core::Result<()> {
//!     let settings = CatalogSettings::default();
//!     let fetcher = PageFetcher::new(CatalogClient::new(&settings)?);
//!     let mut controller =
//!         PageController::new(fetcher, SharedSelection::new(), settings.rows_per_page);
//!
//!     controller.on_page_change(0, settings.rows_per_page).await;
//!     controller.on_target_submitted(40);
//!     controller.wait_for_extension().await;
//!
//!     println!("{} rows selected", controller.frame().selected_count);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod extender;
pub mod fetcher;
pub mod model;
pub mod projector;
pub mod selection;

pub use catalog::{CatalogClient, PageSource};
pub use config::{CatalogSettings, load_settings};
pub use controller::{PageController, PageLoad};
pub use error::{CatalogError, Result};
pub use extender::{ExtensionOutcome, ExtensionReport, ExtensionRequest, extend};
pub use fetcher::{FetchedPage, PageFetcher};
pub use model::{ArtworkId, Item, Page, PaginationCursor, RenderFrame, SelectionPhase};
pub use projector::project;
pub use selection::{FillOutcome, SelectionStore, SharedSelection, parse_target};
