//! Page controller - navigation, page loads and extension scheduling.
//!
//! The controller receives the three inbound display events
//! (`on_page_change`, `on_selection_toggled`, `on_target_submitted`) and
//! produces a [`RenderFrame`] on request. Extension runs are spawned on the
//! tokio runtime, so the event handlers must be called from within one.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::catalog::PageSource;
use crate::extender::{self, ExtensionReport, ExtensionRequest};
use crate::fetcher::{FetchedPage, PageFetcher};
use crate::model::{Item, PaginationCursor, RenderFrame};
use crate::projector::project;
use crate::selection::{FillOutcome, SharedSelection};

/// Owns the pagination cursor and the rows of the visible page.
#[derive(Debug)]
pub struct PageController<S> {
    fetcher: Arc<PageFetcher<S>>,
    selection: SharedSelection,
    cursor: PaginationCursor,
    items: Vec<Item>,
    total_count: usize,
    loading: bool,
    notice: Option<&'static str>,
    extension: Option<JoinHandle<ExtensionReport>>,
}

/// A page request started by [`PageController::begin_page_change`].
#[derive(Debug)]
pub struct PageLoad<S> {
    fetcher: Arc<PageFetcher<S>>,
    cursor: PaginationCursor,
}

impl<S: PageSource> PageLoad<S> {
    /// Position being loaded.
    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    /// Fetches the page. Never fails; see [`PageFetcher::fetch`].
    pub async fn run(self) -> FetchedPage {
        self.fetcher
            .fetch(self.cursor.page_number(), self.cursor.rows)
            .await
    }
}

impl<S: PageSource + 'static> PageController<S> {
    /// Creates a controller positioned at page 0. Nothing is loaded yet.
    pub fn new(fetcher: PageFetcher<S>, selection: SharedSelection, rows: usize) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            selection,
            cursor: PaginationCursor::new(0, rows.max(1)),
            items: Vec::new(),
            total_count: 0,
            loading: false,
            notice: None,
            extension: None,
        }
    }

    /// Current pagination position.
    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    /// Rows of the visible page.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Total rows reported by the last page load.
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// The injected selection store.
    pub fn selection(&self) -> &SharedSelection {
        &self.selection
    }

    /// Whether a page load is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether an extension run is still in flight.
    pub fn is_extending(&self) -> bool {
        self.extension
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Handles a page-change event and loads that page.
    ///
    /// After the load, an outstanding target is continued from the new page
    /// and the pages after it. A zero `rows` is ignored.
    pub async fn on_page_change(&mut self, page: usize, rows: usize) {
        if let Some(load) = self.begin_page_change(page, rows) {
            let fetched = load.run().await;
            self.finish_page_change(fetched);
        }
    }

    /// First half of a page change: moves the cursor and marks the frame as
    /// loading.
    ///
    /// The returned [`PageLoad`] is run by the caller, which may draw
    /// frames meanwhile, and its result handed to
    /// [`PageController::finish_page_change`]. Returns `None` for zero
    /// `rows`.
    pub fn begin_page_change(&mut self, page: usize, rows: usize) -> Option<PageLoad<S>> {
        if rows == 0 {
            tracing::warn!(page, "Ignoring page change with zero rows per page");
            return None;
        }

        self.cursor = PaginationCursor::new(page, rows);
        self.items.clear();
        self.notice = None;
        self.loading = true;

        Some(PageLoad {
            fetcher: Arc::clone(&self.fetcher),
            cursor: self.cursor,
        })
    }

    /// Second half of a page change: publishes the rows and continues any
    /// outstanding target.
    ///
    /// A page that no longer matches the cursor is dropped and `false` is
    /// returned.
    pub fn finish_page_change(&mut self, fetched: FetchedPage) -> bool {
        let PaginationCursor { page, rows, .. } = self.cursor;
        // The fetcher derives its index from the saturated page number.
        let expected = self.cursor.page_number().saturating_sub(1);
        if (fetched.page.page_index, fetched.page.page_size) != (expected, rows) {
            tracing::debug!(
                stale_page = fetched.page.page_index,
                page,
                "Discarding page load for an earlier position"
            );
            return false;
        }

        self.loading = false;
        self.items = fetched.page.items;
        self.total_count = fetched.total_count;
        self.notice = fetched.notice;

        tracing::debug!(
            page,
            rows,
            loaded = self.items.len(),
            total = self.total_count,
            "Page loaded"
        );

        let outcome = self
            .selection
            .with(|store| store.refill_from_visible(&self.items));
        self.schedule(outcome);
        true
    }

    /// Reloads the current page.
    pub async fn reload(&mut self) {
        let PaginationCursor { page, rows, .. } = self.cursor;
        self.on_page_change(page, rows).await;
    }

    /// Handles the display layer's "now selected" list for the visible page.
    pub fn on_selection_toggled(&mut self, newly_selected: &[Item]) {
        self.selection
            .with(|store| store.toggle_manual(&self.items, newly_selected));
    }

    /// Handles a submitted target. Zero is rejected without a state change.
    ///
    /// Text input goes through [`crate::selection::parse_target`] first.
    pub fn on_target_submitted(&mut self, target: usize) -> FillOutcome {
        let outcome = self
            .selection
            .with(|store| store.set_target(target, &self.items));
        self.schedule(outcome);
        outcome
    }

    /// Waits for the current extension run, if any.
    pub async fn wait_for_extension(&mut self) -> Option<ExtensionReport> {
        let handle = self.extension.take()?;
        match handle.await {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::error!("Extension task failed: {}", e);
                None
            }
        }
    }

    /// Snapshot of everything the display layer draws.
    pub fn frame(&self) -> RenderFrame {
        let (selected_on_page, selected_count, target_size, phase) =
            self.selection.with(|store| {
                (
                    project(&self.items, store.ids()),
                    store.len(),
                    store.target_size(),
                    store.phase(),
                )
            });

        RenderFrame {
            items: self.items.clone(),
            total_count: self.total_count,
            loading: self.loading,
            notice: self.notice,
            cursor: self.cursor,
            selected_on_page,
            selected_count,
            target_size,
            phase,
        }
    }

    /// Starts an extension run from the page after the current one.
    ///
    /// Any older run keeps going until its next merge, where its stale
    /// generation makes it stop.
    fn schedule(&mut self, outcome: FillOutcome) {
        let FillOutcome::NeedsExtension {
            generation,
            remaining,
        } = outcome
        else {
            return;
        };

        let request = ExtensionRequest {
            start_page: self.cursor.page.saturating_add(1),
            page_size: self.cursor.rows,
            remaining,
            generation,
        };
        let fetcher = Arc::clone(&self.fetcher);
        let selection = self.selection.clone();
        let span = tracing::info_span!("extension", generation);

        self.extension = Some(tokio::spawn(
            async move { extender::extend(&fetcher, &selection, request).await }.instrument(span),
        ));
    }
}
