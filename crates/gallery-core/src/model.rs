//! Domain types shared by the fetcher, the selection store and the controller.

/// Stable catalog identifier of an artwork.
pub type ArtworkId = u64;

/// Title used when the catalog has none.
pub const UNTITLED: &str = "Untitled";
/// Origin used when the catalog has none.
pub const UNKNOWN_ORIGIN: &str = "Unknown";
/// Attribution used when the catalog has none.
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
/// Inscription note used when the catalog has none.
pub const NO_INSCRIPTIONS: &str = "No inscriptions";

/// A normalized artwork row.
///
/// Every text field is always populated; see [`crate::catalog::types`] for
/// the defaults applied to absent source fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Catalog identifier, unique and stable across fetches.
    pub id: ArtworkId,
    /// Artwork title.
    pub title: String,
    /// Place of origin.
    pub origin_label: String,
    /// Artist attribution line.
    pub attribution_label: String,
    /// Inscriptions on the work.
    pub note: String,
    /// First year of the creation range (0 when unknown).
    pub range_start: i32,
    /// Last year of the creation range (0 when unknown).
    pub range_end: i32,
}

/// One page of items as returned by the fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Items in display order.
    pub items: Vec<Item>,
    /// Zero-based page index.
    pub page_index: usize,
    /// Requested page size.
    pub page_size: usize,
}

impl Page {
    /// An empty page, used when a fetch fails or runs past the end.
    #[must_use]
    pub fn empty(page_index: usize, page_size: usize) -> Self {
        Self {
            items: Vec::new(),
            page_index,
            page_size,
        }
    }

    /// Whether the page carries no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identifiers in display order.
    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.items.iter().map(|item| item.id)
    }
}

/// Current pagination position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationCursor {
    /// Zero-based page index.
    pub page: usize,
    /// Rows per page.
    pub rows: usize,
    /// Offset of the first row on the page.
    pub first: usize,
}

impl PaginationCursor {
    /// Cursor positioned at `page` with `rows` rows per page.
    ///
    /// `first` saturates at `usize::MAX` for page indices far past any
    /// real catalog.
    #[must_use]
    pub fn new(page: usize, rows: usize) -> Self {
        Self {
            page,
            rows,
            first: page.saturating_mul(rows),
        }
    }

    /// One-based page number, as the catalog API expects it.
    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page.saturating_add(1)
    }

    /// Number of pages needed for `total` rows.
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        if self.rows == 0 {
            0
        } else {
            total.div_ceil(self.rows)
        }
    }
}

impl Default for PaginationCursor {
    fn default() -> Self {
        Self::new(0, 10)
    }
}

/// Lifecycle of a single target selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    /// No target has been requested yet.
    #[default]
    Idle,
    /// Taking rows from the visible page.
    Filling,
    /// Fetching further pages in the background.
    Extending,
    /// The store holds at least the target number of rows.
    Satisfied,
    /// The catalog ran out of rows before the target was reached.
    Exhausted,
}

impl SelectionPhase {
    /// Human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Filling => "Filling",
            Self::Extending => "Extending",
            Self::Satisfied => "Satisfied",
            Self::Exhausted => "Exhausted",
        }
    }
}

impl std::fmt::Display for SelectionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Everything a display layer needs to draw one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFrame {
    /// Rows on the current page.
    pub items: Vec<Item>,
    /// Total rows reported by the catalog.
    pub total_count: usize,
    /// Whether a page load is in flight.
    pub loading: bool,
    /// Why the last page load came back empty, if it failed.
    pub notice: Option<&'static str>,
    /// Current pagination position.
    pub cursor: PaginationCursor,
    /// Visible rows that are selected, in display order.
    pub selected_on_page: Vec<Item>,
    /// Size of the whole selection across all pages.
    pub selected_count: usize,
    /// Outstanding target size (0 when none was requested).
    pub target_size: usize,
    /// Lifecycle of the current target.
    pub phase: SelectionPhase,
}
