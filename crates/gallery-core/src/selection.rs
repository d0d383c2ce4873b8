//! Selection store - the selected identifiers and the outstanding target.
//!
//! # Ordering
//!
//! Identifiers are kept in insertion order. When a smaller target truncates
//! the selection, the oldest selections survive. Re-selecting an id that is
//! already selected does not move it.
//!
//! # Generations
//!
//! Every explicit target request and every navigation-triggered fill bumps
//! [`SelectionStore::generation`]. Background extension runs capture the
//! generation they were started with and may only write while it is still
//! current; a newer fill therefore cancels any older run.

use std::sync::{Arc, Mutex, PoisonError};

use indexmap::IndexSet;

use crate::model::{ArtworkId, Item, SelectionPhase};

/// What a target request or navigation fill left to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Input was not a positive target; nothing changed.
    Rejected,
    /// No fill was needed (no target, or target already met).
    Unchanged,
    /// The target is met.
    Satisfied,
    /// More rows are needed than the visible page could supply.
    NeedsExtension {
        /// Generation the extension run must carry.
        generation: u64,
        /// Rows still missing.
        remaining: usize,
    },
}

/// Parses raw target input from a numeric entry control.
///
/// Returns `None` for anything that is not a positive integer.
#[must_use]
pub fn parse_target(input: &str) -> Option<usize> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

/// Selected identifiers plus the user's target size.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    selected: IndexSet<ArtworkId>,
    target_size: usize,
    generation: u64,
    phase: SelectionPhase,
}

impl SelectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of selected rows across all pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Whether `id` is selected.
    #[must_use]
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected identifiers in insertion order.
    #[must_use]
    pub fn ids(&self) -> &IndexSet<ArtworkId> {
        &self.selected
    }

    /// Copy of the selected identifiers.
    #[must_use]
    pub fn snapshot(&self) -> IndexSet<ArtworkId> {
        self.selected.clone()
    }

    /// Last requested target (0 when none).
    #[must_use]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Current generation token.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Lifecycle of the current target.
    #[must_use]
    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    /// Rows still missing to reach the target.
    #[must_use]
    pub fn shortfall(&self) -> usize {
        self.target_size.saturating_sub(self.selected.len())
    }

    /// Reconciles a "now selected" list against the visible page.
    ///
    /// Visible rows present in `newly_selected` are added, visible rows
    /// absent from it are removed. Rows on other pages are left alone, and
    /// the target size is not adjusted.
    pub fn toggle_manual(&mut self, visible: &[Item], newly_selected: &[Item]) {
        let mut added = 0usize;
        let mut removed = 0usize;

        for item in visible {
            let wanted = newly_selected.iter().any(|s| s.id == item.id);
            if wanted {
                if self.selected.insert(item.id) {
                    added += 1;
                }
            } else if self.selected.shift_remove(&item.id) {
                removed += 1;
            }
        }

        tracing::debug!(
            added,
            removed,
            selected = self.selected.len(),
            "Applied manual selection"
        );
    }

    /// Sets a new target and reconciles against the visible page.
    ///
    /// A zero target is rejected without touching state.
    pub fn set_target(&mut self, target: usize, visible: &[Item]) -> FillOutcome {
        if target == 0 {
            tracing::debug!("Ignoring non-positive selection target");
            return FillOutcome::Rejected;
        }

        self.target_size = target;
        self.generation += 1;
        self.phase = SelectionPhase::Filling;

        tracing::info!(
            target,
            selected = self.selected.len(),
            generation = self.generation,
            "Selection target set"
        );

        match target.cmp(&self.selected.len()) {
            std::cmp::Ordering::Greater => self.fill_from_visible(visible),
            std::cmp::Ordering::Less => {
                self.selected.truncate(target);
                self.phase = SelectionPhase::Satisfied;
                FillOutcome::Satisfied
            }
            std::cmp::Ordering::Equal => {
                self.phase = SelectionPhase::Satisfied;
                FillOutcome::Satisfied
            }
        }
    }

    /// Continues an outstanding target from a freshly loaded page.
    ///
    /// Does nothing unless a target is set and not yet met.
    pub fn refill_from_visible(&mut self, visible: &[Item]) -> FillOutcome {
        if self.target_size == 0 || self.shortfall() == 0 {
            return FillOutcome::Unchanged;
        }

        self.generation += 1;
        self.phase = SelectionPhase::Filling;

        tracing::debug!(
            target = self.target_size,
            selected = self.selected.len(),
            generation = self.generation,
            "Refilling selection from loaded page"
        );

        self.fill_from_visible(visible)
    }

    fn fill_from_visible(&mut self, visible: &[Item]) -> FillOutcome {
        let wanted = self.shortfall();
        self.take_new(visible.iter().map(|item| item.id), wanted);

        let remaining = self.shortfall();
        if remaining == 0 {
            self.phase = SelectionPhase::Satisfied;
            FillOutcome::Satisfied
        } else {
            self.phase = SelectionPhase::Extending;
            FillOutcome::NeedsExtension {
                generation: self.generation,
                remaining,
            }
        }
    }

    /// Merges rows harvested by an extension run.
    ///
    /// Takes up to `limit` not-yet-selected ids in order. Returns `None`
    /// without touching state when `generation` is stale.
    pub fn merge_extension(
        &mut self,
        generation: u64,
        ids: impl IntoIterator<Item = ArtworkId>,
        limit: usize,
    ) -> Option<usize> {
        if generation != self.generation {
            return None;
        }
        Some(self.take_new(ids, limit))
    }

    /// Records how an extension run ended, if it is still current.
    pub fn finish_extension(&mut self, generation: u64, phase: SelectionPhase) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = phase;
        true
    }

    fn take_new(&mut self, ids: impl IntoIterator<Item = ArtworkId>, limit: usize) -> usize {
        let mut added = 0;
        for id in ids {
            if added >= limit {
                break;
            }
            if self.selected.insert(id) {
                added += 1;
            }
        }
        added
    }
}

/// A selection store shared between the controller and extension runs.
///
/// Every access goes through [`SharedSelection::with`], so a read and the
/// write that depends on it happen under one lock with no await in between.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionStore>>,
}

impl SharedSelection {
    /// Wraps a fresh, empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut SelectionStore) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Copy of the selected identifiers.
    #[must_use]
    pub fn snapshot(&self) -> IndexSet<ArtworkId> {
        self.with(|store| store.snapshot())
    }
}
