//! Visible-selection projection.

use indexmap::IndexSet;

use crate::model::{ArtworkId, Item};

/// Visible rows whose id is selected, in display order.
#[must_use]
pub fn project(visible: &[Item], selected: &IndexSet<ArtworkId>) -> Vec<Item> {
    visible
        .iter()
        .filter(|item| selected.contains(&item.id))
        .cloned()
        .collect()
}
