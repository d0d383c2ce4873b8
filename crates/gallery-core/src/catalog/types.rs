//! Catalog API wire types.

use serde::Deserialize;

use crate::model::{
    ArtworkId, Item, NO_INSCRIPTIONS, UNKNOWN_ARTIST, UNKNOWN_ORIGIN, UNTITLED,
};

/// Raw listing response from the catalog API.
#[derive(Debug, Clone, Deserialize)]
pub struct ArtworkListing {
    /// Records on the requested page.
    pub data: Vec<ApiArtwork>,

    /// Pagination block; only the total is consumed.
    #[serde(default)]
    pub pagination: ApiPagination,
}

impl ArtworkListing {
    /// Normalizes every record into an [`Item`].
    #[must_use]
    pub fn into_items(self) -> Vec<Item> {
        self.data.into_iter().map(ApiArtwork::into_item).collect()
    }
}

/// Pagination metadata from the catalog API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiPagination {
    /// Total number of records in the catalog.
    #[serde(default)]
    pub total: usize,
}

/// Raw artwork record from the catalog API.
///
/// Every field except `id` may be absent or `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiArtwork {
    /// Catalog identifier.
    pub id: ArtworkId,
    /// Artwork title.
    #[serde(default)]
    pub title: Option<String>,
    /// Place of origin.
    #[serde(default)]
    pub place_of_origin: Option<String>,
    /// Multi-line artist attribution.
    #[serde(default)]
    pub artist_display: Option<String>,
    /// Inscriptions text.
    #[serde(default)]
    pub inscriptions: Option<String>,
    /// First year of the creation range.
    #[serde(default)]
    pub date_start: Option<i32>,
    /// Last year of the creation range.
    #[serde(default)]
    pub date_end: Option<i32>,
}

impl ApiArtwork {
    /// Converts the record into a display item, filling in defaults.
    ///
    /// Empty strings count as missing.
    #[must_use]
    pub fn into_item(self) -> Item {
        Item {
            id: self.id,
            title: or_default(self.title, UNTITLED),
            origin_label: or_default(self.place_of_origin, UNKNOWN_ORIGIN),
            attribution_label: or_default(self.artist_display, UNKNOWN_ARTIST),
            note: or_default(self.inscriptions, NO_INSCRIPTIONS),
            range_start: self.date_start.unwrap_or(0),
            range_end: self.date_end.unwrap_or(0),
        }
    }
}

fn or_default(value: Option<String>, fallback: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}
