//! Catalog settings.
//!
//! Settings are stored as TOML in the platform-specific config folder:
//! - macOS: ~/Library/Application Support/com.artwork-gallery.Artwork Gallery/
//! - Windows: %APPDATA%/artwork-gallery/config/
//! - Linux: ~/.config/artwork-gallery/

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::Result;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "artwork-gallery";
const APP_NAME: &str = "Artwork Gallery";
const CONFIG_FILENAME: &str = "settings.toml";

/// Default listing endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.artic.edu/api/v1/artworks";

/// User agent string for catalog requests.
pub const DEFAULT_USER_AGENT: &str = concat!("artwork-gallery/", env!("CARGO_PKG_VERSION"));

/// Settings for catalog access and pagination defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Listing endpoint; `page` and `limit` are appended as query parameters.
    pub endpoint: String,
    /// Rows per page on startup.
    pub rows_per_page: usize,
    /// Page sizes offered by the display layer.
    pub rows_per_page_options: Vec<usize>,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            rows_per_page: 10,
            rows_per_page_options: vec![10, 25, 50],
            request_timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl CatalogSettings {
    /// Request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rows per page, never zero.
    #[must_use]
    pub fn effective_rows(&self) -> usize {
        self.rows_per_page.max(1)
    }

    /// Whether `rows` is one of the offered page sizes.
    ///
    /// An empty option list accepts any positive size.
    #[must_use]
    pub fn accepts_rows(&self, rows: usize) -> bool {
        rows > 0
            && (self.rows_per_page_options.is_empty()
                || self.rows_per_page_options.contains(&rows))
    }

    /// Parse settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read settings from an explicit file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Get the path to the default settings file.
///
/// Returns `None` if the platform-specific directory cannot be determined.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from the default location when `None`.
///
/// Falls back to defaults when the file is missing, unreadable or invalid.
pub fn load_settings(path: Option<&Path>) -> CatalogSettings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return CatalogSettings::default();
            }
        },
    };

    if !path.exists() {
        tracing::info!("No settings file found at {:?}, using defaults", path);
        return CatalogSettings::default();
    }

    match CatalogSettings::from_file(&path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            tracing::warn!("Failed to load settings file: {}, using defaults", e);
            CatalogSettings::default()
        }
    }
}
