//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//!
//! 1. **Environment variables**: `LISTINGS_PAGE_SIZE`, `LISTINGS_LOCALE`.
//! 2. **Data directory file**: `<data dir>/listings.toml`.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page_size` | `20` | Listings per result page |
//! | `locale` | `en` | Locale segment for new locations (`/en/listings`) |
//! | `listings_path` | `/listings` | Path of the listings page after the locale |
//! | `panel_attributes` | rooms, price, area, district, building, housing, ad type | Filter panel attributes, in order |

use crate::error::Result;
use crate::url::PageLocation;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "listings.toml";

pub const DEFAULT_PANEL_ATTRIBUTES: [&str; 7] = [
    "number_of_rooms",
    "price",
    "total_area",
    "district",
    "building_type",
    "housing_type",
    "ad_type",
];

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ListingsConfig {
    /// Listings per result page.
    #[config(default = 20, env = "LISTINGS_PAGE_SIZE")]
    pub page_size: u32,

    /// Locale segment used when a location has none.
    #[config(default = "en", env = "LISTINGS_LOCALE")]
    pub locale: String,

    #[config(default = "/listings")]
    pub listings_path: String,

    /// Attribute codes shown in the filter panel, in display order. Empty
    /// shows every attribute in catalog order.
    #[config(default = [
        "number_of_rooms",
        "price",
        "total_area",
        "district",
        "building_type",
        "housing_type",
        "ad_type"
    ])]
    pub panel_attributes: Vec<String>,
}

impl Default for ListingsConfig {
    fn default() -> Self {
        Self {
            page_size: 20,
            locale: "en".to_string(),
            listings_path: "/listings".to_string(),
            panel_attributes: DEFAULT_PANEL_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl ListingsConfig {
    /// Loads from the environment and, when given, `<data_dir>/listings.toml`.
    pub fn load(data_dir: Option<&Path>) -> Result<Self> {
        let mut builder = ListingsConfig::builder().env();
        if let Some(dir) = data_dir {
            builder = builder.file(dir.join(CONFIG_FILE));
        }
        let mut config = builder.load()?;
        if config.page_size == 0 {
            config.page_size = 1;
        }
        Ok(config)
    }

    /// The listings page for this configuration, without filters.
    pub fn home(&self) -> PageLocation {
        PageLocation::new(Some(&self.locale), &self.listings_path)
    }
}

/// OS-appropriate data directory, e.g. `~/.local/share/listings` on Linux.
pub fn default_data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("uz", "listings", "listings").map(|d| d.data_dir().to_path_buf())
}
