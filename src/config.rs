//! Explorer configuration.
//!
//! Loaded from TOML; every key is optional:
//!
//! ```toml
//! items_per_page = 20
//! default_view = "calls"
//!
//! [filters]
//! moneyness = "otm"
//! min_volume = 100
//! max_iv = 0.8
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::explorer::ViewType;
use crate::filter::{FilterError, FilterSet};
use crate::pager::ITEMS_PER_PAGE;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid filter preset: {0}")]
    InvalidFilter(#[from] FilterError),

    #[error("items_per_page must be at least 1")]
    InvalidPageSize,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Rows per page in each chain table.
    pub items_per_page: usize,
    /// View shown when a chain is first opened.
    pub default_view: ViewType,
    /// Filter preset committed on startup.
    pub filters: FilterSet,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            items_per_page: ITEMS_PER_PAGE,
            default_view: ViewType::All,
            filters: FilterSet::default(),
        }
    }
}

impl ExplorerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.items_per_page == 0 {
            return Err(ConfigError::InvalidPageSize);
        }
        self.filters.validate()?;
        Ok(())
    }
}
