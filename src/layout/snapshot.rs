//! Layout export document
//!
//! The `dashboard-layout.json` shape shared with the browser build:
//! `{ sections, components, theme }`, plus an optional `removedSections`.

use super::section::Section;
use super::{LayoutError, Theme};
use crate::market::CoinRecord;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

const REQUIRED_KEYS: [&str; 3] = ["sections", "components", "theme"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub sections: Vec<Section>,
    #[serde(alias = "cards")]
    pub components: Vec<CoinRecord>,
    pub theme: Theme,
    #[serde(
        rename = "removedSections",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub removed_sections: Vec<Section>,
}

impl LayoutSnapshot {
    /// Parses an export document, checking the required keys before the shape.
    ///
    /// # Errors
    /// `InvalidJson` if the text is not JSON, `MissingKey` if a required
    /// top-level key is absent, `InvalidShape` if a value does not fit.
    pub fn parse(json: &str) -> Result<Self, LayoutError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(LayoutError::InvalidJson)?;

        for key in REQUIRED_KEYS {
            let present = value.get(key).is_some()
                || (key == "components" && value.get("cards").is_some());
            if !present {
                return Err(LayoutError::MissingKey(key));
            }
        }

        serde_json::from_value(value).map_err(LayoutError::InvalidShape)
    }

    pub fn to_json_pretty(&self) -> Result<String, LayoutError> {
        serde_json::to_string_pretty(self).map_err(LayoutError::InvalidShape)
    }

    /// Loads and parses an export file.
    pub fn read_from(path: &Path) -> Result<Self, LayoutError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Writes the document, creating parent directories and overwriting any existing file.
    pub fn write_to(&self, path: &Path) -> Result<(), LayoutError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
