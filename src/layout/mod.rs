//! Dashboard layout
//!
//! Section order and status, the card list, and the theme, plus their
//! persistence and JSON export/import.

pub mod section;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use section::{Section, SectionId, SectionStatus};
pub use snapshot::LayoutSnapshot;
pub use storage::FileStorage;
pub use store::{DragResult, LayoutStore, SyncOutcome};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

#[derive(Debug, Error)]
pub enum LayoutError {
    /// The document could not be parsed as JSON at all.
    #[error("Layout file is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// A required top-level key is absent.
    #[error("Layout file is missing required key `{0}`")]
    MissingKey(&'static str),

    /// Keys are present but a value has the wrong shape (e.g. an unknown section id).
    #[error("Layout file has an invalid shape: {0}")]
    InvalidShape(#[source] serde_json::Error),

    #[error("Section `{0}` appears more than once in the layout")]
    DuplicateSection(SectionId),

    #[error("Layout I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Durable storage rejected a write; in-memory state was left unchanged.
    #[error("Failed to persist layout: {0}")]
    Storage(String),
}
