//! Dashboard sections

use serde::{Deserialize, Serialize};

/// Stable identity of a dashboard region; the reorder and removal key.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SectionId {
    Table,
    Graph,
    Cards,
}

impl SectionId {
    /// Every section, in default order.
    pub const ALL: [SectionId; 3] = [SectionId::Table, SectionId::Graph, SectionId::Cards];

    /// Slot index, used for O(1) status lookup.
    pub const fn index(self) -> usize {
        match self {
            SectionId::Table => 0,
            SectionId::Graph => 1,
            SectionId::Cards => 2,
        }
    }

    pub const fn default_title(self) -> &'static str {
        match self {
            SectionId::Table => "Crypto Data Table",
            SectionId::Graph => "Crypto Graph Representation",
            SectionId::Cards => "Crypto Card Data",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
}

impl Section {
    pub fn new(id: SectionId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
        }
    }

    pub fn defaults() -> Vec<Section> {
        SectionId::ALL.into_iter().map(Section::new).collect()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum SectionStatus {
    Active,
    Removed,
}
