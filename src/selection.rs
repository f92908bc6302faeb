use serde::{Deserialize, Serialize};

use crate::formats::{BookRecord, SegmentKey};

/// Click-to-filter state of the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Unselected,
    Selected(SegmentKey),
}

impl Selection {
    /// Clicking the active segment clears it; any other segment replaces it.
    pub fn click(self, key: SegmentKey) -> Self {
        match self {
            Self::Selected(current) if current == key => Self::Unselected,
            Self::Unselected | Self::Selected(_) => Self::Selected(key),
        }
    }

    pub fn key(&self) -> Option<&SegmentKey> {
        match self {
            Self::Unselected => None,
            Self::Selected(key) => Some(key),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Self::Selected(_))
    }

    /// Every record passes while nothing is selected.
    pub fn admits(&self, record: &BookRecord) -> bool {
        match self {
            Self::Unselected => true,
            Self::Selected(key) => record.segment_key().as_ref() == Some(key),
        }
    }
}
