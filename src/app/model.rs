use serde::{Deserialize, Serialize};

use crate::formats::{MonthKey, SegmentKey};
use crate::rating::RatingLabel;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RangeRequest {
    pub low: i64,
    pub high: i64,
}

impl RangeRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.low > self.high {
            return Err(format!(
                "low ({}) must not exceed high ({})",
                self.low, self.high
            ));
        }
        Ok(())
    }
}

/// Body of a chart click: the keys the scene was built with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectRequest {
    pub month: MonthKey,
    pub rating: RatingLabel,
}

impl From<SelectRequest> for SegmentKey {
    fn from(req: SelectRequest) -> Self {
        SegmentKey::new(req.month, req.rating)
    }
}
