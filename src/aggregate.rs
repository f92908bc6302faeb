use std::collections::HashMap;

use chrono::NaiveDate;

use crate::formats::{BookRecord, MonthKey, SegmentKey};

#[derive(Debug, Clone, PartialEq)]
pub struct MonthTotal {
    pub month: MonthKey,
    pub total_pages: u64,
    /// Earliest `date_added` in the month; only used for ordering.
    pub first_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentTotal {
    pub key: SegmentKey,
    pub pages: u64,
    /// `Title (Author)` lines in input order.
    pub books: Vec<String>,
}

impl SegmentTotal {
    pub fn books_text(&self) -> String {
        self.books.join("\n")
    }
}

/// Page sums per month and per (month, rating), in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    months: Vec<MonthTotal>,
    segments: Vec<SegmentTotal>,
}

impl Aggregation {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BookRecord>,
    {
        let mut months: Vec<MonthTotal> = Vec::new();
        let mut segments: Vec<SegmentTotal> = Vec::new();
        let mut month_index: HashMap<MonthKey, usize> = HashMap::new();
        let mut segment_index: HashMap<SegmentKey, usize> = HashMap::new();
        let mut skipped = 0usize;

        for record in records {
            let (Some(date), Some(key)) = (record.date_added, record.segment_key()) else {
                skipped += 1;
                continue;
            };
            let pages = u64::from(record.pages);

            let idx = *month_index.entry(key.month).or_insert_with(|| {
                months.push(MonthTotal {
                    month: key.month,
                    total_pages: 0,
                    first_date: date,
                });
                months.len() - 1
            });
            let month = &mut months[idx];
            month.total_pages += pages;
            month.first_date = month.first_date.min(date);

            let idx = *segment_index.entry(key).or_insert_with(|| {
                segments.push(SegmentTotal {
                    key,
                    pages: 0,
                    books: Vec::new(),
                });
                segments.len() - 1
            });
            let segment = &mut segments[idx];
            segment.pages += pages;
            segment.books.push(record.listing());
        }

        if skipped > 0 {
            tracing::debug!(skipped, "records without a date were left out of the aggregation");
        }

        Self { months, segments }
    }

    pub fn months(&self) -> &[MonthTotal] {
        &self.months
    }

    pub fn segments(&self) -> &[SegmentTotal] {
        &self.segments
    }

    pub fn grand_total(&self) -> u64 {
        self.months.iter().map(|m| m.total_pages).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn segment(&self, key: &SegmentKey) -> Option<&SegmentTotal> {
        self.segments.iter().find(|s| &s.key == key)
    }
}
