use serde::{Deserialize, Serialize};

use crate::formats::BookRecord;

/// Inclusive page-count range.
///
/// Bounds are signed so that any value a client sends can be represented;
/// a range outside the dataset simply matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    pub low: i64,
    pub high: i64,
}

impl PageRange {
    pub fn new(low: i64, high: i64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, pages: u32) -> bool {
        let pages = i64::from(pages);
        self.low <= pages && pages <= self.high
    }
}

pub fn filter_by_pages(records: &[BookRecord], range: PageRange) -> Vec<&BookRecord> {
    records
        .iter()
        .filter(|record| range.contains(record.pages))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::Shelf;

    fn book(title: &str, pages: u32) -> BookRecord {
        BookRecord::new(title, "A", None, Shelf::Read, None, pages)
    }

    #[test]
    fn bounds_are_inclusive() {
        let records = vec![book("a", 100), book("b", 200), book("c", 300)];
        let hits = filter_by_pages(&records, PageRange::new(100, 200));
        let titles: Vec<_> = hits.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn out_of_domain_ranges_yield_nothing() {
        let records = vec![book("a", 100)];
        assert!(filter_by_pages(&records, PageRange::new(500, 900)).is_empty());
        assert!(filter_by_pages(&records, PageRange::new(-20, -1)).is_empty());
        assert!(filter_by_pages(&records, PageRange::new(200, 50)).is_empty());
    }

    #[test]
    fn preserves_input_order() {
        let records = vec![book("z", 10), book("a", 10), book("m", 10)];
        let hits = filter_by_pages(&records, PageRange::new(0, 10));
        let titles: Vec<_> = hits.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["z", "a", "m"]);
    }
}
