use std::collections::HashMap;

use chrono::NaiveDate;

use crate::aggregate::{Aggregation, SegmentTotal};
use crate::formats::{MonthKey, SegmentKey};

/// One Marimekko column. Positions are fractions of the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthColumn {
    pub month: MonthKey,
    pub total_pages: u64,
    pub first_date: NaiveDate,
    pub width: f64,
    pub x_start: f64,
    pub x_end: f64,
    pub x_center: f64,
}

/// One stacked block inside a column.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentGeometry {
    pub key: SegmentKey,
    pub pages: u64,
    pub month_pages: u64,
    /// Share of the month's pages; stacks to 1.0 per month.
    pub height: f64,
    pub y_base: f64,
    pub x_center: f64,
    pub width: f64,
    pub books_text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    columns: Vec<MonthColumn>,
    segments: Vec<SegmentGeometry>,
    grand_total: u64,
}

impl Layout {
    /// Returns `None` when there are no pages to distribute.
    pub fn compute(aggregation: &Aggregation) -> Option<Self> {
        let grand_total = aggregation.grand_total();
        if grand_total == 0 {
            return None;
        }

        let mut months = aggregation.months().to_vec();
        months.sort_by_key(|m| m.first_date);

        let mut columns = Vec::with_capacity(months.len());
        let mut cursor = 0.0;
        for month in months {
            let width = month.total_pages as f64 / grand_total as f64;
            let x_start = cursor;
            let x_end = x_start + width;
            cursor = x_end;
            columns.push(MonthColumn {
                month: month.month,
                total_pages: month.total_pages,
                first_date: month.first_date,
                width,
                x_start,
                x_end,
                x_center: (x_start + x_end) / 2.0,
            });
        }

        let mut by_month: HashMap<MonthKey, Vec<&SegmentTotal>> = HashMap::new();
        for segment in aggregation.segments() {
            by_month.entry(segment.key.month).or_default().push(segment);
        }

        let mut segments = Vec::with_capacity(aggregation.segments().len());
        for column in &columns {
            let Some(mut stack) = by_month.remove(&column.month) else {
                continue;
            };
            stack.sort_by_key(|s| s.key.rating);

            let mut y_base = 0.0;
            for segment in stack {
                let height = if column.total_pages == 0 {
                    0.0
                } else {
                    segment.pages as f64 / column.total_pages as f64
                };
                segments.push(SegmentGeometry {
                    key: segment.key,
                    pages: segment.pages,
                    month_pages: column.total_pages,
                    height,
                    y_base,
                    x_center: column.x_center,
                    width: column.width,
                    books_text: segment.books_text(),
                });
                y_base += height;
            }
        }

        Some(Self {
            columns,
            segments,
            grand_total,
        })
    }

    /// Columns in chronological (`first_date`) order.
    pub fn columns(&self) -> &[MonthColumn] {
        &self.columns
    }

    /// Segments grouped by column, then stacked in rating order.
    pub fn segments(&self) -> &[SegmentGeometry] {
        &self.segments
    }

    pub fn grand_total(&self) -> u64 {
        self.grand_total
    }
}
