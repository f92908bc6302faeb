//! Declarative chart description handed to the renderer.
//!
//! A [`Scene`] is either a Marimekko chart or the "no data in range" state.
//! Charts always carry one series per rating bucket so the legend and color
//! mapping stay stable whatever the current filter leaves behind.

use serde::{Deserialize, Serialize};

use crate::filter::PageRange;
use crate::formats::{MonthKey, SegmentKey};
use crate::layout::{Layout, SegmentGeometry};
use crate::rating::{BUCKETS, RatingLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneOptions {
    /// Reading year shown in titles.
    pub year: i32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self { year: 2025 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scene {
    Chart(ChartScene),
    Empty(EmptyScene),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    pub title: String,
    /// One entry per rating bucket, in stacking order.
    pub series: Vec<Series>,
    /// Top-down legend order (reverse of stacking).
    pub legend: Vec<LegendEntry>,
    pub x_axis: Axis,
    pub y_axis: Axis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmptyScene {
    pub title: String,
    pub range: PageRange,
    pub axes_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub rating: RatingLabel,
    pub color: String,
    /// Set when the bucket has no data; `bars` then holds a single
    /// zero-extent bar that only exists for the legend.
    pub placeholder: bool,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<SegmentKey>,
    pub x: f64,
    pub y_base: f64,
    pub height: f64,
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<Tooltip>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub month: MonthKey,
    pub rating: RatingLabel,
    pub segment_pages: u64,
    pub month_pages: u64,
    pub books: String,
}

impl Tooltip {
    pub fn text(&self) -> String {
        format!(
            "Month: {}\nRating: {}\nPages in this segment: {}\nTotal pages this month: {}\n\nBooks:\n{}",
            self.month, self.rating, self.segment_pages, self.month_pages, self.books
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub rating: RatingLabel,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    pub range: [f64; 2],
    pub ticks: Vec<Tick>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub label: String,
}

impl Scene {
    pub fn build(layout: &Layout, options: &SceneOptions) -> Self {
        let series = BUCKETS
            .iter()
            .map(|rating| series_for(*rating, layout.segments()))
            .collect();

        let legend = BUCKETS
            .iter()
            .rev()
            .map(|rating| LegendEntry {
                rating: *rating,
                color: bucket_color(*rating),
            })
            .collect();

        let undrawn = layout
            .segments()
            .iter()
            .filter(|s| !s.key.rating.is_bucket())
            .count();
        if undrawn > 0 {
            tracing::debug!(undrawn, "segments outside the rating buckets are not drawn");
        }

        let x_axis = Axis {
            title: format!(
                "Month in {} (wider columns = more pages read that month)",
                options.year
            ),
            range: [0.0, 1.0],
            ticks: layout
                .columns()
                .iter()
                .map(|column| Tick {
                    value: column.x_center,
                    label: column.month.to_string(),
                })
                .collect(),
            tick_format: None,
        };
        let y_axis = Axis {
            title: "Share of pages in that month by rating (0–100%)".to_owned(),
            range: [0.0, 1.0],
            ticks: Vec::new(),
            tick_format: Some(".0%".to_owned()),
        };

        Self::Chart(ChartScene {
            title: format!(
                "How My {} Reading Time Is Distributed Across Months and Ratings",
                options.year
            ),
            series,
            legend,
            x_axis,
            y_axis,
        })
    }

    pub fn empty(range: PageRange) -> Self {
        Self::Empty(EmptyScene {
            title: format!("No books between {} and {} pages", range.low, range.high),
            range,
            axes_visible: false,
        })
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Chart(chart) => &chart.title,
            Self::Empty(empty) => &empty.title,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    pub fn as_chart(&self) -> Option<&ChartScene> {
        match self {
            Self::Chart(chart) => Some(chart),
            Self::Empty(_) => None,
        }
    }
}

impl ChartScene {
    /// Drawn bars only, placeholders excluded.
    pub fn bars(&self) -> impl Iterator<Item = &Bar> {
        self.series
            .iter()
            .filter(|s| !s.placeholder)
            .flat_map(|s| s.bars.iter())
    }

    pub fn bar(&self, key: &SegmentKey) -> Option<&Bar> {
        self.bars().find(|bar| bar.key.as_ref() == Some(key))
    }
}

fn series_for(rating: RatingLabel, segments: &[SegmentGeometry]) -> Series {
    let bars: Vec<Bar> = segments
        .iter()
        .filter(|s| s.key.rating == rating)
        .map(|s| Bar {
            key: Some(s.key),
            x: s.x_center,
            y_base: s.y_base,
            height: s.height,
            width: s.width,
            tooltip: Some(Tooltip {
                month: s.key.month,
                rating: s.key.rating,
                segment_pages: s.pages,
                month_pages: s.month_pages,
                books: s.books_text.clone(),
            }),
        })
        .collect();

    if bars.is_empty() {
        return Series {
            rating,
            color: bucket_color(rating),
            placeholder: true,
            bars: vec![Bar {
                key: None,
                x: 0.0,
                y_base: 0.0,
                height: 0.0,
                width: 0.0,
                tooltip: None,
            }],
        };
    }

    Series {
        rating,
        color: bucket_color(rating),
        placeholder: false,
        bars,
    }
}

fn bucket_color(rating: RatingLabel) -> String {
    rating.color().unwrap_or("#888888").to_owned()
}
