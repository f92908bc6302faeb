use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::aggregate::Aggregation;
use crate::config::SLIDER_STEP;
use crate::dataset::Dataset;
use crate::filter::{PageRange, filter_by_pages};
use crate::formats::{SegmentKey, TableRow};
use crate::layout::Layout;
use crate::scene::{Scene, SceneOptions};
use crate::selection::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    RangeChanged { low: i64, high: i64 },
    SegmentClicked(SegmentKey),
}

/// The only mutable state of a dashboard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub page_range: PageRange,
    pub selection: Selection,
}

/// What changed after one event. `scene` is only present when the chart
/// geometry was recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdate {
    pub page_range: PageRange,
    pub selection: Selection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene: Option<Scene>,
    pub table: Vec<TableRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slider {
    pub min: i64,
    pub max: i64,
    pub step: u32,
}

/// Full state for a fresh page load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub slider: Slider,
    pub page_range: PageRange,
    pub selection: Selection,
    pub scene: Scene,
    pub table: Vec<TableRow>,
}

/// Owns the view state and recomputes scene and table on each event.
#[derive(Debug, Clone)]
pub struct Dashboard {
    dataset: Arc<Dataset>,
    options: SceneOptions,
    state: ViewState,
}

impl Dashboard {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let options = SceneOptions {
            year: dataset.year(),
        };
        let page_range = dataset.page_bounds().unwrap_or(PageRange::new(0, 0));
        Self {
            dataset,
            options,
            state: ViewState {
                page_range,
                selection: Selection::Unselected,
            },
        }
    }

    pub fn with_state(mut self, state: ViewState) -> Self {
        self.state = state;
        self
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn handle(&mut self, event: ViewEvent) -> ViewUpdate {
        match event {
            ViewEvent::RangeChanged { low, high } => {
                self.state.page_range = PageRange::new(low, high);
                tracing::debug!(low, high, "page range changed");
                self.update(Some(self.scene()))
            }
            ViewEvent::SegmentClicked(key) => {
                self.state.selection = self.state.selection.click(key);
                tracing::debug!(selection = ?self.state.selection, "segment clicked");
                self.update(None)
            }
        }
    }

    pub fn scene(&self) -> Scene {
        let range = self.state.page_range;
        let in_range = filter_by_pages(self.dataset.records(), range);
        let aggregation = Aggregation::from_records(in_range);
        match Layout::compute(&aggregation) {
            Some(layout) => Scene::build(&layout, &self.options),
            None => Scene::empty(range),
        }
    }

    /// Range filter, then the selection, in dataset order.
    pub fn table(&self) -> Vec<TableRow> {
        filter_by_pages(self.dataset.records(), self.state.page_range)
            .into_iter()
            .filter(|record| self.state.selection.admits(record))
            .map(TableRow::from)
            .collect()
    }

    pub fn view(&self) -> DashboardView {
        let bounds = self.dataset.page_bounds().unwrap_or(PageRange::new(0, 0));
        DashboardView {
            slider: Slider {
                min: bounds.low,
                max: bounds.high,
                step: SLIDER_STEP,
            },
            page_range: self.state.page_range,
            selection: self.state.selection,
            scene: self.scene(),
            table: self.table(),
        }
    }

    fn update(&self, scene: Option<Scene>) -> ViewUpdate {
        ViewUpdate {
            page_range: self.state.page_range,
            selection: self.state.selection,
            scene,
            table: self.table(),
        }
    }
}
