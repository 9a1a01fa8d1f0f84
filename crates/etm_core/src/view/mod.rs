//! List and chart synchronization.
//!
//! # Responsibility
//! - Rebuild the list view and both summary charts from the full record set
//!   after every change.
//! - Own the two long-lived chart models and push them to a render backend.
//!
//! # Invariants
//! - Views are always rebuilt from scratch; nothing is patched incrementally.
//! - Charts are created once in `ViewSynchronizer::start` and mutated in
//!   place; each mutation bumps the chart `revision`.
//! - Chart series are index-aligned with the record set.
//! - A backend that fails its startup probe is fatal
//!   (`ViewError::RenderingUnavailable`).

mod snapshot;

use crate::model::employee::EmployeeRecord;
use crate::palette::{palette, shade, BORDER_SHADE_DELTA};
use log::{debug, error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub use snapshot::SnapshotBackend;

/// Placeholder text shown when there are no records.
pub const EMPTY_LIST_MESSAGE: &str = "No employees yet. Use the form above to add one.";

pub type ViewResult<T> = Result<T, ViewError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// Chart backend is missing; summary views cannot be provided.
    RenderingUnavailable(String),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RenderingUnavailable(reason) => write!(f, "rendering unavailable: {reason}"),
        }
    }
}

impl Error for ViewError {}

/// One display row of the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRow {
    /// Current position; used to address edit/delete actions.
    pub index: usize,
    pub emp_id: String,
    pub name: String,
    pub position: String,
    pub task_completed: u8,
    pub contribution: u8,
    pub activities: String,
    pub remarks: String,
}

/// Rendered list state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ListView {
    Empty { message: String },
    Rows { rows: Vec<ListRow> },
}

impl ListView {
    pub fn rows(&self) -> &[ListRow] {
        match self {
            Self::Empty { .. } => &[],
            Self::Rows { rows } => rows,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    /// Bar chart of per-employee task completion.
    TaskCompletion,
    /// Doughnut chart of per-employee contribution share.
    Contribution,
}

/// Single dataset carried by each chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u8>,
    pub background_color: Vec<String>,
    /// Empty for charts without per-slice borders.
    pub border_color: Vec<String>,
    pub border_width: u8,
    pub hover_offset: u8,
}

/// Long-lived chart data model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    id: ChartId,
    kind: ChartKind,
    labels: Vec<String>,
    dataset: ChartDataset,
    revision: u64,
}

impl Chart {
    fn task_completion() -> Self {
        Self::empty(ChartId::TaskCompletion, ChartKind::Bar, "Task Completion (%)", 1, 0)
    }

    fn contribution() -> Self {
        Self::empty(ChartId::Contribution, ChartKind::Doughnut, "Contribution (%)", 0, 6)
    }

    fn empty(
        id: ChartId,
        kind: ChartKind,
        label: &str,
        border_width: u8,
        hover_offset: u8,
    ) -> Self {
        Self {
            id,
            kind,
            labels: Vec::new(),
            dataset: ChartDataset {
                label: label.to_string(),
                data: Vec::new(),
                background_color: Vec::new(),
                border_color: Vec::new(),
                border_width,
                hover_offset,
            },
            revision: 0,
        }
    }

    fn set_data(
        &mut self,
        labels: Vec<String>,
        data: Vec<u8>,
        background_color: Vec<String>,
        border_color: Vec<String>,
    ) {
        self.labels = labels;
        self.dataset.data = data;
        self.dataset.background_color = background_color;
        self.dataset.border_color = border_color;
        self.revision += 1;
    }

    pub fn id(&self) -> ChartId {
        self.id
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn dataset(&self) -> &ChartDataset {
        &self.dataset
    }

    /// Number of data updates applied since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Rendering surface for the list and charts.
pub trait RenderBackend {
    /// Checks that the chart backend is usable. Called once at startup.
    fn probe(&mut self) -> Result<(), String>;

    fn render_list(&mut self, view: &ListView);

    /// Requests a redraw of `chart` with its current data.
    fn redraw_chart(&mut self, chart: &Chart);
}

/// Series derived from a record set, index-aligned with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub task_completed: Vec<u8>,
    pub contribution: Vec<u8>,
    pub colors: Vec<String>,
    pub border_colors: Vec<String>,
}

impl ChartSeries {
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        let colors: Vec<String> = palette(records.len())
            .iter()
            .map(ToString::to_string)
            .collect();
        let border_colors = colors
            .iter()
            .map(|color| shade(color, BORDER_SHADE_DELTA))
            .collect();

        Self {
            labels: records.iter().map(|record| record.name.clone()).collect(),
            task_completed: records
                .iter()
                .map(|record| record.task_completed.value())
                .collect(),
            contribution: records
                .iter()
                .map(|record| record.contribution.value())
                .collect(),
            colors,
            border_colors,
        }
    }
}

/// Builds the list view for a record set.
pub fn build_list_view(records: &[EmployeeRecord]) -> ListView {
    if records.is_empty() {
        return ListView::Empty {
            message: EMPTY_LIST_MESSAGE.to_string(),
        };
    }

    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| ListRow {
            index,
            emp_id: record.emp_id.clone(),
            name: record.name.clone(),
            position: record.position.clone(),
            task_completed: record.task_completed.value(),
            contribution: record.contribution.value(),
            activities: record.activities.clone(),
            remarks: record.remarks.clone(),
        })
        .collect();
    ListView::Rows { rows }
}

/// Keeps the list and both charts consistent with the record set.
pub struct ViewSynchronizer<B: RenderBackend> {
    backend: B,
    list: ListView,
    task_chart: Chart,
    contribution_chart: Chart,
}

impl<B: RenderBackend> ViewSynchronizer<B> {
    /// Probes the backend and creates both charts.
    ///
    /// # Errors
    /// - `RenderingUnavailable` when the backend probe fails.
    pub fn start(mut backend: B) -> ViewResult<Self> {
        if let Err(reason) = backend.probe() {
            error!(
                "event=view_start module=view status=error error_code=rendering_unavailable reason={}",
                reason
            );
            return Err(ViewError::RenderingUnavailable(reason));
        }

        info!("event=view_start module=view status=ok charts=2");
        Ok(Self {
            backend,
            list: build_list_view(&[]),
            task_chart: Chart::task_completion(),
            contribution_chart: Chart::contribution(),
        })
    }

    /// Rebuilds all views from `records` and requests redraws.
    pub fn sync(&mut self, records: &[EmployeeRecord]) {
        self.list = build_list_view(records);
        self.backend.render_list(&self.list);

        let series = ChartSeries::from_records(records);
        self.task_chart.set_data(
            series.labels.clone(),
            series.task_completed,
            series.colors.clone(),
            series.border_colors,
        );
        self.backend.redraw_chart(&self.task_chart);

        self.contribution_chart.set_data(
            series.labels,
            series.contribution,
            series.colors,
            Vec::new(),
        );
        self.backend.redraw_chart(&self.contribution_chart);

        debug!(
            "event=view_sync module=view status=ok count={} revision={}",
            records.len(),
            self.task_chart.revision()
        );
    }

    pub fn list(&self) -> &ListView {
        &self.list
    }

    pub fn task_chart(&self) -> &Chart {
        &self.task_chart
    }

    pub fn contribution_chart(&self) -> &Chart {
        &self.contribution_chart
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }
}
