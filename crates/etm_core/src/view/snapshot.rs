//! Backend that keeps the latest rendered state in memory.
//!
//! Used by embedding front-ends that pull view state after each call, and by
//! tests that assert on what was pushed.

use super::{Chart, ChartId, ListView, RenderBackend};

#[derive(Debug, Clone, Default)]
pub struct SnapshotBackend {
    list: Option<ListView>,
    task_chart: Option<Chart>,
    contribution_chart: Option<Chart>,
    list_renders: u64,
    chart_redraws: u64,
}

impl SnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Option<&ListView> {
        self.list.as_ref()
    }

    pub fn chart(&self, id: ChartId) -> Option<&Chart> {
        match id {
            ChartId::TaskCompletion => self.task_chart.as_ref(),
            ChartId::Contribution => self.contribution_chart.as_ref(),
        }
    }

    pub fn list_renders(&self) -> u64 {
        self.list_renders
    }

    pub fn chart_redraws(&self) -> u64 {
        self.chart_redraws
    }
}

impl RenderBackend for SnapshotBackend {
    fn probe(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn render_list(&mut self, view: &ListView) {
        self.list = Some(view.clone());
        self.list_renders += 1;
    }

    fn redraw_chart(&mut self, chart: &Chart) {
        let slot = match chart.id() {
            ChartId::TaskCompletion => &mut self.task_chart,
            ChartId::Contribution => &mut self.contribution_chart,
        };
        *slot = Some(chart.clone());
        self.chart_redraws += 1;
    }
}
