//! Rendering seam for the wait/cycle bar chart.

pub const WAIT_SERIES_LABEL: &str = "Wait time (h)";
pub const WAIT_SERIES_COLOR: &str = "#ef4444";
pub const CYCLE_SERIES_LABEL: &str = "Cycle time (h)";
pub const CYCLE_SERIES_COLOR: &str = "#10b981";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexAxis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: String,
    pub color: String,
    pub data: Vec<f64>,
}

/// Grouped bar chart. `labels[i]` and `datasets[_].data[i]` describe bar `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub index_axis: IndexAxis,
    pub stacked: bool,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartHandle(pub u64);

/// A chart library that can draw a chart and later tear it down.
pub trait ChartRenderer: Send {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle;
    fn destroy(&mut self, handle: ChartHandle);
}
