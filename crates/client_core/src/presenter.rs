//! Folds an [`AnalysisResult`] into the results panel and chart.

use shared::protocol::{AnalysisResult, TimelineEntry};
use tracing::debug;

use crate::{
    chart::{
        ChartHandle, ChartRenderer, ChartSpec, Dataset, IndexAxis, CYCLE_SERIES_COLOR,
        CYCLE_SERIES_LABEL, WAIT_SERIES_COLOR, WAIT_SERIES_LABEL,
    },
    markup::Markup,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsView {
    pub visible: bool,
    pub lead_time: f64,
    pub va_ratio: f64,
    pub total_wait_time: f64,
    /// Sum of the costs the backend echoed back, not of the local model.
    pub total_cost: f64,
    pub ai_report: Markup,
    /// Plain text; escape before placing into markup.
    pub recommendations: Vec<String>,
}

impl ResultsView {
    pub fn total_cost_label(&self) -> String {
        format!("${}", self.total_cost)
    }

    pub fn recommendations_markup(&self) -> Vec<Markup> {
        self.recommendations
            .iter()
            .map(|text| Markup::text(text))
            .collect()
    }
}

/// Builds the horizontal grouped bar chart, one bar pair per timeline entry.
pub fn chart_spec(timeline: &[TimelineEntry]) -> ChartSpec {
    let labels = timeline.iter().map(|entry| entry.name.clone()).collect();
    let wait_data = timeline.iter().map(|entry| entry.wait).collect();
    let cycle_data = timeline.iter().map(|entry| entry.cycle).collect();

    ChartSpec {
        index_axis: IndexAxis::Y,
        stacked: false,
        labels,
        datasets: vec![
            Dataset {
                label: WAIT_SERIES_LABEL.to_string(),
                color: WAIT_SERIES_COLOR.to_string(),
                data: wait_data,
            },
            Dataset {
                label: CYCLE_SERIES_LABEL.to_string(),
                color: CYCLE_SERIES_COLOR.to_string(),
                data: cycle_data,
            },
        ],
    }
}

pub struct ResultsPresenter {
    renderer: Box<dyn ChartRenderer>,
    chart: Option<ChartHandle>,
    view: ResultsView,
}

impl ResultsPresenter {
    pub fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self {
            renderer,
            chart: None,
            view: ResultsView::default(),
        }
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    pub fn active_chart(&self) -> Option<ChartHandle> {
        self.chart
    }

    pub fn present(&mut self, result: &AnalysisResult) {
        let total_cost = result
            .steps
            .iter()
            .map(|step| step.cost.unwrap_or_default())
            .sum();

        self.view = ResultsView {
            visible: true,
            lead_time: result.summary.lead_time,
            va_ratio: result.summary.va_ratio,
            total_wait_time: result.summary.total_wait_time,
            total_cost,
            ai_report: Markup::trusted(result.ai_report.clone()),
            recommendations: result.alerts.clone(),
        };

        // Destroy before create: at most one chart exists at any time.
        if let Some(previous) = self.chart.take() {
            self.renderer.destroy(previous);
        }
        let handle = self.renderer.create(&chart_spec(&result.timeline));
        debug!(chart = handle.0, bars = result.timeline.len(), "chart rendered");
        self.chart = Some(handle);
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
