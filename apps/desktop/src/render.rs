//! Plain-text rendering of the session views.

use std::{
    fmt::Write as _,
    sync::{Arc, Mutex},
};

use client_core::{
    chart::{ChartHandle, ChartRenderer, ChartSpec},
    Author, ResultsView, TableView, TranscriptEntry,
};

const BAR_WIDTH: usize = 40;

/// Chart surface holding at most one drawn chart.
#[derive(Clone, Default)]
pub struct TextCanvas {
    surface: Arc<Mutex<Surface>>,
}

#[derive(Default)]
struct Surface {
    next: u64,
    drawn: Option<(ChartHandle, String)>,
}

impl TextCanvas {
    pub fn snapshot(&self) -> Option<String> {
        self.surface
            .lock()
            .ok()
            .and_then(|surface| surface.drawn.as_ref().map(|(_, text)| text.clone()))
    }
}

impl ChartRenderer for TextCanvas {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        let Ok(mut surface) = self.surface.lock() else {
            return ChartHandle(0);
        };
        surface.next += 1;
        let handle = ChartHandle(surface.next);
        surface.drawn = Some((handle, draw_chart(spec)));
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        if let Ok(mut surface) = self.surface.lock() {
            if surface.drawn.as_ref().is_some_and(|(drawn, _)| *drawn == handle) {
                surface.drawn = None;
            }
        }
    }
}

/// Horizontal bars, one group per label, one line per series.
pub fn draw_chart(spec: &ChartSpec) -> String {
    let max = spec
        .datasets
        .iter()
        .flat_map(|dataset| dataset.data.iter().copied())
        .fold(0.0_f64, f64::max);
    let label_width = spec.labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (i, label) in spec.labels.iter().enumerate() {
        for (series, dataset) in spec.datasets.iter().enumerate() {
            let value = dataset.data.get(i).copied().unwrap_or_default();
            let len = if max > 0.0 {
                ((value / max) * BAR_WIDTH as f64).round() as usize
            } else {
                0
            };
            let mark = if series == 0 { '░' } else { '█' };
            let name = if series == 0 { label.as_str() } else { "" };
            let _ = writeln!(
                out,
                "{name:<label_width$} |{} {value}",
                mark.to_string().repeat(len)
            );
        }
    }
    let legend: Vec<String> = spec
        .datasets
        .iter()
        .enumerate()
        .map(|(series, dataset)| {
            let mark = if series == 0 { '░' } else { '█' };
            format!("{mark} {}", dataset.label)
        })
        .collect();
    let _ = write!(out, "{}", legend.join("   "));
    out
}

pub fn table(view: &TableView) -> String {
    let mut out = String::new();
    if let Some(process_name) = &view.summary_panel {
        let _ = writeln!(out, "Process: {process_name}");
    }
    let _ = writeln!(
        out,
        "{:>3}  {:<20} {:>8} {:>8} {:>4} {:>8}  depends on",
        "#", "name", "cycle h", "cost", "VA", "wait h"
    );
    if let Some(placeholder) = view.placeholder {
        let _ = writeln!(out, "     {placeholder}");
        return out;
    }
    for row in &view.rows {
        let _ = writeln!(
            out,
            "{:>3}  {:<20} {:>8} {:>8} {:>4} {:>8}  {}",
            row.key + 1,
            row.input.name,
            row.input.cycle_time,
            row.input.cost,
            if row.input.value_added { "yes" } else { "no" },
            row.wait_time,
            row.input.depends_on
        );
    }
    out
}

pub fn results(view: &ResultsView, chart: Option<&str>) -> String {
    if !view.visible {
        return String::new();
    }
    let mut out = String::new();
    let _ = writeln!(out, "Lead time:        {} h", view.lead_time);
    let _ = writeln!(out, "VA ratio:         {} %", view.va_ratio);
    let _ = writeln!(out, "Total wait time:  {} h", view.total_wait_time);
    let _ = writeln!(out, "Total cost:       {}", view.total_cost_label());
    if let Some(chart) = chart {
        let _ = writeln!(out, "\n{chart}");
    }
    if !view.ai_report.is_empty() {
        let _ = writeln!(out, "\n{}", view.ai_report);
    }
    if !view.recommendations.is_empty() {
        let _ = writeln!(out, "\nRecommendations:");
        for item in &view.recommendations {
            let _ = writeln!(out, "  - {item}");
        }
    }
    out
}

pub fn transcript_entry(entry: &TranscriptEntry) -> String {
    let who = match entry.author {
        Author::User => "you",
        Author::Bot => "bot",
    };
    format!("[{}] {who}: {}", entry.at.format("%H:%M:%S"), entry.plain_text())
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
