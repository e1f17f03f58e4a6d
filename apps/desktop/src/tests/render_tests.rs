use super::*;
use client_core::chart::{Dataset, IndexAxis};

fn spec() -> ChartSpec {
    ChartSpec {
        index_axis: IndexAxis::Y,
        stacked: false,
        labels: vec!["Cut".to_string(), "Weld".to_string()],
        datasets: vec![
            Dataset {
                label: "Wait time (h)".to_string(),
                color: "#ef4444".to_string(),
                data: vec![0.0, 2.0],
            },
            Dataset {
                label: "Cycle time (h)".to_string(),
                color: "#10b981".to_string(),
                data: vec![4.0, 1.0],
            },
        ],
    }
}

#[test]
fn canvas_keeps_only_the_live_chart() {
    let mut canvas = TextCanvas::default();
    let first = canvas.create(&spec());
    assert!(canvas.snapshot().expect("drawn").contains("Weld"));

    canvas.destroy(first);
    assert!(canvas.snapshot().is_none());

    let second = canvas.create(&spec());
    canvas.destroy(first);
    assert!(canvas.snapshot().is_some());
    canvas.destroy(second);
    assert!(canvas.snapshot().is_none());
}

#[test]
fn chart_draws_two_lines_per_label_and_a_legend() {
    let text = draw_chart(&spec());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Cut"));
    assert!(lines[2].starts_with("Weld"));
    assert!(lines[4].contains("Wait time (h)"));
    assert!(lines[4].contains("Cycle time (h)"));
}

#[test]
fn empty_table_renders_placeholder() {
    let text = table(&TableView {
        rows: Vec::new(),
        placeholder: Some("Add steps to get started"),
        summary_panel: None,
    });
    assert!(text.contains("Add steps to get started"));
    assert!(!text.contains("Process:"));
}

#[test]
fn hidden_results_render_nothing() {
    assert!(results(&ResultsView::default(), None).is_empty());
}

#[test]
fn transcript_prints_user_text_unescaped() {
    let mut transcript = client_core::Transcript::default();
    transcript.push_user("<script> & co");

    let line = transcript_entry(&transcript.entries()[0]);
    assert!(line.ends_with("you: <script> & co"));
}
