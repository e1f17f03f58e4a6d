//! Applies commands and network completions to the session, one event at a
//! time. Network calls run on spawned tasks and report back as events.

use std::fmt::Write as _;

use client_core::{AnalysisApplied, Session, StepPrefill};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::{
    commands::{self, Command, HELP},
    events::AppEvent,
    render::{self, TextCanvas},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct App {
    session: Session,
    canvas: TextCanvas,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(session: Session, canvas: TextCanvas, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            session,
            canvas,
            events,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn handle(&mut self, event: AppEvent, out: &mut String) -> Flow {
        match event {
            AppEvent::Input(line) => match commands::parse(&line) {
                Ok(Some(command)) => return self.run(command, out),
                Ok(None) => {}
                Err(err) => {
                    let _ = writeln!(out, "{err}");
                }
            },
            AppEvent::InputClosed => return Flow::Quit,
            AppEvent::AnalysisFinished { ticket, outcome } => {
                match self.session.finish_analysis(&ticket, outcome) {
                    Ok(AnalysisApplied::Presented) => {
                        self.show(out);
                    }
                    Ok(AnalysisApplied::Stale) => {
                        debug!(generation = ticket.generation(), "stale analysis ignored");
                    }
                    Err(err) => {
                        warn!(category = ?err.category(), %err, "analysis failed");
                        let _ = writeln!(out, "{}", err.user_message());
                    }
                }
            }
            AppEvent::ChatFinished(outcome) => {
                self.session.finish_chat(outcome);
                self.print_last_entry(out);
            }
            AppEvent::PredictionFinished { index, outcome } => match outcome {
                Ok(prediction) => {
                    let _ = writeln!(
                        out,
                        "Row {}: predicted wait for {} is {} h",
                        index + 1,
                        prediction.step,
                        prediction.predicted_wait_time
                    );
                }
                Err(err) => {
                    let _ = writeln!(out, "{}", err.user_message());
                }
            },
        }
        Flow::Continue
    }

    fn run(&mut self, command: Command, out: &mut String) -> Flow {
        match command {
            Command::Add(name) => {
                let prefill = name.map(StepPrefill::named).unwrap_or_default();
                self.session.add_step(prefill);
                out.push_str(&render::table(&self.session.table()));
            }
            Command::Edit {
                index,
                edit,
                commit,
            } => {
                let applied = if commit {
                    self.session.change_cell(index, edit)
                } else {
                    self.session.edit_cell(index, edit)
                };
                if !applied {
                    let _ = writeln!(out, "No step at row {}.", index + 1);
                } else if commit {
                    out.push_str(&render::table(&self.session.table()));
                }
            }
            Command::Commit(index) => {
                if self.session.commit_row(index) {
                    out.push_str(&render::table(&self.session.table()));
                } else {
                    let _ = writeln!(out, "No step at row {}.", index + 1);
                }
            }
            Command::Remove(index) => {
                if self.session.remove_step(index).is_none() {
                    let _ = writeln!(out, "No step at row {}.", index + 1);
                }
                out.push_str(&render::table(&self.session.table()));
            }
            Command::Clear => {
                self.session.clear_steps();
                out.push_str(&render::table(&self.session.table()));
            }
            Command::Show => self.show(out),
            Command::Analyze => self.start_analysis(out),
            Command::Predict(index) => self.start_prediction(index, out),
            Command::Chat(text) => self.start_chat(text, out),
            Command::Help => {
                let _ = writeln!(out, "{HELP}");
            }
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn start_analysis(&mut self, out: &mut String) {
        let ticket = match self.session.begin_analysis() {
            Ok(ticket) => ticket,
            Err(err) => {
                let _ = writeln!(out, "{}", err.user_message());
                return;
            }
        };
        let client = self.session.analysis_client();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.submit(ticket.request()).await;
            let _ = events.send(AppEvent::AnalysisFinished { ticket, outcome });
        });
        let _ = writeln!(out, "Analyzing...");
    }

    fn start_prediction(&mut self, index: usize, out: &mut String) {
        let step = match self.session.prediction_request(index) {
            Ok(step) => step,
            Err(err) => {
                let _ = writeln!(out, "{err}");
                return;
            }
        };
        let client = self.session.analysis_client();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.predict_wait(&step).await;
            let _ = events.send(AppEvent::PredictionFinished { index, outcome });
        });
    }

    fn start_chat(&mut self, text: String, out: &mut String) {
        let mut input = text;
        let Some(request) = self.session.begin_chat(&mut input) else {
            return;
        };
        self.print_last_entry(out);
        let client = self.session.chat_client();
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = client.submit(&request).await;
            let _ = events.send(AppEvent::ChatFinished(outcome));
        });
    }

    fn show(&self, out: &mut String) {
        out.push_str(&render::table(&self.session.table()));
        if self.session.results().visible && self.session.store().wait_times_stale() {
            let _ = writeln!(out, "(wait times are out of date; run analyze again)");
        }
        let chart = self.canvas.snapshot();
        out.push_str(&render::results(self.session.results(), chart.as_deref()));
        if self.session.analysis_in_flight() {
            let _ = writeln!(out, "(analysis in progress)");
        }
        for entry in self.session.transcript().entries() {
            let _ = writeln!(out, "{}", render::transcript_entry(entry));
        }
    }

    fn print_last_entry(&self, out: &mut String) {
        if let Some(entry) = self.session.transcript().entries().last() {
            let _ = writeln!(out, "{}", render::transcript_entry(entry));
        }
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
