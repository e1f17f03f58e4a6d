//! Single owner of the editable process, the results panel and the chat
//! transcript.
//!
//! Network work is split into a synchronous `begin_*` step that snapshots
//! state into an owned request, and a synchronous `finish_*` step that folds
//! the outcome back in. Callers run the request in between without holding
//! the session, so several requests may overlap. Analysis outcomes are only
//! applied when their ticket is the most recent one issued.

use std::sync::Arc;

use shared::protocol::{AnalysisResult, AnalyzeRequest, ChatRequest, ChatResponse, StepPayload};
use tracing::{info, warn};

use crate::{
    analysis::AnalysisClient,
    chart::ChartRenderer,
    chat::{ChatClient, Transcript},
    editor::{CellEdit, StepEditor, TableView},
    error::{ClientError, TransportError, ValidationError},
    model::{ProcessStep, StepPrefill},
    presenter::{ResultsPresenter, ResultsView},
    store::StepStore,
    transport::Backend,
};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    generation: u64,
    revision: u64,
    request: AnalyzeRequest,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn request(&self) -> &AnalyzeRequest {
        &self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisApplied {
    Presented,
    /// A newer analysis was started after this one; its outcome was dropped.
    Stale,
}

pub struct Session {
    store: StepStore,
    editor: StepEditor,
    presenter: ResultsPresenter,
    transcript: Transcript,
    analysis: AnalysisClient,
    chat: ChatClient,
    issued_generation: u64,
    analysis_in_flight: bool,
}

impl Session {
    pub fn new(
        process_name: impl Into<String>,
        backend: Arc<dyn Backend>,
        renderer: Box<dyn ChartRenderer>,
    ) -> Self {
        let store = StepStore::new();
        let mut editor = StepEditor::new(process_name);
        editor.render(&store);
        Self {
            store,
            editor,
            presenter: ResultsPresenter::new(renderer),
            transcript: Transcript::default(),
            analysis: AnalysisClient::new(Arc::clone(&backend)),
            chat: ChatClient::new(backend),
            issued_generation: 0,
            analysis_in_flight: false,
        }
    }

    pub fn store(&self) -> &StepStore {
        &self.store
    }

    pub fn editor(&self) -> &StepEditor {
        &self.editor
    }

    pub fn table(&self) -> TableView {
        self.editor.view()
    }

    pub fn results(&self) -> &ResultsView {
        self.presenter.view()
    }

    pub fn presenter(&self) -> &ResultsPresenter {
        &self.presenter
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn analysis_client(&self) -> AnalysisClient {
        self.analysis.clone()
    }

    pub fn chat_client(&self) -> ChatClient {
        self.chat.clone()
    }

    pub fn analysis_in_flight(&self) -> bool {
        self.analysis_in_flight
    }

    pub fn add_step(&mut self, prefill: StepPrefill) -> usize {
        self.editor.add_row(&mut self.store, prefill)
    }

    pub fn remove_step(&mut self, index: usize) -> Option<ProcessStep> {
        self.editor.remove_row(&mut self.store, index)
    }

    pub fn clear_steps(&mut self) {
        self.editor.clear(&mut self.store);
    }

    pub fn edit_cell(&mut self, index: usize, edit: CellEdit) -> bool {
        self.editor.edit_cell(index, edit)
    }

    pub fn change_cell(&mut self, index: usize, edit: CellEdit) -> bool {
        self.editor.change_cell(&mut self.store, index, edit)
    }

    pub fn commit_row(&mut self, index: usize) -> bool {
        self.editor.commit_row(&mut self.store, index)
    }

    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, ClientError> {
        let request = AnalysisClient::prepare(&mut self.editor, &mut self.store)?;
        self.issued_generation += 1;
        self.analysis_in_flight = true;
        Ok(AnalysisTicket {
            generation: self.issued_generation,
            revision: self.store.revision(),
            request,
        })
    }

    /// Applies an outcome if `ticket` is still current. Failures leave the
    /// model and any earlier results untouched.
    pub fn finish_analysis(
        &mut self,
        ticket: &AnalysisTicket,
        outcome: Result<AnalysisResult, ClientError>,
    ) -> Result<AnalysisApplied, ClientError> {
        if ticket.generation != self.issued_generation {
            warn!(
                generation = ticket.generation,
                latest = self.issued_generation,
                "discarding stale analysis response"
            );
            return Ok(AnalysisApplied::Stale);
        }
        self.analysis_in_flight = false;

        let result = outcome?;
        self.presenter.present(&result);
        AnalysisClient::apply(&mut self.editor, &mut self.store, &result, ticket.revision);
        self.transcript.push_notice(&format!(
            "Analysis complete. Lead time: {} h, VA ratio: {}%",
            result.summary.lead_time, result.summary.va_ratio
        ));
        Ok(AnalysisApplied::Presented)
    }

    pub async fn analyze(&mut self) -> Result<AnalysisApplied, ClientError> {
        let ticket = self.begin_analysis()?;
        let outcome = self.analysis.submit(ticket.request()).await;
        self.finish_analysis(&ticket, outcome)
    }

    /// Flushes pending input and snapshots one step for a wait prediction.
    pub fn prediction_request(&mut self, index: usize) -> Result<StepPayload, ValidationError> {
        self.editor.flush_pending(&mut self.store);
        self.store
            .get(index)
            .map(ProcessStep::to_payload)
            .ok_or(ValidationError::UnknownStep { index })
    }

    pub fn begin_chat(&mut self, input: &mut String) -> Option<ChatRequest> {
        ChatClient::begin(&mut self.transcript, input)
    }

    pub fn finish_chat(&mut self, outcome: Result<ChatResponse, TransportError>) {
        ChatClient::finish(&mut self.transcript, outcome);
    }

    pub async fn send_chat(&mut self, input: &mut String) -> bool {
        let Some(request) = self.begin_chat(input) else {
            return false;
        };
        let outcome = self.chat.submit(&request).await;
        self.finish_chat(outcome);
        info!(entries = self.transcript.len(), "chat exchange recorded");
        true
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
