//! Submission of the process model to `/api/analyze` and folding of the
//! scheduled wait times back into the model.

use std::sync::Arc;

use serde_json::Value;
use shared::protocol::{
    AnalysisResult, AnalyzeRequest, AnalyzeResponse, StepPayload, StepPrediction,
    StepPredictionResponse,
};
use tracing::{debug, info};

use crate::{
    editor::StepEditor,
    error::{ClientError, TransportError, ValidationError},
    store::StepStore,
    transport::Backend,
};

#[derive(Clone)]
pub struct AnalysisClient {
    backend: Arc<dyn Backend>,
}

impl AnalysisClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Commits unflushed table input, then snapshots the model into a request.
    /// Fails without touching the network when there are no steps.
    pub fn prepare(
        editor: &mut StepEditor,
        store: &mut StepStore,
    ) -> Result<AnalyzeRequest, ValidationError> {
        editor.flush_pending(store);
        if store.is_empty() {
            return Err(ValidationError::EmptyProcess);
        }
        Ok(AnalyzeRequest {
            process_name: editor.process_name().to_string(),
            steps: store.payload(),
        })
    }

    /// One network call. The model is never touched here.
    pub async fn submit(&self, request: &AnalyzeRequest) -> Result<AnalysisResult, ClientError> {
        debug!(steps = request.steps.len(), "submitting analysis");
        classify_analysis(self.backend.analyze(request).await)
    }

    /// Commits input typed while the request was out, writes each echoed wait
    /// back into the step at the same position and re-renders the table.
    /// `snapshot` is the store revision the request was built from.
    pub fn apply(
        editor: &mut StepEditor,
        store: &mut StepStore,
        result: &AnalysisResult,
        snapshot: u64,
    ) {
        editor.flush_pending(store);
        let written = store.write_back_wait_times(&result.steps, snapshot);
        editor.render(store);
        info!(
            lead_time = result.summary.lead_time,
            va_ratio = result.summary.va_ratio,
            written,
            "analysis applied"
        );
    }

    pub async fn analyze(
        &self,
        editor: &mut StepEditor,
        store: &mut StepStore,
    ) -> Result<AnalysisResult, ClientError> {
        let request = Self::prepare(editor, store)?;
        let snapshot = store.revision();
        let result = self.submit(&request).await?;
        Self::apply(editor, store, &result, snapshot);
        Ok(result)
    }

    pub async fn predict_wait(&self, step: &StepPayload) -> Result<StepPrediction, ClientError> {
        debug!(name = %step.name, "requesting wait prediction");
        match StepPredictionResponse::from_value(self.backend.analyze_step(step).await?)
            .map_err(TransportError::from)?
        {
            StepPredictionResponse::Predicted(prediction) => Ok(prediction),
            StepPredictionResponse::Failed(err) => Err(ClientError::Backend(err.error)),
        }
    }
}

pub fn classify_analysis(
    outcome: Result<Value, TransportError>,
) -> Result<AnalysisResult, ClientError> {
    match AnalyzeResponse::from_value(outcome?).map_err(TransportError::from)? {
        AnalyzeResponse::Completed(result) => Ok(result),
        AnalyzeResponse::Failed(err) => Err(ClientError::Backend(err.error)),
    }
}

#[cfg(test)]
#[path = "tests/analysis_tests.rs"]
mod tests;
