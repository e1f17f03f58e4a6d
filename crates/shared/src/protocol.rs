use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;

/// One step as submitted for analysis. Wait time is a result and is never sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPayload {
    pub name: String,
    pub cycle_time: f64,
    pub cost: f64,
    pub value_added: bool,
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub process_name: String,
    pub steps: Vec<StepPayload>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub lead_time: f64,
    pub va_ratio: f64,
    #[serde(default)]
    pub total_wait_time: f64,
}

/// Per-step echo of the submitted process, in the backend's scheduling order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepEcho {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait: Option<f64>,
}

impl StepEcho {
    /// Scheduled wait for this step.
    ///
    /// Older backends report it under `wait_time` or `wait` instead of
    /// `start_time`; the first field present wins. Absent everywhere means 0.
    pub fn scheduled_wait(&self) -> f64 {
        self.start_time
            .or(self.wait_time)
            .or(self.wait)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub name: String,
    #[serde(default)]
    pub wait: f64,
    #[serde(default)]
    pub cycle: f64,
}

/// Successful analysis body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Summary,
    #[serde(default)]
    pub steps: Vec<StepEcho>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub ai_report: String,
    #[serde(default)]
    pub alerts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalyzeResponse {
    Completed(AnalysisResult),
    Failed(ApiError),
}

impl AnalyzeResponse {
    /// Classifies a raw response body. A truthy `error` field takes precedence
    /// over any result fields that may also be present.
    pub fn from_value(body: Value) -> Result<Self, serde_json::Error> {
        if let Some(err) = ApiError::from_body(&body) {
            return Ok(Self::Failed(err));
        }
        serde_json::from_value(body).map(Self::Completed)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepPrediction {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub predicted_wait_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepPredictionResponse {
    Predicted(StepPrediction),
    Failed(ApiError),
}

impl StepPredictionResponse {
    pub fn from_value(body: Value) -> Result<Self, serde_json::Error> {
        if let Some(err) = ApiError::from_body(&body) {
            return Ok(Self::Failed(err));
        }
        serde_json::from_value(body).map(Self::Predicted)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
