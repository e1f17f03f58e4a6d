//! Events fed into the single UI loop: typed lines and network completions.

use client_core::{AnalysisTicket, ClientError, TransportError};
use shared::protocol::{AnalysisResult, ChatResponse, StepPrediction};

pub enum AppEvent {
    Input(String),
    InputClosed,
    AnalysisFinished {
        ticket: AnalysisTicket,
        outcome: Result<AnalysisResult, ClientError>,
    },
    ChatFinished(Result<ChatResponse, TransportError>),
    PredictionFinished {
        index: usize,
        outcome: Result<StepPrediction, ClientError>,
    },
}
