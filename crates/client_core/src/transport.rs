//! Network seam to the analysis and chat endpoints.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{AnalyzeRequest, ChatRequest, ChatResponse, StepPayload};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

pub const ANALYZE_PATH: &str = "/api/analyze";
pub const ANALYZE_STEP_PATH: &str = "/api/analyze_step";
pub const CHAT_PATH: &str = "/api/chat";

/// Raw request/response calls. Bodies are returned undecoded where the
/// backend may answer with an `{error}` object instead of a result.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, TransportError>;
    async fn analyze_step(&self, step: &StepPayload) -> Result<Value, TransportError>;
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError>;
}

pub struct MissingBackend;

#[async_trait]
impl Backend for MissingBackend {
    async fn analyze(&self, _request: &AnalyzeRequest) -> Result<Value, TransportError> {
        Err(TransportError::Unavailable(
            "analysis backend is unavailable".to_string(),
        ))
    }

    async fn analyze_step(&self, _step: &StepPayload) -> Result<Value, TransportError> {
        Err(TransportError::Unavailable(
            "analysis backend is unavailable".to_string(),
        ))
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        Err(TransportError::Unavailable(
            "chat backend is unavailable".to_string(),
        ))
    }
}

/// JSON over HTTP. Non-2xx statuses are not errors here: the backend reports
/// failures in the body and those are classified by the caller.
#[derive(Clone)]
pub struct HttpBackend {
    http: Client,
    server_url: String,
}

impl HttpBackend {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(server_url)?;
        Ok(Self {
            http: Client::new(),
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn post_json<T: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> Result<Value, TransportError> {
        let url = format!("{}{path}", self.server_url);
        debug!(%url, "posting request");
        let res = self.http.post(url).json(body).send().await?;
        let bytes = res.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, TransportError> {
        self.post_json(ANALYZE_PATH, request).await
    }

    async fn analyze_step(&self, step: &StepPayload) -> Result<Value, TransportError> {
        self.post_json(ANALYZE_STEP_PATH, step).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        let body = self.post_json(CHAT_PATH, request).await?;
        Ok(serde_json::from_value(body)?)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
