use std::{
    collections::{HashSet, VecDeque},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::Value;
use shared::protocol::{AnalyzeRequest, ChatRequest, ChatResponse, StepPayload};

use crate::{
    chart::{ChartHandle, ChartRenderer, ChartSpec},
    error::TransportError,
    transport::Backend,
};

type Reply<T> = Result<T, String>;

/// Backend answering from queued replies and recording every request.
#[derive(Default)]
pub struct ScriptedBackend {
    analyze_replies: Mutex<VecDeque<Reply<Value>>>,
    step_replies: Mutex<VecDeque<Reply<Value>>>,
    chat_replies: Mutex<VecDeque<Reply<String>>>,
    pub analyze_requests: Mutex<Vec<AnalyzeRequest>>,
    pub step_requests: Mutex<Vec<StepPayload>>,
    pub chat_requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply_analyze(&self, reply: Reply<Value>) {
        self.analyze_replies.lock().expect("lock").push_back(reply);
    }

    pub fn reply_step(&self, reply: Reply<Value>) {
        self.step_replies.lock().expect("lock").push_back(reply);
    }

    pub fn reply_chat(&self, reply: Reply<String>) {
        self.chat_replies.lock().expect("lock").push_back(reply);
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_requests.lock().expect("lock").len()
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_requests.lock().expect("lock").len()
    }

    fn next<T>(queue: &Mutex<VecDeque<Reply<T>>>) -> Result<T, TransportError> {
        queue
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Err("no scripted reply".to_string()))
            .map_err(TransportError::Unavailable)
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, TransportError> {
        self.analyze_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        Self::next(&self.analyze_replies)
    }

    async fn analyze_step(&self, step: &StepPayload) -> Result<Value, TransportError> {
        self.step_requests.lock().expect("lock").push(step.clone());
        Self::next(&self.step_replies)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        self.chat_requests
            .lock()
            .expect("lock")
            .push(request.clone());
        Self::next(&self.chat_replies).map(|response| ChatResponse { response })
    }
}

#[derive(Debug, Default)]
pub struct ChartLog {
    next: u64,
    pub live: HashSet<ChartHandle>,
    pub max_live: usize,
    pub created: Vec<ChartSpec>,
    pub destroyed: Vec<ChartHandle>,
}

/// Chart renderer that tracks how many charts exist at once.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub log: Arc<Mutex<ChartLog>>,
}

impl RecordingRenderer {
    pub fn new() -> (Box<dyn ChartRenderer>, Arc<Mutex<ChartLog>>) {
        let renderer = Self::default();
        let log = Arc::clone(&renderer.log);
        (Box::new(renderer), log)
    }
}

impl ChartRenderer for RecordingRenderer {
    fn create(&mut self, spec: &ChartSpec) -> ChartHandle {
        let mut log = self.log.lock().expect("lock");
        log.next += 1;
        let handle = ChartHandle(log.next);
        log.live.insert(handle);
        log.max_live = log.max_live.max(log.live.len());
        log.created.push(spec.clone());
        handle
    }

    fn destroy(&mut self, handle: ChartHandle) {
        let mut log = self.log.lock().expect("lock");
        log.live.remove(&handle);
        log.destroyed.push(handle);
    }
}
