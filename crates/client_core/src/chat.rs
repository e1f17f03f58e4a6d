//! Assistant chat: an append-only transcript and the `/api/chat` client.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::protocol::{ChatRequest, ChatResponse};
use tracing::{debug, warn};

use crate::{error::TransportError, markup::Markup, transport::Backend};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Author {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub author: Author,
    pub body: Markup,
    /// The unescaped text for entries built from plain text.
    pub plain: Option<String>,
    pub at: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Text for surfaces that do not interpret markup.
    pub fn plain_text(&self) -> &str {
        self.plain.as_deref().unwrap_or(self.body.as_str())
    }
}

/// Session transcript. Entries are only ever appended.
#[derive(Debug, Default, Clone)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// User text is escaped so it renders literally.
    pub fn push_user(&mut self, text: &str) {
        self.push(Author::User, Markup::text(text), Some(text.to_string()));
    }

    /// Bot replies come from the trusted backend and are kept as markup.
    pub fn push_bot(&mut self, body: Markup) {
        self.push(Author::Bot, body, None);
    }

    /// Client-generated bot text such as notices and errors.
    pub fn push_notice(&mut self, text: &str) {
        self.push(Author::Bot, Markup::text(text), Some(text.to_string()));
    }

    fn push(&mut self, author: Author, body: Markup, plain: Option<String>) {
        self.entries.push(TranscriptEntry {
            author,
            body,
            plain,
            at: Utc::now(),
        });
    }
}

#[derive(Clone)]
pub struct ChatClient {
    backend: Arc<dyn Backend>,
}

impl ChatClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Takes the trimmed message out of `input` and records it in the
    /// transcript. Returns `None`, leaving everything untouched, when the
    /// message is blank.
    pub fn begin(transcript: &mut Transcript, input: &mut String) -> Option<ChatRequest> {
        let message = input.trim().to_string();
        if message.is_empty() {
            return None;
        }
        transcript.push_user(&message);
        input.clear();
        Some(ChatRequest { message })
    }

    pub async fn submit(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        debug!(chars = request.message.len(), "sending chat message");
        self.backend.chat(request).await
    }

    /// Appends the reply, or the failure, as a bot entry. The user's entry
    /// stays either way.
    pub fn finish(transcript: &mut Transcript, outcome: Result<ChatResponse, TransportError>) {
        match outcome {
            Ok(reply) => transcript.push_bot(Markup::trusted(reply.response)),
            Err(err) => {
                warn!(%err, "chat request failed");
                transcript.push_notice(&format!("Chat error: {err}"));
            }
        }
    }

    pub async fn send(&self, transcript: &mut Transcript, input: &mut String) -> bool {
        let Some(request) = Self::begin(transcript, input) else {
            return false;
        };
        let outcome = self.submit(&request).await;
        Self::finish(transcript, outcome);
        true
    }
}

#[cfg(test)]
#[path = "tests/chat_tests.rs"]
mod tests;
