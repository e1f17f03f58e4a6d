use thiserror::Error;

/// Rejected locally before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Add steps before running the analysis.")]
    EmptyProcess,
    #[error("No step at row {index}.")]
    UnknownStep { index: usize },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Backend,
    Transport,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("backend error: {0}")]
    Backend(String),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::Backend(_) => ErrorCategory::Backend,
            Self::Transport(_) => ErrorCategory::Transport,
        }
    }

    /// Text shown to the user. None of these end the session.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.to_string(),
            Self::Backend(message) => format!("Analysis error: {message}"),
            Self::Transport(err) => format!("Network error: {err}"),
        }
    }
}
