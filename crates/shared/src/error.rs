use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Failure body returned by the backend in place of a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// Extracts the `error` field of a response body when it is set to a
    /// truthy value. Empty strings, `false`, `0` and `null` do not count.
    pub fn from_body(body: &Value) -> Option<Self> {
        let field = body.get("error")?;
        let message = match field {
            Value::Null | Value::Bool(false) => return None,
            Value::String(text) if text.is_empty() => return None,
            Value::Number(number) if number.as_f64() == Some(0.0) => return None,
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        Some(Self::new(message))
    }
}
