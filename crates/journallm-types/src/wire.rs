//! Request/response bodies for the backend chat endpoint.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::range::DateRange;

/// Body of `POST /api/chat/`.
///
/// `history` holds the turns *before* `message`; the backend appends the
/// new message itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(message: String, range: &DateRange, history: Vec<ChatMessage>) -> Self {
        Self {
            message,
            start_date: range.start.clone(),
            end_date: range.end.clone(),
            history,
        }
    }
}

/// Successful reply. The backend echoes the dates back; only `response`
/// is read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// Error body of a non-success response.
///
/// `detail` is kept as raw JSON because request-validation failures carry a
/// list there instead of a string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// The `detail` field when it is a plain string.
    pub fn detail_message(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_serialize() {
        let request = ChatRequest::new(
            "How did I sleep?".to_string(),
            &DateRange::new("2024-01-01", "2024-01-14"),
            vec![ChatMessage::user("Hello"), ChatMessage::assistant("Hi there")],
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "message": "How did I sleep?",
                "start_date": "2024-01-01",
                "end_date": "2024-01-14",
                "history": [
                    {"role": "user", "content": "Hello"},
                    {"role": "assistant", "content": "Hi there"},
                ],
            })
        );
    }

    #[test]
    fn test_chat_response_ignores_echoed_dates() {
        let body = r#"{"response":"Hi there","start_date":"2024-01-01","end_date":"2024-01-14"}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.response, "Hi there");
    }

    #[test]
    fn test_error_body_string_detail() {
        let parsed: ErrorBody = serde_json::from_str(r#"{"detail":"server overloaded"}"#).unwrap();
        assert_eq!(parsed.detail_message().as_deref(), Some("server overloaded"));
    }

    #[test]
    fn test_error_body_list_detail_is_ignored() {
        let parsed: ErrorBody =
            serde_json::from_str(r#"{"detail":[{"loc":["body","message"],"msg":"too short"}]}"#)
                .unwrap();
        assert_eq!(parsed.detail_message(), None);
    }
}
