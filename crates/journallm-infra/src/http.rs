//! HttpChatTransport -- concrete [`ChatTransport`] for the journal backend.
//!
//! Sends `POST /api/chat/` with a JSON [`ChatRequest`] and reads the
//! `response` field of the reply. Non-success statuses are turned into
//! [`TransportError::Status`] carrying the backend's `detail` string when
//! there is one.
//!
//! No request timeout is set: an exchange waits until the backend answers
//! or the connection fails.

use journallm_core::transport::ChatTransport;
use journallm_types::error::TransportError;
use journallm_types::wire::{ChatRequest, ChatResponse, ErrorBody, HealthResponse};

/// Journal backend client.
pub struct HttpChatTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatTransport {
    const CHAT_PATH: &'static str = "/api/chat/";
    const HEALTH_PATH: &'static str = "/health";

    /// Create a transport for the backend at `base_url`
    /// (e.g. `http://localhost:8000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Use a preconfigured reqwest client (proxies, custom TLS).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probe `GET /health`.
    pub async fn health(&self) -> Result<HealthResponse, TransportError> {
        let response = self
            .client
            .get(self.url(Self::HEALTH_PATH))
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("HTTP request failed: {e}")))?;

        read_json(response).await
    }
}

impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, TransportError> {
        tracing::debug!(
            url = %self.url(Self::CHAT_PATH),
            history_len = request.history.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(self.url(Self::CHAT_PATH))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("HTTP request failed: {e}")))?;

        read_json(response).await
    }
}

/// Decode a success body as `T`, or turn a failure status into
/// [`TransportError::Status`].
async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&error_body)
            .ok()
            .and_then(|body| body.detail_message());
        tracing::debug!(status = status.as_u16(), detail = ?detail, "Backend returned an error");
        return Err(TransportError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| TransportError::Network(format!("failed to read response body: {e}")))?;

    serde_json::from_str(&body)
        .map_err(|e| TransportError::MalformedResponse(format!("failed to parse response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::http::StatusCode;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use journallm_core::exchange::{ChatController, ExchangeOutcome};
    use journallm_types::chat::ChatMessage;
    use journallm_types::error::GENERIC_TRANSPORT_MESSAGE;
    use journallm_types::range::DateRange;
    use serde_json::json;

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn echo_backend() -> Router {
        Router::new()
            .route(
                "/api/chat/",
                post(|Json(req): Json<ChatRequest>| async move {
                    Json(json!({
                        "response": format!("{} ({} prior)", req.message, req.history.len()),
                        "start_date": req.start_date,
                        "end_date": req.end_date,
                    }))
                }),
            )
            .route("/health", get(|| async { Json(json!({"status": "healthy"})) }))
    }

    fn sample_request() -> ChatRequest {
        ChatRequest::new(
            "Hello".to_string(),
            &DateRange::new("2024-01-01", "2024-01-14"),
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn test_send_success() {
        let base = spawn_backend(echo_backend()).await;
        let transport = HttpChatTransport::new(format!("{base}/"));

        let reply = transport.send(&sample_request()).await.unwrap();
        assert_eq!(reply.response, "Hello (0 prior)");
        assert_eq!(reply.start_date.as_deref(), Some("2024-01-01"));
    }

    #[tokio::test]
    async fn test_send_error_with_detail() {
        let router = Router::new().route(
            "/api/chat/",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "server overloaded"})),
                )
            }),
        );
        let transport = HttpChatTransport::new(spawn_backend(router).await);

        let err = transport.send(&sample_request()).await.unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 500,
                detail: Some("server overloaded".to_string()),
            }
        );
        assert_eq!(err.user_message(), "server overloaded");
    }

    #[tokio::test]
    async fn test_send_error_with_list_detail_uses_fallback() {
        let router = Router::new().route(
            "/api/chat/",
            post(|| async {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({"detail": [{"loc": ["body", "message"], "msg": "too short"}]})),
                )
            }),
        );
        let transport = HttpChatTransport::new(spawn_backend(router).await);

        let err = transport.send(&sample_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 422, detail: None }));
        assert_eq!(err.user_message(), GENERIC_TRANSPORT_MESSAGE);
    }

    #[tokio::test]
    async fn test_send_error_without_body() {
        let router = Router::new().route("/api/chat/", post(|| async { StatusCode::BAD_GATEWAY }));
        let transport = HttpChatTransport::new(spawn_backend(router).await);

        let err = transport.send(&sample_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 502, detail: None }));
    }

    #[tokio::test]
    async fn test_send_malformed_body() {
        let router = Router::new().route("/api/chat/", post(|| async { "definitely not json" }));
        let transport = HttpChatTransport::new(spawn_backend(router).await);

        let err = transport.send(&sample_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::MalformedResponse(_)));
        assert_eq!(err.user_message(), GENERIC_TRANSPORT_MESSAGE);
    }

    #[tokio::test]
    async fn test_send_unreachable_backend() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpChatTransport::new(format!("http://{addr}"));
        let err = transport.send(&sample_request()).await.unwrap_err();
        assert!(matches!(err, TransportError::Network(_)));
    }

    #[tokio::test]
    async fn test_health() {
        let transport = HttpChatTransport::new(spawn_backend(echo_backend()).await);
        let health = transport.health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[tokio::test]
    async fn test_controller_over_http() {
        let transport = HttpChatTransport::new(spawn_backend(echo_backend()).await);
        let controller = ChatController::new(transport);
        let range = DateRange::new("2024-01-01", "2024-01-14");

        let first = controller.submit("Hello", &range).await.unwrap();
        let second = controller.submit("And today?", &range).await.unwrap();

        assert_eq!(first, ExchangeOutcome::Replied("Hello (0 prior)".to_string()));
        assert_eq!(
            second,
            ExchangeOutcome::Replied("And today? (2 prior)".to_string())
        );
        assert_eq!(controller.history().len(), 4);
        assert_eq!(controller.history()[0], ChatMessage::user("Hello"));
    }

    #[tokio::test]
    async fn test_controller_over_http_failure() {
        let router = Router::new().route(
            "/api/chat/",
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "server overloaded"})),
                )
            }),
        );
        let controller = ChatController::new(HttpChatTransport::new(spawn_backend(router).await));

        let outcome = controller
            .submit("Hello", &DateRange::new("2024-01-01", "2024-01-14"))
            .await
            .unwrap();

        match outcome {
            ExchangeOutcome::Failed(e) => assert_eq!(e.user_message(), "server overloaded"),
            other => panic!("expected failure, got {other:?}"),
        }
        assert_eq!(controller.history(), vec![ChatMessage::user("Hello")]);
        assert!(!controller.is_pending());
    }
}
