//! ChatTransport trait definition.
//!
//! The single outbound call the controller makes per accepted turn.
//! Uses native async fn in traits (RPITIT, Rust 2024 edition), the same
//! way the repository ports do.

use journallm_types::error::TransportError;
use journallm_types::wire::{ChatRequest, ChatResponse};

/// Carries a [`ChatRequest`] to the journal backend.
///
/// Implementations live in journallm-infra (e.g., `HttpChatTransport`).
/// Any non-success outcome, including an unreadable body, must come back
/// as a [`TransportError`] rather than a panic.
pub trait ChatTransport: Send + Sync {
    /// Send one chat request and wait for the reply, however long it takes.
    fn send(
        &self,
        request: &ChatRequest,
    ) -> impl std::future::Future<Output = Result<ChatResponse, TransportError>> + Send;
}
