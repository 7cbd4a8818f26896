//! Chat exchange controller.
//!
//! `ChatController` owns the conversation history and the pending flag, and
//! runs one backend request per accepted user turn:
//!
//! 1. `begin` validates the input, appends the user message and raises the
//!    pending flag, all before anything is awaited.
//! 2. `PendingExchange::complete` sends the request with the history as it
//!    was before step 1, then appends the assistant reply on success.
//!
//! A failed request leaves the user message in place; only the assistant
//! turn is missing. The pending flag is lowered when the `PendingExchange`
//! is dropped, so it comes down on every path, including cancellation.

use std::sync::{Mutex, MutexGuard, PoisonError};

use journallm_types::chat::ChatMessage;
use journallm_types::config::StaleReplyPolicy;
use journallm_types::error::{TransportError, ValidationError};
use journallm_types::range::DateRange;
use journallm_types::wire::{ChatRequest, ChatResponse};
use tracing::{info, warn};
use uuid::Uuid;

use crate::transport::ChatTransport;

/// How an accepted exchange ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeOutcome {
    /// The backend replied; the reply is now the last history entry.
    Replied(String),
    /// The request failed; history still ends with the user message.
    Failed(TransportError),
    /// The backend replied after the conversation was cleared and the reply
    /// was dropped under [`StaleReplyPolicy::Discard`].
    Discarded,
}

#[derive(Debug, Default)]
struct ConversationState {
    history: Vec<ChatMessage>,
    pending: bool,
    /// Bumped by every `clear()`.
    generation: u64,
    /// Assistant replies recorded since the last clear.
    turns: u32,
}

/// Drives request/response exchanges for a single conversation.
///
/// Generic over `ChatTransport` so the same controller runs against the
/// HTTP backend or an in-memory stand-in.
pub struct ChatController<T: ChatTransport> {
    transport: T,
    state: Mutex<ConversationState>,
    stale_replies: StaleReplyPolicy,
    conversation_id: Uuid,
}

impl<T: ChatTransport> ChatController<T> {
    /// Create a controller with an empty history and the default
    /// stale-reply policy.
    pub fn new(transport: T) -> Self {
        Self::with_policy(transport, StaleReplyPolicy::default())
    }

    pub fn with_policy(transport: T, stale_replies: StaleReplyPolicy) -> Self {
        Self {
            transport,
            state: Mutex::new(ConversationState::default()),
            stale_replies,
            conversation_id: Uuid::now_v7(),
        }
    }

    /// Access the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Identifier attached to this conversation's log lines.
    pub fn conversation_id(&self) -> Uuid {
        self.conversation_id
    }

    /// Snapshot of the conversation history.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.state().history.clone()
    }

    /// Whether an exchange is in flight.
    pub fn is_pending(&self) -> bool {
        self.state().pending
    }

    /// Completed turns since the last clear.
    pub fn turn_count(&self) -> u32 {
        self.state().turns
    }

    /// Empty the history.
    ///
    /// An exchange already in flight is not cancelled and the pending flag
    /// is untouched; its reply is handled per the stale-reply policy.
    pub fn clear(&self) {
        let mut state = self.state();
        let dropped = state.history.len();
        state.history.clear();
        state.turns = 0;
        state.generation += 1;
        info!(
            conversation = %self.conversation_id,
            dropped,
            in_flight = state.pending,
            "Conversation cleared"
        );
    }

    /// Validate and accept a user turn.
    ///
    /// On success the user message is already in the history and the
    /// pending flag is raised; call [`PendingExchange::complete`] to send
    /// the request. On rejection nothing has changed.
    ///
    /// Checks run in order: empty message, pending exchange, missing dates,
    /// inverted range.
    pub fn begin(
        &self,
        message: &str,
        range: &DateRange,
    ) -> Result<PendingExchange<'_, T>, ValidationError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ValidationError::EmptyMessage);
        }

        let mut state = self.state();
        if state.pending {
            return Err(ValidationError::ExchangePending);
        }
        range.validate()?;

        let prior_turns = state.history.clone();
        state.history.push(ChatMessage::user(message));
        state.pending = true;
        let generation = state.generation;
        drop(state);

        info!(
            conversation = %self.conversation_id,
            start = %range.start,
            end = %range.end,
            history_len = prior_turns.len(),
            "Exchange accepted"
        );

        Ok(PendingExchange {
            controller: self,
            request: ChatRequest::new(message.to_string(), range, prior_turns),
            generation,
        })
    }

    /// Run a full exchange: [`begin`](Self::begin) then
    /// [`complete`](PendingExchange::complete).
    ///
    /// Validation and the optimistic append run when `submit` is called,
    /// not on first poll: once it returns, an accepted message is already
    /// in the history and the pending flag is up. A rejection is reported
    /// when the returned future is awaited.
    pub fn submit(
        &self,
        message: &str,
        range: &DateRange,
    ) -> impl std::future::Future<Output = Result<ExchangeOutcome, ValidationError>> + '_ {
        let begun = self.begin(message, range);
        async move { Ok(begun?.complete().await) }
    }

    fn reconcile(
        &self,
        generation: u64,
        result: Result<ChatResponse, TransportError>,
    ) -> ExchangeOutcome {
        let mut state = self.state();
        let stale = state.generation != generation;

        match result {
            Ok(reply) => {
                if stale && self.stale_replies == StaleReplyPolicy::Discard {
                    warn!(
                        conversation = %self.conversation_id,
                        "Reply arrived after clear, discarding"
                    );
                    return ExchangeOutcome::Discarded;
                }
                state.history.push(ChatMessage::assistant(reply.response.clone()));
                state.turns += 1;
                info!(
                    conversation = %self.conversation_id,
                    turns = state.turns,
                    stale,
                    "Reply recorded"
                );
                ExchangeOutcome::Replied(reply.response)
            }
            Err(e) => {
                warn!(conversation = %self.conversation_id, error = %e, "Exchange failed");
                ExchangeOutcome::Failed(e)
            }
        }
    }

    fn state(&self) -> MutexGuard<'_, ConversationState> {
        // The lock is never held across an await or a user callback, so a
        // poisoned guard still holds consistent data.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// An accepted turn whose request has not completed yet.
///
/// Holds the pending flag up for as long as it lives.
pub struct PendingExchange<'a, T: ChatTransport> {
    controller: &'a ChatController<T>,
    request: ChatRequest,
    generation: u64,
}

impl<T: ChatTransport> PendingExchange<'_, T> {
    /// The request that will be sent.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Send the request and fold the result into the history.
    pub async fn complete(self) -> ExchangeOutcome {
        let result = self.controller.transport.send(&self.request).await;
        self.controller.reconcile(self.generation, result)
    }
}

impl<T: ChatTransport> Drop for PendingExchange<'_, T> {
    fn drop(&mut self) {
        self.controller.state().pending = false;
    }
}
