use thiserror::Error;

/// Shown when the backend gives no usable `detail` for a failure.
pub const GENERIC_TRANSPORT_MESSAGE: &str = "Failed to get a response from the assistant";

/// Reasons a submission is refused before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("message is empty")]
    EmptyMessage,

    #[error("an exchange is already in flight")]
    ExchangePending,

    #[error("Please select both start and end dates")]
    MissingDateRange,

    #[error("Start date must be on or before end date")]
    StartAfterEnd,
}

impl ValidationError {
    /// Whether the front end should stay quiet about this rejection.
    ///
    /// Empty input and input typed while a reply is pending are dropped
    /// without an error banner.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            ValidationError::EmptyMessage | ValidationError::ExchangePending
        )
    }
}

/// Failures of the single backend request made per exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Network(String),

    #[error("backend returned HTTP {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Text to show the user: the backend's `detail` when it sent one,
    /// otherwise [`GENERIC_TRANSPORT_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Status {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_TRANSPORT_MESSAGE.to_string(),
        }
    }
}

/// Errors from client configuration and command-line input.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("invalid api url '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}
