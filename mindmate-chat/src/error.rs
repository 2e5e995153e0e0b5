//! Chat errors and the mapping from HTTP/reqwest failures.

use std::time::Duration;

/// Errors from a support-chat exchange.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    // Retryable errors
    /// The backend is throttling requests (HTTP 429).
    #[error("rate limited: {0}")]
    RateLimited(String),
    /// Could not reach the backend (DNS, connect, TLS, reset).
    #[error("network error: {0}")]
    Network(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// Request timed out.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
    /// The response body failed while the reply was streaming.
    #[error("stream error: {0}")]
    Stream(#[source] Box<dyn std::error::Error + Send + Sync>),

    // Terminal errors
    /// The backend's credits or plan are exhausted (HTTP 402).
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    /// Any other non-success response.
    #[error("upstream returned HTTP {status}: {message}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, or the raw body.
        message: String,
    },
    /// The user tried to send a blank message.
    #[error("message is empty")]
    EmptyMessage,
    /// No API key was configured.
    #[error("missing API key: set {0}")]
    MissingApiKey(&'static str),
}

impl ChatError {
    /// Whether the same request may succeed if sent again later.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited(_) | Self::Network(_) | Self::Timeout(_) | Self::Stream(_)
        )
    }

    /// Text suitable for showing to the student.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::RateLimited(_) => {
                "I'm getting a lot of messages right now. Please try again in a moment. 💚"
            }
            Self::ServiceUnavailable(_) => {
                "The chat service is temporarily unavailable. Please try again later."
            }
            Self::Network(_) | Self::Timeout(_) => "Failed to connect. Please try again.",
            Self::Upstream { .. } | Self::Stream(_) => "Something went wrong. Please try again.",
            Self::EmptyMessage => "Please enter a message.",
            Self::MissingApiKey(_) => "The chat service is not configured.",
        }
    }
}

/// Map a non-success HTTP status to a [`ChatError`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    let message = error_message(body);
    match status.as_u16() {
        429 => ChatError::RateLimited(message),
        402 => ChatError::ServiceUnavailable(message),
        code => ChatError::Upstream {
            status: code,
            message,
        },
    }
}

/// Pull a readable message out of an error body.
///
/// Accepts `{"error": "..."}` and `{"error": {"message": "..."}}`; anything
/// else is returned as-is.
fn error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };
    json["error"]
        .as_str()
        .or_else(|| json["error"]["message"].as_str())
        .map_or_else(|| body.to_string(), str::to_string)
}

/// Map a [`reqwest::Error`] raised before the response arrived.
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Duration) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(timeout)
    } else {
        ChatError::Network(Box::new(err))
    }
}

/// Map a [`reqwest::Error`] raised while reading the streamed body.
pub(crate) fn map_body_error(err: reqwest::Error, timeout: Duration) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(timeout)
    } else {
        ChatError::Stream(Box::new(err))
    }
}
