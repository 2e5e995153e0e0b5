//! MindMate chat client struct and builder.

use std::pin::Pin;
use std::time::Duration;

use futures::{Stream, StreamExt};
use mindmate_stream::{deltas, text_chunks};

use crate::error::{ChatError, map_body_error, map_http_status, map_reqwest_error};
use crate::mapping::to_api_request;
use crate::types::{ChatMessage, Mood};

/// Default model used for replies.
const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// Default AI gateway base URL.
const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev";

/// Default time allowed for the response headers to arrive.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable holding the API key (required by [`MindMate::from_env`]).
pub const API_KEY_VAR: &str = "MINDMATE_API_KEY";
/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "MINDMATE_BASE_URL";
/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "MINDMATE_MODEL";
/// Environment variable overriding the header timeout, in whole seconds.
pub const TIMEOUT_VAR: &str = "MINDMATE_TIMEOUT_SECS";

/// A streamed reply: content deltas in order.
pub type ReplyStream = Pin<Box<dyn Stream<Item = Result<String, ChatError>> + Send>>;

/// Client for an OpenAI-compatible chat completions endpoint, speaking as MindMate.
///
/// # Example
///
/// ```no_run
/// use mindmate_chat::{ChatMessage, MindMate, Mood};
///
/// # async fn run() -> Result<(), mindmate_chat::ChatError> {
/// let client = MindMate::new("key").model("google/gemini-3-flash-preview");
/// let reply = client
///     .reply(&[ChatMessage::user("I feel lonely at college")], Some(Mood::Anxious), |delta| {
///         print!("{delta}");
///     })
///     .await?;
/// println!("\n({} characters)", reply.len());
/// # Ok(())
/// # }
/// ```
pub struct MindMate {
    /// Bearer token for the gateway.
    pub(crate) api_key: String,
    /// Model identifier.
    pub(crate) model: String,
    /// API base URL (override for testing or proxies).
    pub(crate) base_url: String,
    /// Time allowed for the response headers to arrive.
    pub(crate) timeout: Duration,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl MindMate {
    /// Create a new client with the given API key and sensible defaults.
    ///
    /// Default model: `google/gemini-3-flash-preview`.
    /// Default base URL: `https://ai.gateway.lovable.dev`.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: DEFAULT_TIMEOUT,
            client: reqwest::Client::new(),
        }
    }

    /// Build a client from `MINDMATE_*` environment variables.
    ///
    /// `MINDMATE_API_KEY` is required; `MINDMATE_BASE_URL`, `MINDMATE_MODEL`
    /// and `MINDMATE_TIMEOUT_SECS` are optional overrides.
    pub fn from_env() -> Result<Self, ChatError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_vars(get: impl Fn(&str) -> Option<String>) -> Result<Self, ChatError> {
        let api_key = get(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ChatError::MissingApiKey(API_KEY_VAR))?;

        let set = |name: &str| get(name).filter(|value: &String| !value.trim().is_empty());

        let mut client = Self::new(api_key);
        if let Some(url) = set(BASE_URL_VAR) {
            client = client.base_url(url);
        }
        if let Some(model) = set(MODEL_VAR) {
            client = client.model(model);
        }
        if let Some(raw) = get(TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) => client = client.timeout(Duration::from_secs(secs)),
                Err(e) => tracing::warn!(value = %raw, error = %e, "ignoring invalid MINDMATE_TIMEOUT_SECS"),
            }
        }
        Ok(client)
    }

    /// Override the model.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    ///
    /// Useful for testing with a local mock server or routing through a proxy.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override how long to wait for the response headers.
    ///
    /// Streaming the body afterwards is not time-limited.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the chat completions endpoint URL.
    pub(crate) fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Send the conversation and return the reply as a stream of deltas.
    ///
    /// Non-success statuses are mapped to [`ChatError`] before any body is
    /// streamed. Errors while reading the body end the stream with
    /// [`ChatError::Stream`].
    pub async fn reply_stream(
        &self,
        messages: &[ChatMessage],
        mood: Option<Mood>,
    ) -> Result<ReplyStream, ChatError> {
        let url = self.completions_url();
        let body = to_api_request(messages, mood, &self.model);
        let timeout = self.timeout;

        tracing::debug!(url = %url, model = %body["model"], messages = messages.len(), "sending streaming chat request");

        let request = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send();

        let response = tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| ChatError::Timeout(timeout))?
            .map_err(|e| map_reqwest_error(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .map_err(|e| map_reqwest_error(e, timeout))?;
            tracing::debug!(status = status.as_u16(), "chat request rejected");
            return Err(map_http_status(status, &body_text));
        }

        let stream = deltas(text_chunks(response.bytes_stream()))
            .map(move |delta| delta.map_err(|e| map_body_error(e, timeout)));
        Ok(Box::pin(stream))
    }

    /// Send the conversation, call `on_delta` for every piece of the reply as
    /// it arrives, and return the full reply.
    pub async fn reply<F>(
        &self,
        messages: &[ChatMessage],
        mood: Option<Mood>,
        mut on_delta: F,
    ) -> Result<String, ChatError>
    where
        F: FnMut(&str),
    {
        let mut stream = self.reply_stream(messages, mood).await?;
        let mut text = String::new();

        while let Some(delta) = stream.next().await {
            let delta = delta?;
            on_delta(&delta);
            text.push_str(&delta);
        }

        tracing::debug!(len = text.len(), "reply complete");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_are_set() {
        let client = MindMate::new("test-key");
        assert_eq!(client.model, DEFAULT_MODEL);
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert_eq!(client.api_key, "test-key");
    }

    #[test]
    fn builder_overrides() {
        let client = MindMate::new("k")
            .model("openai/gpt-5-mini")
            .base_url("http://localhost:9999")
            .timeout(Duration::from_secs(5));
        assert_eq!(client.model, "openai/gpt-5-mini");
        assert_eq!(client.base_url, "http://localhost:9999");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn completions_url_includes_path() {
        let client = MindMate::new("k").base_url("http://localhost:9999/");
        assert_eq!(
            client.completions_url(),
            "http://localhost:9999/v1/chat/completions"
        );
    }

    #[test]
    fn from_vars_requires_api_key() {
        let err = MindMate::from_vars(vars(&[])).err().unwrap();
        assert!(matches!(err, ChatError::MissingApiKey(API_KEY_VAR)));

        let err = MindMate::from_vars(vars(&[(API_KEY_VAR, "  ")])).err().unwrap();
        assert!(matches!(err, ChatError::MissingApiKey(_)));
    }

    #[test]
    fn from_vars_applies_overrides() {
        let client = MindMate::from_vars(vars(&[
            (API_KEY_VAR, "secret"),
            (BASE_URL_VAR, "http://gateway.local"),
            (MODEL_VAR, "custom/model"),
            (TIMEOUT_VAR, "15"),
        ]))
        .unwrap();
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.base_url, "http://gateway.local");
        assert_eq!(client.model, "custom/model");
        assert_eq!(client.timeout, Duration::from_secs(15));
    }

    #[test]
    fn from_vars_ignores_blank_overrides() {
        let client = MindMate::from_vars(vars(&[
            (API_KEY_VAR, "k"),
            (BASE_URL_VAR, ""),
            (MODEL_VAR, "   "),
        ]))
        .unwrap();
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
        assert_eq!(client.model, DEFAULT_MODEL);
    }

    #[test]
    fn from_vars_ignores_bad_timeout() {
        let client =
            MindMate::from_vars(vars(&[(API_KEY_VAR, "k"), (TIMEOUT_VAR, "soon")])).unwrap();
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
    }
}
