//! Request mapping for the OpenAI-compatible chat completions endpoint.

use serde_json::{Value, json};

use crate::prompt::system_prompt;
use crate::types::{ChatMessage, Mood};

/// Build a streaming chat completion request body.
///
/// The system prompt (with mood context, if any) is always the first message,
/// followed by the conversation in order.
pub fn to_api_request(messages: &[ChatMessage], mood: Option<Mood>, model: &str) -> Value {
    let mut api_messages = Vec::with_capacity(messages.len() + 1);
    api_messages.push(json!(ChatMessage::system(system_prompt(mood))));
    api_messages.extend(messages.iter().map(|m| json!(m)));

    json!({
        "model": model,
        "messages": api_messages,
        "stream": true,
    })
}
