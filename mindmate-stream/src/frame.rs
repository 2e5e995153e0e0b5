//! Classification of a single event-stream line.
//!
//! The stream follows the line-oriented convention used by OpenAI-compatible
//! chat completion endpoints:
//!
//! ```text
//! : keep-alive
//!
//! data: {"choices":[{"delta":{"content":"Hi"}}]}
//!
//! data: [DONE]
//! ```

/// Prefix that marks a data frame. The trailing space is part of the prefix.
pub const DATA_PREFIX: &str = "data: ";

/// Payload that marks the end of the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One newline-delimited line of the stream, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// Line starting with `:` (keep-alive or comment).
    Comment,
    /// Anything else that is not a data frame (`event:`, `id:`, `retry:`, noise).
    Ignored,
    /// The `[DONE]` sentinel.
    Done,
    /// A data frame; holds the trimmed payload.
    Data(&'a str),
}

impl<'a> Frame<'a> {
    /// Classify a line with its `\n` already removed.
    ///
    /// A single trailing `\r` is stripped before any other rule applies.
    pub fn classify(line: &'a str) -> Self {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() {
            return Frame::Blank;
        }
        if line.starts_with(':') {
            return Frame::Comment;
        }
        let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
            return Frame::Ignored;
        };

        let payload = payload.trim();
        if payload == DONE_SENTINEL {
            Frame::Done
        } else {
            Frame::Data(payload)
        }
    }
}

/// Pull the text delta out of a parsed chat completion chunk.
///
/// Reads `choices[0].delta.content`. Role-only frames, finish frames, and
/// frames whose content is `null` or empty yield `None`.
pub fn content_delta(json: &serde_json::Value) -> Option<&str> {
    json["choices"]
        .as_array()
        .and_then(|choices| choices.first())
        .and_then(|choice| choice["delta"]["content"].as_str())
        .filter(|content| !content.is_empty())
}
