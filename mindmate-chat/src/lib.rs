#![doc = include_str!("../README.md")]

pub mod client;
pub(crate) mod error;
pub(crate) mod mapping;
pub mod prompt;
pub mod session;
pub mod types;

pub use client::{MindMate, ReplyStream};
pub use error::ChatError;
pub use mapping::to_api_request;
pub use prompt::{SUGGESTED_PROMPTS, SYSTEM_PROMPT, system_prompt};
pub use session::ChatSession;
pub use types::{ChatMessage, Mood, ParseMoodError, Role};

// Re-export the decoder for callers that bring their own transport
pub use mindmate_stream;
