//! Conversation and mood types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The student using the app.
    User,
    /// MindMate.
    Assistant,
    /// Instructions prepended to the conversation.
    System,
}

/// One message in a support conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote it.
    pub role: Role,
    /// Plain text (markdown allowed for assistant replies).
    pub content: String,
}

impl ChatMessage {
    /// A message from the user.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// A message from the assistant.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// A system instruction.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// A mood the student can log before chatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// 😊
    Happy,
    /// 😐
    Neutral,
    /// 😟
    Stressed,
    /// 😰
    Anxious,
    /// 😴
    Tired,
    /// 😡
    Angry,
}

impl Mood {
    /// Every mood, in picker order.
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Stressed,
        Mood::Anxious,
        Mood::Tired,
        Mood::Angry,
    ];

    /// Wire name, as sent to the chat backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Stressed => "stressed",
            Mood::Anxious => "anxious",
            Mood::Tired => "tired",
            Mood::Angry => "angry",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Stressed => "Stressed",
            Mood::Anxious => "Anxious",
            Mood::Tired => "Tired",
            Mood::Angry => "Angry",
        }
    }

    /// Emoji shown next to the label.
    #[must_use]
    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Neutral => "😐",
            Mood::Stressed => "😟",
            Mood::Anxious => "😰",
            Mood::Tired => "😴",
            Mood::Angry => "😡",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`Mood`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mood: {0:?}")]
pub struct ParseMoodError(pub String);

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}
