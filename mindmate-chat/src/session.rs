//! A running support conversation.

use futures::StreamExt;

use crate::client::MindMate;
use crate::error::ChatError;
use crate::types::{ChatMessage, Mood};

/// Conversation state for one student talking to MindMate.
///
/// `send` takes `&mut self`, so a second message cannot be sent while a reply
/// is still streaming.
pub struct ChatSession {
    client: MindMate,
    mood: Option<Mood>,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    /// Start an empty conversation.
    #[must_use]
    pub fn new(client: MindMate) -> Self {
        Self {
            client,
            mood: None,
            messages: Vec::new(),
        }
    }

    /// Start a conversation with a logged mood as context.
    #[must_use]
    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.mood = Some(mood);
        self
    }

    /// Messages exchanged so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The mood sent as context with every request.
    #[must_use]
    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    /// Change the mood context for subsequent messages.
    pub fn set_mood(&mut self, mood: Option<Mood>) {
        self.mood = mood;
    }

    /// Forget the conversation. The mood is kept.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Send a message and stream the reply through `on_delta`.
    ///
    /// Blank input is rejected without touching the history. The user message
    /// stays in the history even if the reply fails; a reply that failed
    /// partway is kept with whatever text arrived, and an empty reply is never
    /// recorded.
    pub async fn send<F>(&mut self, text: &str, mut on_delta: F) -> Result<String, ChatError>
    where
        F: FnMut(&str),
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        self.messages.push(ChatMessage::user(text));

        let mut reply = String::new();
        let outcome = async {
            let mut stream = self.client.reply_stream(&self.messages, self.mood).await?;
            while let Some(delta) = stream.next().await {
                let delta = delta?;
                on_delta(&delta);
                reply.push_str(&delta);
            }
            Ok::<(), ChatError>(())
        }
        .await;

        if !reply.is_empty() {
            self.messages.push(ChatMessage::assistant(reply.clone()));
        }

        match outcome {
            Ok(()) => Ok(reply),
            Err(e) => {
                tracing::warn!(error = %e, partial = reply.len(), "support chat reply failed");
                Err(e)
            }
        }
    }
}
