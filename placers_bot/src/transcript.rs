//! Ordered record of a chat with the assistant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::knowledge::GREETING;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub from: Sender,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// A chat session: every exchanged message, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transcript {
    /// Empty transcript.
    #[must_use]
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Transcript opened with the assistant's greeting.
    #[must_use]
    pub fn greeted() -> Self {
        let mut transcript = Self::new();
        transcript.push(Sender::Bot, GREETING.to_string());
        transcript
    }

    pub fn push(&mut self, from: Sender, text: String) -> &ChatMessage {
        let at = Utc::now();
        self.updated_at = at;
        self.messages.push(ChatMessage { from, text, at });
        &self.messages[self.messages.len() - 1]
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeted_transcript_starts_with_bot() {
        let mut transcript = Transcript::greeted();
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.messages[0].from, Sender::Bot);

        let pushed = transcript.push(Sender::User, "hi".to_string());
        assert_eq!(pushed.text, "hi");
        assert_eq!(transcript.len(), 2);
    }
}
