//! Responder loop: user lines go in over a channel, bot replies come out after
//! a fixed delay. Closing the input ends the loop and hands back the transcript.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::knowledge::KnowledgeBase;
use crate::transcript::{ChatMessage, Sender, Transcript};

const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("chat responder has stopped")]
    Closed,

    #[error("chat responder task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub struct ResponderHandle {
    input: mpsc::Sender<String>,
    replies: mpsc::Receiver<ChatMessage>,
    task: JoinHandle<Transcript>,
}

impl ResponderHandle {
    /// Queue a user line. Blank lines are accepted and dropped by the loop.
    pub async fn send(&self, text: impl Into<String>) -> Result<(), BotError> {
        self.input
            .send(text.into())
            .await
            .map_err(|_| BotError::Closed)
    }

    /// Next bot reply; `None` once the loop has finished.
    pub async fn next_reply(&mut self) -> Option<ChatMessage> {
        self.replies.recv().await
    }

    /// Stop accepting input, let pending replies finish and return the transcript.
    pub async fn close(self) -> Result<Transcript, BotError> {
        let Self {
            input,
            replies,
            task,
        } = self;
        drop(input);
        drop(replies);
        Ok(task.await?)
    }
}

/// Start the responder on the current runtime.
#[must_use]
pub fn spawn_responder(knowledge: KnowledgeBase, delay: Duration) -> ResponderHandle {
    let (input, mut lines) = mpsc::channel::<String>(CHANNEL_CAPACITY);
    let (reply_tx, replies) = mpsc::channel(CHANNEL_CAPACITY);

    let task = tokio::spawn(async move {
        let mut transcript = Transcript::greeted();
        while let Some(line) = lines.recv().await {
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            let answer = knowledge.reply(&line).to_string();
            transcript.push(Sender::User, line);

            tokio::time::sleep(delay).await;
            let reply = transcript.push(Sender::Bot, answer).clone();
            if reply_tx.send(reply).await.is_err() {
                debug!("Reply receiver dropped");
            }
        }
        debug!("Responder finished after {} messages", transcript.len());
        transcript
    });

    ResponderHandle {
        input,
        replies,
        task,
    }
}
