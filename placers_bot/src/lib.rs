#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Rule-based placement assistant: keyword answers, a transcript and a
//! channel-driven responder loop.

pub mod knowledge;
pub mod responder;
pub mod transcript;

pub use knowledge::{GREETING, KnowledgeBase, QaEntry, SUGGESTIONS};
pub use responder::{BotError, ResponderHandle, spawn_responder};
pub use transcript::{ChatMessage, Sender, Transcript};
