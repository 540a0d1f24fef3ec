//! PlacementBot conversation, one-shot or interactive on stdin.

use std::io::Write as _;

use placers_bot::{
    BotError, ChatMessage, GREETING, KnowledgeBase, ResponderHandle, SUGGESTIONS, spawn_responder,
};
use placers_config::Config;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ChatInput {
    /// Single message to ask (non-interactive mode).
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct ChatStrategy;

/// Send one line and wait for its reply. Blank lines get no reply, so they
/// are not sent at all.
async fn ask(bot: &mut ResponderHandle, message: &str) -> Result<Option<ChatMessage>, BotError> {
    let message = message.trim();
    if message.is_empty() {
        return Ok(None);
    }
    bot.send(message).await?;
    Ok(bot.next_reply().await)
}

impl super::CommandStrategy for ChatStrategy {
    type Input = ChatInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let knowledge = KnowledgeBase::default()
            .with_extra_entries(config.bot.entries.clone())
            .with_fallback(config.bot.fallback.clone());
        let mut bot = spawn_responder(knowledge, config.bot.reply_delay());

        if let Some(msg) = input.message {
            match ask(&mut bot, &msg).await? {
                Some(reply) => println!("{}", reply.text),
                None => println!("Type a question for PlacementBot."),
            }
        } else {
            println!("=== PlacementBot ===");
            println!("Type 'exit', 'quit', or Ctrl+C to end the chat.\n");
            println!("{GREETING}\n");
            println!("Try asking: {}\n", SUGGESTIONS.join(" | "));

            loop {
                print!("> ");
                std::io::stdout().flush()?;

                let mut line = String::new();
                if std::io::stdin().read_line(&mut line)? == 0 {
                    break;
                }
                let line = line.trim();
                if matches!(line, "exit" | "quit" | "q") {
                    break;
                }
                if line.is_empty() {
                    continue;
                }

                println!("PlacementBot is typing...");
                match ask(&mut bot, line).await? {
                    Some(reply) => println!("\n{}\n", reply.text),
                    None => break,
                }
            }
        }

        let transcript = bot.close().await?;
        info!("Chat ended: {} total messages", transcript.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn blank_message_returns_without_reply() {
        let mut bot = spawn_responder(KnowledgeBase::default(), Duration::ZERO);
        let reply = tokio::time::timeout(Duration::from_secs(2), ask(&mut bot, "   ")).await;
        assert!(matches!(reply, Ok(Ok(None))));

        let reply = tokio::time::timeout(Duration::from_secs(2), ask(&mut bot, "resume tips")).await;
        assert!(matches!(reply, Ok(Ok(Some(_)))));

        let transcript = bot.close().await;
        assert!(matches!(transcript, Ok(t) if t.len() == 3));
    }
}
