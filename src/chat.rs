//! Chat with the queen of a running hive.
//!
//! Each message becomes a swarm task on the current session and is also
//! stored in memory under `chat-<session id>`.

use crate::flow::FlowCli;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: String,
}

impl ChatSession {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn memory_key(&self) -> String {
        format!("chat-{}", self.id)
    }

    /// Whether `input` ends the chat.
    pub fn is_exit(input: &str) -> bool {
        let word = input.trim().to_lowercase();
        EXIT_WORDS.contains(&word.as_str())
    }

    /// Send one message. Blank messages are ignored and return `false`.
    pub async fn send(&self, cli: &FlowCli, message: &str) -> bool {
        let message = message.trim();
        if message.is_empty() {
            return false;
        }
        tracing::info!("Sending to session {}: '{}'", self.id, message);
        cli.swarm(message, true, None).await;
        cli.memory_store(&self.memory_key(), message, None).await;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::testing::{argv, issued, recording_cli};

    #[test]
    fn test_exit_words() {
        assert!(ChatSession::is_exit("exit"));
        assert!(ChatSession::is_exit(" Quit "));
        assert!(ChatSession::is_exit("BYE"));
        assert!(!ChatSession::is_exit("goodbye"));
        assert!(!ChatSession::is_exit(""));
    }

    #[tokio::test]
    async fn test_send_spawns_swarm_and_stores() {
        let (cli, runner) = recording_cli();
        let chat = ChatSession::new("s-42");

        assert!(chat.send(&cli, " add a login page ").await);
        assert!(!chat.send(&cli, "   ").await);

        assert_eq!(
            issued(&runner),
            vec![
                argv(&["swarm", "add a login page", "--claude", "--continue-session"]),
                argv(&["memory", "store", "chat-s-42", "add a login page"]),
            ]
        );
    }
}
