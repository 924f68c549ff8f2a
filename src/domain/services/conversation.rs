#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use anyhow::Result;

use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::Storage;
use crate::domain::models::StorageArc;
use crate::domain::models::CONVERSATION_KEY;

const WELCOME_TEXT: &str = "Hi! I'm Innobot, your robotics assistant. Ask me anything about Arduino, circuits, sensors, or building your first robot!";

/// Owns the ordered message history for the session. Every mutation funnels
/// through here so the persisted snapshot can never drift from what the UI
/// was told about.
pub struct Conversation {
    storage: StorageArc,
    messages: Vec<Message>,
}

impl Conversation {
    /// Rebuilds the history from storage. Anything unreadable is logged and
    /// dropped in favour of a fresh welcome message, never surfaced as an
    /// error.
    pub async fn restore(storage: StorageArc) -> Conversation {
        let messages = match storage.load(CONVERSATION_KEY).await {
            Ok(Some(payload)) => match serde_json::from_str::<Vec<Message>>(&payload) {
                Ok(stored) if !stored.is_empty() => stored,
                Ok(_) => vec![Conversation::welcome_message()],
                Err(err) => {
                    tracing::warn!(error = ?err, "stored conversation is unreadable, starting fresh");
                    vec![Conversation::welcome_message()]
                }
            },
            Ok(None) => vec![Conversation::welcome_message()],
            Err(err) => {
                tracing::warn!(error = ?err, "failed to read stored conversation, starting fresh");
                vec![Conversation::welcome_message()]
            }
        };

        return Conversation { storage, messages };
    }

    pub fn welcome_message() -> Message {
        return Message::new(Author::Innobot, WELCOME_TEXT);
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }

    pub async fn append(&mut self, message: Message) -> Result<()> {
        self.messages.push(message);
        return self.persist().await;
    }

    /// Replaces the text of the message with the given id. Unknown ids are
    /// ignored, which is how reveal updates for an already cleared
    /// conversation disappear.
    pub fn update_text(&mut self, id: &str, text: &str) {
        if let Some(message) = self.messages.iter_mut().find(|e| return e.id == id) {
            message.text = text.to_string();
        }
    }

    pub async fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.messages)?;
        return self.storage.save(CONVERSATION_KEY, &payload).await;
    }

    /// Drops the history back to a single fresh welcome message and removes
    /// the stored snapshot entirely.
    pub async fn reset(&mut self) -> Result<Message> {
        let welcome = Conversation::welcome_message();
        self.messages = vec![welcome.clone()];
        self.storage.remove(CONVERSATION_KEY).await?;
        return Ok(welcome);
    }
}
