#[cfg(test)]
#[path = "message_test.rs"]
mod tests;
use chrono::DateTime;
use chrono::Utc;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use super::Author;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(rename = "isUser")]
    pub author: Author,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(author: Author, text: &str) -> Message {
        return Message {
            id: Message::create_id(),
            author,
            text: text.to_string().replace('\t', "  "),
            timestamp: Utc::now(),
        };
    }

    pub fn is_user(&self) -> bool {
        return self.author == Author::User;
    }

    // The first two segments of a v4 UUID, which is plenty to tell messages
    // apart within a single session.
    fn create_id() -> String {
        return Uuid::new_v4()
            .to_string()
            .split('-')
            .take(2)
            .collect::<Vec<_>>()
            .join("-");
    }
}
