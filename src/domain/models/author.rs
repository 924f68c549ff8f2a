use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Serialized through the `isUser` boolean carried by the session snapshot
/// format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum Author {
    User,
    Innobot,
}

impl From<bool> for Author {
    fn from(is_user: bool) -> Author {
        if is_user {
            return Author::User;
        }

        return Author::Innobot;
    }
}

impl From<Author> for bool {
    fn from(author: Author) -> bool {
        return author == Author::User;
    }
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return Config::get(ConfigKey::Username),
            Author::Innobot => return String::from("Innobot"),
        }
    }
}
