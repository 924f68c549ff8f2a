mod action;
mod author;
mod event;
mod gateway;
mod loading;
mod message;
mod session;
mod slash_commands;
mod storage;
mod textarea;

pub use action::*;
pub use author::*;
pub use event::*;
pub use gateway::*;
pub use loading::*;
pub use message::*;
pub use session::*;
pub use slash_commands::*;
pub use storage::*;
pub use textarea::*;
