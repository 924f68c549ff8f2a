pub mod actions;
mod app_state;
mod bubble;
mod bubble_list;
mod conversation;
pub mod events;
mod quota;
mod reveal;
mod scroll;
mod session;

pub use app_state::*;
pub use bubble::*;
pub use bubble_list::*;
pub use conversation::*;
pub use quota::*;
pub use reveal::*;
pub use scroll::*;
pub use session::*;
