#[cfg(test)]
#[path = "app_state_test.rs"]
mod tests;

use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Message;
use crate::domain::models::RevealFrame;
use crate::domain::models::SessionSnapshot;
use crate::domain::models::SlashCommand;

/// Everything the render loop needs to draw a frame. Mutated only on the UI
/// task, in response to keyboard input and session events.
pub struct AppState {
    pub bubble_list: BubbleList,
    pub ceiling: usize,
    pub last_known_height: u16,
    pub last_known_width: u16,
    pub messages: Vec<Message>,
    pub remaining: usize,
    pub scroll: Scroll,
    pub waiting_for_answer: bool,
}

impl AppState {
    pub fn new(snapshot: SessionSnapshot) -> AppState {
        return AppState {
            bubble_list: BubbleList::default(),
            ceiling: snapshot.ceiling,
            last_known_height: 0,
            last_known_width: 0,
            messages: snapshot.messages,
            remaining: snapshot.remaining,
            scroll: Scroll::default(),
            waiting_for_answer: false,
        };
    }

    pub fn is_exhausted(&self) -> bool {
        return self.remaining == 0;
    }

    pub fn set_rect(&mut self, rect: Rect) {
        if rect.width == self.last_known_width && rect.height == self.last_known_height {
            return;
        }

        let first_layout = self.last_known_width == 0;
        self.last_known_width = rect.width;
        self.last_known_height = rect.height;
        self.sync_dependants();

        // A restored transcript opens scrolled to its tail.
        if first_layout {
            self.scroll.last();
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_reveal_frame(&mut self, frame: &RevealFrame) {
        if let Some(message) = self
            .messages
            .iter_mut()
            .find(|message| return message.id == frame.id)
        {
            message.text = frame.text.clone();
        }

        self.sync_dependants();
        if frame.done {
            self.waiting_for_answer = false;
        }
    }

    pub fn handle_session_cleared(&mut self, welcome: Message) {
        self.messages = vec![welcome];
        self.remaining = self.ceiling;
        self.waiting_for_answer = false;
        self.sync_dependants();
        self.scroll.last();
    }

    pub fn handle_slash_commands(
        &mut self,
        input_str: &str,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<(bool, bool)> {
        if let Some(command) = SlashCommand::parse(input_str) {
            if command.is_quit() {
                return Ok((true, false));
            }

            if command.is_clear() {
                self.waiting_for_answer = true;
                tx.send(Action::ResetSession())?;
                return Ok((false, true));
            }
        }

        return Ok((false, false));
    }

    fn sync_dependants(&mut self) {
        if self.last_known_width == 0 {
            return;
        }

        self.bubble_list
            .set_messages(&self.messages, usize::from(self.last_known_width));

        let list_length = u16::try_from(self.bubble_list.len()).unwrap_or(u16::MAX);
        self.scroll.set_state(list_length, self.last_known_height);

        if self.waiting_for_answer {
            self.scroll.last();
        }
    }
}
