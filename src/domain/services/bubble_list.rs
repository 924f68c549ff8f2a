#[cfg(test)]
#[path = "bubble_list_test.rs"]
mod tests;

use ratatui::backend::Backend;
use ratatui::prelude::Rect;
use ratatui::text::Line;
use ratatui::widgets::Block;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Message;

/// A conversation rendered as a flat stack of bubble lines, rebuilt whenever
/// the messages or the window width change.
#[derive(Default)]
pub struct BubbleList {
    lines: Vec<Line<'static>>,
}

impl BubbleList {
    pub fn set_messages(&mut self, messages: &[Message], line_width: usize) {
        self.lines = messages
            .iter()
            .flat_map(|message| {
                let mut align = BubbleAlignment::Left;
                if message.is_user() {
                    align = BubbleAlignment::Right;
                }

                return Bubble::new(message, align, line_width).as_lines();
            })
            .collect();
    }

    pub fn len(&self) -> usize {
        return self.lines.len();
    }

    pub fn render<B: Backend>(&self, frame: &mut Frame<'_, B>, rect: Rect, scroll: u16) {
        frame.render_widget(
            Paragraph::new(self.lines.clone())
                .block(Block::default())
                .scroll((scroll, 0)),
            rect,
        );
    }
}
