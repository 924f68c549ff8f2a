#[cfg(test)]
#[path = "bubble_test.rs"]
mod tests;

use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

use crate::domain::models::Author;
use crate::domain::models::Message;

// Left border, left padding, right padding, right border, scrollbar gutter.
const BORDER_ELEMENTS_LENGTH: usize = 5;

#[derive(PartialEq, Eq)]
pub enum BubbleAlignment {
    Left,
    Right,
}

/// Renders one message as a bordered speech bubble, author name embedded in
/// the top border. Widths are counted in characters, not bytes.
pub struct Bubble<'a> {
    alignment: BubbleAlignment,
    message: &'a Message,
    window_max_width: usize,
}

fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut wrapped: Vec<String> = vec![];
    let mut current = String::new();
    let mut current_len = 0;

    for word in line.split(' ') {
        let word_len = word.chars().count();

        // Words longer than a full line break at the width boundary.
        if word_len > width {
            if !current.trim_end().is_empty() {
                wrapped.push(current.trim_end().to_string());
            }

            let mut chunk = String::new();
            for letter in word.chars() {
                if chunk.chars().count() == width {
                    wrapped.push(chunk);
                    chunk = String::new();
                }
                chunk.push(letter);
            }

            current = format!("{chunk} ");
            current_len = chunk.chars().count() + 1;
            continue;
        }

        if current_len + word_len > width {
            wrapped.push(current.trim_end().to_string());
            current = String::new();
            current_len = 0;
        }

        current.push_str(word);
        current.push(' ');
        current_len += word_len + 1;
    }

    if !current.trim_end().is_empty() || wrapped.is_empty() {
        wrapped.push(current.trim_end().to_string());
    }

    return wrapped;
}

impl<'a> Bubble<'a> {
    pub fn new(message: &'a Message, alignment: BubbleAlignment, window_max_width: usize) -> Bubble {
        return Bubble {
            alignment,
            message,
            window_max_width,
        };
    }

    pub fn as_lines(&self) -> Vec<Line<'static>> {
        let max_line_length = self.max_line_length();

        let mut text_lines: Vec<String> = vec![];
        for line in self.message.text.lines() {
            text_lines.extend(wrap_line(line, max_line_length));
        }
        if text_lines.is_empty() {
            // Placeholders are empty until the reveal starts.
            text_lines.push("".to_string());
        }

        let mut lines = vec![self.top_bar(max_line_length)];
        for text_line in text_lines {
            lines.push(self.text_row(&text_line, max_line_length));
        }
        lines.push(self.bottom_bar(max_line_length));

        return lines;
    }

    fn max_line_length(&self) -> usize {
        let hard_cap = self
            .window_max_width
            .saturating_sub(BORDER_ELEMENTS_LENGTH);

        let mut max_line_length = self
            .message
            .text
            .lines()
            .map(|line| return line.chars().count())
            .max()
            .unwrap_or_default();

        if max_line_length > hard_cap {
            max_line_length = hard_cap;
        }

        let username_len = self.message.author.to_string().chars().count();
        if max_line_length < username_len {
            max_line_length = username_len;
        }

        return max_line_length;
    }

    fn text_row(&self, text: &str, max_line_length: usize) -> Line<'static> {
        let fill = " ".repeat(max_line_length.saturating_sub(text.chars().count()));
        let outer = " ".repeat(
            self.window_max_width
                .saturating_sub(max_line_length + 4),
        );

        let mut spans = vec![
            self.border_span("│ ".to_string()),
            Span::from(text.to_string()),
            self.border_span(format!("{fill} │")),
        ];

        if self.alignment == BubbleAlignment::Left {
            spans.push(Span::from(outer));
            return Line::from(spans);
        }

        let mut padded = vec![Span::from(outer)];
        padded.append(&mut spans);
        return Line::from(padded);
    }

    fn top_bar(&self, max_line_length: usize) -> Line<'static> {
        let username = self.message.author.to_string();
        let dashes =
            "─".repeat((max_line_length + 2).saturating_sub(username.chars().count()));
        return self.align_bar(format!("╭{username}{dashes}╮"));
    }

    fn bottom_bar(&self, max_line_length: usize) -> Line<'static> {
        let dashes = "─".repeat(max_line_length + 2);
        return self.align_bar(format!("╰{dashes}╯"));
    }

    fn align_bar(&self, bar: String) -> Line<'static> {
        let outer = " ".repeat(
            self.window_max_width
                .saturating_sub(bar.chars().count()),
        );

        if self.alignment == BubbleAlignment::Left {
            return Line::from(vec![self.border_span(bar), Span::from(outer)]);
        }

        return Line::from(vec![Span::from(outer), self.border_span(bar)]);
    }

    fn border_span(&self, text: String) -> Span<'static> {
        let color = match self.message.author {
            Author::User => Color::Blue,
            Author::Innobot => Color::Cyan,
        };

        return Span::styled(
            text,
            Style {
                fg: Some(color),
                ..Style::default()
            },
        );
    }
}
