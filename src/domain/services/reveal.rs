#[cfg(test)]
#[path = "reveal_test.rs"]
mod tests;

use std::time::Duration;

/// Hands out reveal cursors and remembers which one is current. Starting a
/// new reveal or cancelling bumps the generation, so a driver holding an
/// older cursor finds out it is stale on its next tick instead of writing
/// into a conversation that has moved on.
pub struct RevealScheduler {
    generation: u64,
    interval: Duration,
}

impl RevealScheduler {
    pub fn new(interval: Duration) -> RevealScheduler {
        return RevealScheduler {
            generation: 0,
            interval,
        };
    }

    pub fn interval(&self) -> Duration {
        return self.interval;
    }

    pub fn begin(&mut self, message_id: &str, full_text: &str) -> Reveal {
        self.generation += 1;
        return Reveal {
            token: self.generation,
            message_id: message_id.to_string(),
            full_text: full_text.to_string(),
            cursor: 0,
        };
    }

    pub fn is_current(&self, reveal: &Reveal) -> bool {
        return reveal.token == self.generation;
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

/// A single in-flight reveal: a cursor walking the characters of a
/// completed answer one step at a time.
pub struct Reveal {
    token: u64,
    message_id: String,
    full_text: String,
    cursor: usize,
}

impl Reveal {
    pub fn message_id(&self) -> &str {
        return &self.message_id;
    }

    pub fn full_text(&self) -> &str {
        return &self.full_text;
    }

    pub fn is_complete(&self) -> bool {
        return self.cursor >= self.full_text.len();
    }

    /// Advances by exactly one character and returns the new prefix, or
    /// `None` once everything has been revealed. The cursor only ever moves
    /// by whole characters, so prefixes are always valid strings.
    pub fn step(&mut self) -> Option<String> {
        let next = self.full_text[self.cursor..].chars().next()?;
        self.cursor += next.len_utf8();
        return Some(self.full_text[..self.cursor].to_string());
    }
}
