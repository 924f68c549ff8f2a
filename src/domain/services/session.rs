#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::Result;

use super::Conversation;
use super::QuotaTracker;
use super::Reveal;
use super::RevealScheduler;
use crate::domain::models::AnswerOutcome;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::RevealFrame;
use crate::domain::models::SessionSnapshot;
use crate::domain::models::StorageArc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    AwaitingAnswer,
    Revealing,
}

/// Receipt for an accepted question. The epoch pins it to the session
/// lifetime it was accepted in; a reset in between makes the receipt
/// worthless.
pub struct Submission {
    pub question: String,
    pub user_message: Message,
    pub placeholder: Message,
    pub remaining: usize,
    epoch: u64,
}

pub enum RevealProgress {
    Frame(RevealFrame),
    Superseded,
}

/// The session state machine. One question is serviced at a time: a
/// submission appends the user message and an empty placeholder, the
/// resolved answer is revealed into the placeholder tick by tick, and only
/// a completed reveal returns the session to idle.
pub struct ChatSession {
    conversation: Conversation,
    quota: QuotaTracker,
    reveal: RevealScheduler,
    phase: SessionPhase,
    epoch: u64,
    ceiling: usize,
}

impl ChatSession {
    pub async fn restore(
        storage: StorageArc,
        ceiling: usize,
        reveal_interval: Duration,
    ) -> ChatSession {
        let conversation = Conversation::restore(storage.clone()).await;
        let quota = QuotaTracker::restore(storage).await;

        return ChatSession {
            conversation,
            quota,
            reveal: RevealScheduler::new(reveal_interval),
            phase: SessionPhase::Idle,
            epoch: 0,
            ceiling,
        };
    }

    pub fn phase(&self) -> SessionPhase {
        return self.phase;
    }

    pub fn messages(&self) -> &[Message] {
        return self.conversation.messages();
    }

    pub fn remaining_questions(&self) -> usize {
        return self.quota.remaining(self.ceiling);
    }

    pub fn is_exhausted(&self) -> bool {
        return self.quota.is_exhausted(self.ceiling);
    }

    pub fn is_busy(&self) -> bool {
        return self.phase != SessionPhase::Idle;
    }

    pub fn reveal_interval(&self) -> Duration {
        return self.reveal.interval();
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        return SessionSnapshot {
            messages: self.conversation.messages().to_vec(),
            remaining: self.remaining_questions(),
            ceiling: self.ceiling,
        };
    }

    /// Gate for new questions. Blank input, a question already in flight,
    /// and a spent quota are all rejected with `None` and leave no trace in
    /// the conversation.
    pub async fn submit(&mut self, text: &str) -> Result<Option<Submission>> {
        let question = text.trim();
        if question.is_empty() || self.is_busy() || self.is_exhausted() {
            return Ok(None);
        }

        let user_message = Message::new(Author::User, question);
        let placeholder = Message::new(Author::Innobot, "");
        self.conversation.append(user_message.clone()).await?;
        self.conversation.append(placeholder.clone()).await?;
        self.quota.increment().await?;
        self.phase = SessionPhase::AwaitingAnswer;

        return Ok(Some(Submission {
            question: question.to_string(),
            user_message,
            placeholder,
            remaining: self.remaining_questions(),
            epoch: self.epoch,
        }));
    }

    /// Accepts the gateway outcome for a submission and starts revealing it
    /// into the placeholder. Outcomes that arrive after a reset belong to a
    /// dead session lifetime and are dropped.
    pub fn resolve(&mut self, submission: &Submission, outcome: &AnswerOutcome) -> Option<Reveal> {
        if submission.epoch != self.epoch {
            tracing::debug!(
                id = submission.placeholder.id,
                "discarding an answer that resolved after the session was cleared"
            );
            return None;
        }

        self.phase = SessionPhase::Revealing;
        return Some(self.reveal.begin(&submission.placeholder.id, outcome.text()));
    }

    /// One reveal tick: extends the placeholder by a character and reports
    /// the new prefix. The final frame persists the finished conversation
    /// and returns the session to idle. A reveal that was cancelled under
    /// the driver comes back as `Superseded`.
    pub async fn advance_reveal(&mut self, reveal: &mut Reveal) -> Result<RevealProgress> {
        if !self.reveal.is_current(reveal) {
            return Ok(RevealProgress::Superseded);
        }

        match reveal.step() {
            Some(prefix) => {
                self.conversation.update_text(reveal.message_id(), &prefix);
                let done = reveal.is_complete();
                if done {
                    self.conversation.persist().await?;
                    self.phase = SessionPhase::Idle;
                }

                return Ok(RevealProgress::Frame(RevealFrame {
                    id: reveal.message_id().to_string(),
                    text: prefix,
                    done,
                }));
            }
            None => {
                // An empty answer completes with its initial empty state.
                self.conversation.persist().await?;
                self.phase = SessionPhase::Idle;

                return Ok(RevealProgress::Frame(RevealFrame {
                    id: reveal.message_id().to_string(),
                    text: reveal.full_text().to_string(),
                    done: true,
                }));
            }
        }
    }

    /// Clears everything back to a fresh session: one welcome message, full
    /// quota, no stored snapshot. Bumping the epoch and cancelling the
    /// reveal makes any in-flight answer or tick driver a no-op.
    pub async fn reset(&mut self) -> Result<Message> {
        self.epoch += 1;
        self.reveal.cancel();
        self.phase = SessionPhase::Idle;
        self.quota.reset().await?;
        return self.conversation.reset().await;
    }
}
