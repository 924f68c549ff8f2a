#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time;

use super::ChatSession;
use super::RevealProgress;
use crate::domain::models::Action;
use crate::domain::models::AnswerGateway;
use crate::domain::models::Event;
use crate::domain::models::GatewayArc;

pub type SessionArc = Arc<Mutex<ChatSession>>;

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /clear (/reset, /new) - Clears the conversation and restores your free questions.
- /quit /exit (/q) - Exit Innobot.

HOTKEYS:
- Enter - Ask the question in the input box.
- Up arrow - Scroll up.
- Down arrow - Scroll down.
- CTRL+U - Page up.
- CTRL+D - Page down.
- CTRL+R - Clear the session and start over.
- CTRL+C - Exit.
        "#;

    return text.trim().to_string();
}

/// Services one question end to end: run the quota gate, wait on the
/// gateway, then reveal the answer into the placeholder on a timer. The
/// session lock is taken per step, never held across a sleep or the
/// gateway call.
async fn run_question(
    session: SessionArc,
    gateway: GatewayArc,
    question: String,
    tx: mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let submission = {
        let mut locked = session.lock().await;
        match locked.submit(&question).await? {
            Some(submission) => submission,
            None => {
                tx.send(Event::SubmissionRejected())?;
                return Ok(());
            }
        }
    };

    tx.send(Event::MessageAppended(submission.user_message.clone()))?;
    tx.send(Event::MessageAppended(submission.placeholder.clone()))?;
    tx.send(Event::QuotaRemaining(submission.remaining))?;

    let outcome = gateway.answer(&submission.question).await;

    let (mut reveal, interval) = {
        let mut locked = session.lock().await;
        match locked.resolve(&submission, &outcome) {
            Some(reveal) => (reveal, locked.reveal_interval()),
            None => return Ok(()),
        }
    };

    loop {
        time::sleep(interval).await;

        let mut locked = session.lock().await;
        match locked.advance_reveal(&mut reveal).await? {
            RevealProgress::Frame(frame) => {
                let done = frame.done;
                tx.send(Event::AnswerProgress(frame))?;
                if done {
                    return Ok(());
                }
            }
            RevealProgress::Superseded => {
                return Ok(());
            }
        }
    }
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        session: SessionArc,
        gateway: GatewayArc,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        if let Err(err) = gateway.health_check().await {
            tracing::warn!(
                gateway = %gateway.name(),
                error = ?err,
                "gateway health check failed, answers may fall back to the apology"
            );
        }

        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                // Channel closed, the UI is gone.
                return Ok(());
            }

            match action.unwrap() {
                Action::SubmitQuestion(question) => {
                    worker = tokio::spawn(run_question(
                        session.clone(),
                        gateway.clone(),
                        question,
                        tx.clone(),
                    ));
                }
                Action::ResetSession() => {
                    // The abort is best effort. A worker that slips past it
                    // finds the bumped epoch and stale reveal and backs out
                    // on its own.
                    worker.abort();
                    let welcome = {
                        let mut locked = session.lock().await;
                        locked.reset().await?
                    };
                    tx.send(Event::SessionCleared(welcome))?;
                }
            }
        }
    }
}
