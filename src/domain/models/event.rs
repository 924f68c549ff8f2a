use tui_textarea::Input;

use super::Message;

/// One frame of the simulated typing effect, carrying the full prefix
/// revealed so far rather than a delta.
#[derive(Clone, Debug)]
pub struct RevealFrame {
    pub id: String,
    pub text: String,
    pub done: bool,
}

pub enum Event {
    AnswerProgress(RevealFrame),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLR(),
    KeyboardEnter(),
    KeyboardPaste(String),
    MessageAppended(Message),
    QuotaRemaining(usize),
    SessionCleared(Message),
    SubmissionRejected(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
}
