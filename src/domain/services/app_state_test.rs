use anyhow::Result;
use ratatui::prelude::Rect;
use tokio::sync::mpsc;

use super::AppState;
use super::BubbleList;
use super::Scroll;
use crate::domain::models::Action;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::RevealFrame;
use crate::domain::models::SessionSnapshot;

impl Default for AppState {
    fn default() -> AppState {
        return AppState {
            bubble_list: BubbleList::default(),
            ceiling: 10,
            last_known_height: 300,
            last_known_width: 100,
            messages: vec![],
            remaining: 10,
            scroll: Scroll::default(),
            waiting_for_answer: false,
        };
    }
}

fn snapshot() -> SessionSnapshot {
    return SessionSnapshot {
        messages: vec![
            Message::new(Author::Innobot, "Hi! Ask me anything about robotics."),
            Message::new(Author::User, "What is an Arduino?"),
        ],
        remaining: 3,
        ceiling: 10,
    };
}

mod new {
    use super::*;

    #[test]
    fn it_restores_the_saved_transcript() {
        let app_state = AppState::new(snapshot());

        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.remaining, 3);
        assert_eq!(app_state.ceiling, 10);
        assert!(!app_state.waiting_for_answer);
        assert_eq!(app_state.bubble_list.len(), 0);
    }
}

mod set_rect {
    use super::*;

    #[test]
    fn it_lays_out_bubbles_on_the_first_draw() {
        let mut app_state = AppState::new(snapshot());
        app_state.set_rect(Rect::new(0, 0, 50, 10));

        assert_eq!(app_state.last_known_width, 50);
        assert_eq!(app_state.last_known_height, 10);
        assert_eq!(app_state.bubble_list.len(), 6);
    }
}

mod messages {
    use super::*;

    #[test]
    fn it_appends_messages_at_the_tail() {
        let mut app_state = AppState::default();
        app_state.add_message(Message::new(Author::User, "Why is my servo jittering?"));
        app_state.add_message(Message::new(Author::Innobot, ""));

        assert_eq!(app_state.messages.len(), 2);
        assert_eq!(app_state.bubble_list.len(), 6);
    }

    #[test]
    fn it_reveals_answer_text_in_place() {
        let mut app_state = AppState::default();
        app_state.add_message(Message::new(Author::Innobot, ""));
        app_state.waiting_for_answer = true;
        let id = app_state.messages[0].id.clone();

        app_state.handle_reveal_frame(&RevealFrame {
            id: id.clone(),
            text: "Check".to_string(),
            done: false,
        });

        assert_eq!(app_state.messages[0].text, "Check");
        assert!(app_state.waiting_for_answer);

        app_state.handle_reveal_frame(&RevealFrame {
            id,
            text: "Check your wiring.".to_string(),
            done: true,
        });

        assert_eq!(app_state.messages[0].text, "Check your wiring.");
        assert!(!app_state.waiting_for_answer);
    }

    #[test]
    fn it_ignores_frames_for_unknown_messages() {
        let mut app_state = AppState::default();
        app_state.add_message(Message::new(Author::Innobot, "original"));

        app_state.handle_reveal_frame(&RevealFrame {
            id: "unknown-id".to_string(),
            text: "replaced".to_string(),
            done: false,
        });

        assert_eq!(app_state.messages[0].text, "original");
    }
}

mod quota {
    use super::*;

    #[test]
    fn it_reports_exhaustion_at_zero() {
        let mut app_state = AppState::default();
        assert!(!app_state.is_exhausted());

        app_state.remaining = 0;
        assert!(app_state.is_exhausted());
    }
}

mod handle_session_cleared {
    use super::*;

    #[test]
    fn it_swaps_in_the_welcome_message_and_restores_the_quota() {
        let mut app_state = AppState::new(snapshot());
        app_state.set_rect(Rect::new(0, 0, 50, 10));
        app_state.remaining = 0;
        app_state.waiting_for_answer = true;

        app_state.handle_session_cleared(Message::new(Author::Innobot, "Hi again!"));

        assert_eq!(app_state.messages.len(), 1);
        assert_eq!(app_state.messages[0].text, "Hi again!");
        assert_eq!(app_state.remaining, 10);
        assert!(!app_state.waiting_for_answer);
        assert_eq!(app_state.bubble_list.len(), 3);
    }
}

mod handle_slash_commands {
    use super::*;

    #[tokio::test]
    async fn it_quits() -> Result<()> {
        let mut app_state = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let (should_break, should_continue) = app_state.handle_slash_commands("/quit", &tx)?;

        assert!(should_break);
        assert!(!should_continue);
        assert!(rx.try_recv().is_err());
        return Ok(());
    }

    #[tokio::test]
    async fn it_clears_the_session() -> Result<()> {
        let mut app_state = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let (should_break, should_continue) = app_state.handle_slash_commands("/clear", &tx)?;

        assert!(!should_break);
        assert!(should_continue);
        assert!(app_state.waiting_for_answer);
        assert!(matches!(rx.try_recv()?, Action::ResetSession()));
        return Ok(());
    }

    #[tokio::test]
    async fn it_ignores_questions() -> Result<()> {
        let mut app_state = AppState::default();
        let (tx, mut rx) = mpsc::unbounded_channel::<Action>();

        let (should_break, should_continue) =
            app_state.handle_slash_commands("How do I wire an LED?", &tx)?;

        assert!(!should_break);
        assert!(!should_continue);
        assert!(!app_state.waiting_for_answer);
        assert!(rx.try_recv().is_err());
        return Ok(());
    }
}
