use std::io;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::Borders;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Wrap;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tui_textarea::Input;
use tui_textarea::Key;

use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::Loading;
use crate::domain::models::SessionSnapshot;
use crate::domain::models::TextArea;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;

fn render_header<B: Backend>(frame: &mut Frame<'_, B>, app_state: &AppState, rect: Rect) {
    let mut style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    if app_state.is_exhausted() {
        style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
    }

    frame.render_widget(
        Paragraph::new(format!(
            "Innobot | Questions remaining: {}/{}",
            app_state.remaining, app_state.ceiling
        ))
        .style(style)
        .alignment(Alignment::Center),
        rect,
    );
}

fn render_limit_banner<B: Backend>(frame: &mut Frame<'_, B>, app_state: &AppState, rect: Rect) {
    frame.render_widget(
        Paragraph::new(format!(
            "Free limit reached! You've used all {} questions. Press CTRL+R to clear the session and keep exploring.",
            app_state.ceiling
        ))
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        rect,
    );
}

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    tx: mpsc::UnboundedSender<Action>,
    events: &mut EventsService,
) -> Result<()> {
    let mut textarea = TextArea::default();
    let mut loading = Loading::default();

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints(vec![
                    Constraint::Length(1),
                    Constraint::Min(1),
                    Constraint::Max(4),
                ])
                .split(frame.size());

            app_state.set_rect(layout[1]);

            render_header(frame, app_state, layout[0]);
            app_state
                .bubble_list
                .render(frame, layout[1], app_state.scroll.position);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                layout[1].inner(&Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut app_state.scroll.scrollbar_state,
            );

            if app_state.waiting_for_answer {
                loading.render(frame, layout[2]);
            } else if app_state.is_exhausted() {
                render_limit_banner(frame, app_state, layout[2]);
            } else {
                frame.render_widget(textarea.widget(), layout[2]);
            }
        })?;

        match events.next().await? {
            Event::AnswerProgress(reveal_frame) => {
                app_state.handle_reveal_frame(&reveal_frame);
            }
            Event::MessageAppended(message) => {
                app_state.add_message(message);
            }
            Event::QuotaRemaining(remaining) => {
                app_state.remaining = remaining;
            }
            Event::SessionCleared(welcome) => {
                app_state.handle_session_cleared(welcome);
            }
            Event::SubmissionRejected() => {
                app_state.waiting_for_answer = false;
            }
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardCTRLR() => {
                tx.send(Action::ResetSession())?;
            }
            Event::KeyboardPaste(text) => {
                if app_state.waiting_for_answer || app_state.is_exhausted() {
                    continue;
                }

                for char in text.replace('\r', "\n").chars() {
                    if char == '\n' {
                        textarea.insert_newline();
                        continue;
                    }

                    textarea.input(Input {
                        key: Key::Char(char),
                        ctrl: false,
                        alt: false,
                    });
                }
            }
            Event::KeyboardEnter() => {
                if app_state.waiting_for_answer || app_state.is_exhausted() {
                    continue;
                }

                let input_str = &textarea.lines().join("\n");
                if input_str.trim().is_empty() {
                    continue;
                }

                let (should_break, should_continue) =
                    app_state.handle_slash_commands(input_str, &tx)?;
                if should_break {
                    break;
                }

                textarea = TextArea::default();
                if should_continue {
                    continue;
                }

                app_state.waiting_for_answer = true;
                tx.send(Action::SubmitQuestion(input_str.to_string()))?;
            }
            Event::KeyboardCharInput(input) => {
                if app_state.waiting_for_answer || app_state.is_exhausted() {
                    continue;
                }

                textarea.input(input);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                loading.tick();
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    disable_raw_mode().unwrap();
    crossterm::execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture).unwrap();
    crossterm::execute!(io::stdout(), cursor::Show).unwrap();
}

pub async fn start(
    snapshot: SessionSnapshot,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let mut app_state = AppState::new(snapshot);
    let mut events = EventsService::new(rx);
    start_loop(&mut terminal, &mut app_state, tx, &mut events).await?;

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    return Ok(());
}
