use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::time;

use super::ActionsService;
use super::ChatSession;
use super::SessionArc;
use crate::domain::models::Action;
use crate::domain::models::AnswerGateway;
use crate::domain::models::AnswerOutcome;
use crate::domain::models::Author;
use crate::domain::models::Event;
use crate::domain::models::GatewayArc;
use crate::domain::models::GatewayName;
use crate::domain::models::RevealFrame;
use crate::infrastructure::gateways::stub::Stub;
use crate::infrastructure::gateways::stub::STUB_ANSWER;
use crate::infrastructure::storage::MemoryStorage;

struct StallingGateway {}

#[async_trait]
impl AnswerGateway for StallingGateway {
    fn name(&self) -> GatewayName {
        return GatewayName::Stub;
    }

    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn answer(&self, _question: &str) -> AnswerOutcome {
        time::sleep(Duration::from_millis(100)).await;
        return AnswerOutcome::Answer("late answer".to_string());
    }
}

async fn start_service(
    ceiling: usize,
    gateway: GatewayArc,
) -> (
    SessionArc,
    mpsc::UnboundedSender<Action>,
    mpsc::UnboundedReceiver<Event>,
) {
    let storage = Arc::new(MemoryStorage::default());
    let session: SessionArc = Arc::new(Mutex::new(
        ChatSession::restore(storage, ceiling, Duration::from_millis(1)).await,
    ));

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let service_session = session.clone();
    tokio::spawn(async move {
        return ActionsService::start(service_session, gateway, event_tx, &mut action_rx).await;
    });

    return (session, action_tx, event_rx);
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<Event>) -> Event {
    return time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
}

async fn drain_reveal(rx: &mut mpsc::UnboundedReceiver<Event>) -> Vec<RevealFrame> {
    let mut frames = vec![];
    loop {
        match next_event(rx).await {
            Event::AnswerProgress(frame) => {
                let done = frame.done;
                frames.push(frame);
                if done {
                    return frames;
                }
            }
            _ => panic!("expected only reveal frames"),
        }
    }
}

#[tokio::test]
async fn it_answers_a_question_end_to_end() -> Result<()> {
    let (session, action_tx, mut event_rx) = start_service(3, Arc::new(Stub::default())).await;

    action_tx.send(Action::SubmitQuestion("What is a servo?".to_string()))?;

    let user_message = match next_event(&mut event_rx).await {
        Event::MessageAppended(msg) => msg,
        _ => panic!("expected the user message first"),
    };
    assert_eq!(user_message.author, Author::User);
    assert_eq!(user_message.text, "What is a servo?");

    let placeholder = match next_event(&mut event_rx).await {
        Event::MessageAppended(msg) => msg,
        _ => panic!("expected the placeholder second"),
    };
    assert_eq!(placeholder.author, Author::Innobot);
    assert_eq!(placeholder.text, "");

    match next_event(&mut event_rx).await {
        Event::QuotaRemaining(remaining) => assert_eq!(remaining, 2),
        _ => panic!("expected the quota update third"),
    }

    let frames = drain_reveal(&mut event_rx).await;
    assert_eq!(frames.len(), STUB_ANSWER.chars().count());
    assert_eq!(frames.last().unwrap().text, STUB_ANSWER);
    assert!(frames.iter().all(|e| return e.id == placeholder.id));

    let locked = session.lock().await;
    assert_eq!(locked.messages()[2].text, STUB_ANSWER);
    assert!(!locked.is_busy());
    return Ok(());
}

#[tokio::test]
async fn it_counts_down_the_quota_across_questions() -> Result<()> {
    let (_session, action_tx, mut event_rx) = start_service(2, Arc::new(Stub::default())).await;

    let mut seen = vec![];
    for n in 0..2 {
        action_tx.send(Action::SubmitQuestion(format!("question {n}")))?;
        next_event(&mut event_rx).await;
        next_event(&mut event_rx).await;
        match next_event(&mut event_rx).await {
            Event::QuotaRemaining(remaining) => seen.push(remaining),
            _ => panic!("expected a quota update"),
        }
        drain_reveal(&mut event_rx).await;
    }

    assert_eq!(seen, vec![1, 0]);

    action_tx.send(Action::SubmitQuestion("one more?".to_string()))?;
    assert!(matches!(
        next_event(&mut event_rx).await,
        Event::SubmissionRejected()
    ));
    return Ok(());
}

#[tokio::test]
async fn it_rejects_when_the_quota_is_spent() -> Result<()> {
    let (session, action_tx, mut event_rx) = start_service(0, Arc::new(Stub::default())).await;

    action_tx.send(Action::SubmitQuestion("anyone there?".to_string()))?;

    assert!(matches!(
        next_event(&mut event_rx).await,
        Event::SubmissionRejected()
    ));
    let locked = session.lock().await;
    assert_eq!(locked.messages().len(), 1);
    return Ok(());
}

#[tokio::test]
async fn it_clears_the_session_on_reset() -> Result<()> {
    let (session, action_tx, mut event_rx) = start_service(3, Arc::new(Stub::default())).await;

    action_tx.send(Action::SubmitQuestion("question".to_string()))?;
    next_event(&mut event_rx).await;
    next_event(&mut event_rx).await;
    next_event(&mut event_rx).await;
    drain_reveal(&mut event_rx).await;

    action_tx.send(Action::ResetSession())?;

    let welcome = match next_event(&mut event_rx).await {
        Event::SessionCleared(msg) => msg,
        _ => panic!("expected the session cleared event"),
    };
    assert_eq!(welcome.author, Author::Innobot);

    let locked = session.lock().await;
    assert_eq!(locked.messages().len(), 1);
    assert_eq!(locked.messages()[0].id, welcome.id);
    assert_eq!(locked.remaining_questions(), 3);
    return Ok(());
}

#[tokio::test]
async fn it_discards_in_flight_answers_on_reset() -> Result<()> {
    let (session, action_tx, mut event_rx) = start_service(3, Arc::new(StallingGateway {})).await;

    action_tx.send(Action::SubmitQuestion("slow question".to_string()))?;
    next_event(&mut event_rx).await;
    next_event(&mut event_rx).await;
    next_event(&mut event_rx).await;

    // The gateway is still stalling. Clear the session under it.
    action_tx.send(Action::ResetSession())?;
    assert!(matches!(
        next_event(&mut event_rx).await,
        Event::SessionCleared(_)
    ));

    // Give the stalled answer time to resolve if it was going to.
    time::sleep(Duration::from_millis(200)).await;

    assert!(event_rx.try_recv().is_err());
    let locked = session.lock().await;
    assert_eq!(locked.messages().len(), 1);
    assert_eq!(locked.remaining_questions(), 3);
    return Ok(());
}
