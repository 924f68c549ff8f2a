#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Error;
use anyhow::Result;
use domain::models::Action;
use domain::models::Event;
use domain::models::GatewayName;
use infrastructure::gateways::GatewayManager;
use infrastructure::storage::session_storage;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task;
use yansi::Paint;

use crate::application::cli;
use crate::application::ui;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::services::actions::ActionsService;
use crate::domain::services::actions::SessionArc;
use crate::domain::services::ChatSession;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! Innobot has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!(
            "\nIf you could spare a moment, please head over to the docs to report this issue! It contains steps to assist in debugging."
        );
        eprintln!(
            "\nhttps://github.com/innobotix/innobot/blob/v{}/README.md#report-an-issue",
            env!("CARGO_PKG_VERSION")
        );
        eprintln!("\nOtherwise, running the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

async fn start_chat() -> Result<()> {
    let ceiling = Config::get(ConfigKey::QuestionLimit).parse::<usize>()?;
    let reveal_interval =
        Duration::from_millis(Config::get(ConfigKey::RevealInterval).parse::<u64>()?);

    let session: SessionArc = Arc::new(Mutex::new(
        ChatSession::restore(session_storage(), ceiling, reveal_interval).await,
    ));
    let snapshot = session.lock().await.snapshot();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, event_rx) = mpsc::unbounded_channel::<Event>();

    let mut background_futures = task::JoinSet::new();
    let worker_session = session.clone();
    background_futures.spawn(async move {
        let gateway = GatewayName::parse(Config::get(ConfigKey::Gateway)).unwrap();
        return ActionsService::start(
            worker_session,
            GatewayManager::get(gateway).unwrap(),
            event_tx,
            &mut action_rx,
        )
        .await;
    });

    let ui_future = ui::start(snapshot, action_tx, event_rx);

    let res = tokio::select!(
        res = background_futures.join_next() => res.unwrap().unwrap(),
        res = ui_future => res,
    );

    if res.is_err() {
        ui::destruct_terminal_for_panic();
        return Err(res.unwrap_err());
    }

    return Ok(());
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        ui::destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let debug_log_dir = env::var("INNOBOT_LOG_DIR").unwrap_or_else(|_| {
        return dirs::cache_dir()
            .unwrap()
            .join("innobot")
            .to_string_lossy()
            .to_string();
    });

    let file_appender = tracing_appender::rolling::never(debug_log_dir, "debug.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    if env::var("RUST_LOG")
        .unwrap_or_else(|_| return "".to_string())
        .contains("innobot")
    {
        tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(writer)
            .init();
    }

    let ready_res = cli::parse().await;
    if let Err(ready_err) = ready_res {
        handle_error(ready_err);
        return;
    }
    if !ready_res.unwrap() {
        process::exit(0);
    }

    if let Err(err) = start_chat().await {
        handle_error(err);
    }

    process::exit(0);
}
