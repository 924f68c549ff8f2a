use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::GatewayName;
use crate::domain::models::Storage;
use crate::domain::models::ASKED_COUNT_KEY;
use crate::domain::models::CONVERSATION_KEY;
use crate::domain::services::actions::help_text;
use crate::infrastructure::storage::DiskStorage;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if !config_file_path.parent().unwrap().exists() {
        fs::create_dir_all(config_file_path.parent().unwrap()).await?;
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    let config_path_display = config_file_path.as_os_str().to_str().unwrap();
    println!("Created default config file at {config_path_display}");
    return Ok(());
}

async fn clear_session() -> Result<()> {
    let storage = DiskStorage::default();
    storage.remove(CONVERSATION_KEY).await?;
    storage.remove(ASKED_COUNT_KEY).await?;

    println!("Cleared the saved conversation and restored the question quota.");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_session() -> Command {
    return Command::new("session")
        .about("Manage the saved chat session.")
        .arg_required_else_help(true)
        .subcommand(Command::new("dir").about("Print the session storage directory path."))
        .subcommand(
            Command::new("clear")
                .about("Clear the saved conversation and restore the free question quota."),
        );
}

fn arg_gateway() -> Arg {
    return Arg::new(ConfigKey::Gateway.to_string())
        .short('g')
        .long(ConfigKey::Gateway.to_string())
        .env("INNOBOT_GATEWAY")
        .num_args(1)
        .help(format!(
            "The answer gateway to connect to. [default: {}]",
            Config::default(ConfigKey::Gateway)
        ))
        .value_parser(PossibleValuesParser::new(GatewayName::VARIANTS));
}

fn arg_model() -> Arg {
    return Arg::new(ConfigKey::Model.to_string())
        .short('m')
        .long(ConfigKey::Model.to_string())
        .env("INNOBOT_MODEL")
        .num_args(1)
        .help(format!(
            "The Gemini model asked for answers. [default: {}]",
            Config::default(ConfigKey::Model)
        ));
}

fn arg_question_limit() -> Arg {
    return Arg::new(ConfigKey::QuestionLimit.to_string())
        .short('q')
        .long(ConfigKey::QuestionLimit.to_string())
        .env("INNOBOT_QUESTION_LIMIT")
        .num_args(1)
        .help(format!(
            "How many questions a session may ask before the limit is reached. [default: {}]",
            Config::default(ConfigKey::QuestionLimit)
        ));
}

fn arg_reveal_interval() -> Arg {
    return Arg::new(ConfigKey::RevealInterval.to_string())
        .long(ConfigKey::RevealInterval.to_string())
        .env("INNOBOT_REVEAL_INTERVAL")
        .num_args(1)
        .help(format!(
            "Milliseconds between typewriter steps when revealing an answer. [default: {}]",
            Config::default(ConfigKey::RevealInterval)
        ));
}

fn arg_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::HealthCheckTimeout.to_string())
        .long(ConfigKey::HealthCheckTimeout.to_string())
        .env("INNOBOT_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when doing a gateway healthcheck. [default: {}]",
            Config::default(ConfigKey::HealthCheckTimeout)
        ));
}

fn arg_username() -> Arg {
    return Arg::new(ConfigKey::Username.to_string())
        .short('u')
        .long(ConfigKey::Username.to_string())
        .env("INNOBOT_USERNAME")
        .num_args(1)
        .help(format!(
            "Your name as shown on chat bubbles. [default: {}]",
            Config::default(ConfigKey::Username)
        ));
}

fn arg_ephemeral() -> Arg {
    return Arg::new(ConfigKey::Ephemeral.to_string())
        .long(ConfigKey::Ephemeral.to_string())
        .env("INNOBOT_EPHEMERAL")
        .num_args(0..=1)
        .default_missing_value("true")
        .value_parser(PossibleValuesParser::new(["true", "false"]))
        .help("Keep the session in memory only, leaving nothing on disk.");
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") || line.starts_with("HOTKEYS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("innobot")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_session())
        .arg(arg_gateway())
        .arg(arg_model())
        .arg(arg_question_limit())
        .arg(arg_reveal_interval())
        .arg(arg_health_check_timeout())
        .arg(arg_username())
        .arg(arg_ephemeral())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("INNOBOT_CONFIG_FILE")
                .num_args(1)
                .help(format!(
                    "Path to configuration file [default: {}]",
                    Config::default(ConfigKey::ConfigFile)
                ))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::SessionDir.to_string())
                .long(ConfigKey::SessionDir.to_string())
                .env("INNOBOT_SESSION_DIR")
                .num_args(1)
                .help("Directory where the conversation and question count are saved. Defaults to the user cache directory.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::GeminiURL.to_string())
                .long(ConfigKey::GeminiURL.to_string())
                .env("INNOBOT_GEMINI_URL")
                .num_args(1)
                .help(format!(
                    "Gemini API URL when using the gemini gateway. [default: {}]",
                    Config::default(ConfigKey::GeminiURL)
                )),
        )
        .arg(
            Arg::new(ConfigKey::GeminiToken.to_string())
                .long(ConfigKey::GeminiToken.to_string())
                .env("INNOBOT_GEMINI_TOKEN")
                .num_args(1)
                .help("Gemini API key when using the gemini gateway."),
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("session", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("dir", dir_matches)) => {
                Config::load(build(), vec![&matches, dir_matches]).await?;
                let dir = DiskStorage::default().dir().to_string_lossy().to_string();
                println!("{dir}");
                return Ok(false);
            }
            Some(("clear", clear_matches)) => {
                Config::load(build(), vec![&matches, clear_matches]).await?;
                clear_session().await?;
                return Ok(false);
            }
            _ => {
                subcommand_session().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
