use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use log::info;
use services::{ConfigError, OpenTdbQuestionBank, QuizConfig, QuizRunner};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidNumber { flag: &'static str, raw: String },
    InvalidConfig(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
            ArgsError::InvalidConfig(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn require_number<T: std::str::FromStr>(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<T, ArgsError> {
    let raw = require_value(args, flag)?;
    raw.trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw })
}

struct DesktopApp {
    runner: QuizRunner,
}

impl UiApp for DesktopApp {
    fn quiz_runner(&self) -> QuizRunner {
        self.runner.clone()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--count <n>] [--duration <secs>] [--bank-url <url>] [--fetch-timeout <secs>]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --count 15");
    eprintln!("  --duration 1800");
    eprintln!("  --bank-url {}", services::OPENTDB_URL);
    eprintln!("  --fetch-timeout none (wait for the bank indefinitely)");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_QUESTION_COUNT, QUIZ_DURATION_SECS, QUIZ_BANK_URL, QUIZ_FETCH_TIMEOUT_SECS");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(QuizConfig),
    Help,
}

/// Apply command-line flags on top of `config`, then validate the result.
fn parse_args(
    mut config: QuizConfig,
    args: impl IntoIterator<Item = String>,
) -> Result<Command, ArgsError> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--count" => config.question_count = require_number(&mut args, "--count")?,
            "--duration" => config.duration_secs = require_number(&mut args, "--duration")?,
            "--bank-url" => config.bank_url = require_value(&mut args, "--bank-url")?,
            "--fetch-timeout" => {
                let secs: u64 = require_number(&mut args, "--fetch-timeout")?;
                config.fetch_timeout = (secs > 0).then(|| Duration::from_secs(secs));
            }
            "--help" | "-h" => return Ok(Command::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }

    config.validate().map_err(ArgsError::InvalidConfig)?;
    Ok(Command::Run(config))
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = match parse_args(QuizConfig::from_env(), std::env::args().skip(1)) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };

    info!(
        "quiz: {} questions from {}, {}s limit",
        config.question_count, config.bank_url, config.duration_secs
    );

    let bank = Arc::new(OpenTdbQuestionBank::from_config(&config));
    let runner = QuizRunner::new(bank, config);
    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { runner });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    let _ = dotenvy::dotenv();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
