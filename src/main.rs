use std::io::Write;
use std::process::ExitCode;

use color_eyre::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use streamchat::cli::{parse_args, run_cli_command, ChatArgs, CliCommand};
use streamchat::client::ChatClient;
use streamchat::config::ClientConfig;
use streamchat::error::ChatError;
use streamchat::session::ChatSession;
use streamchat::sse::SemanticDelta;
use streamchat::traits::StreamObserver;

const DEFAULT_LOG_LEVEL: &str = "warn";
const QUIT_COMMAND: &str = "/quit";

/// Logs go to stderr so they never interleave with streamed reply text.
fn setup_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Config file, then environment, then command-line flags.
fn resolve_config(args: &ChatArgs) -> Result<ClientConfig> {
    let config = match &args.config_path {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_default()?,
    };
    let mut config = config.apply_env()?;
    if let Some(url) = &args.base_url {
        config = config.with_base_url(url.clone());
    }
    Ok(config)
}

/// What the console shows for a failed send.
///
/// Transport failures read like the system message the session records.
fn failure_report(error: &ChatError) -> String {
    let headline = match error.as_network() {
        Some(_) => format!("Error: {}", error),
        None => error.user_message(),
    };
    format!("{}\n{}", headline, error.recovery_hint())
}

fn exit_code(outcome: &Result<(), ChatError>) -> ExitCode {
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

fn write_reply_text(out: &mut impl Write, text: &str) -> std::io::Result<()> {
    out.write_all(text.as_bytes())?;
    out.flush()
}

/// Prints the reply as it streams while folding it into the session.
struct ConsoleObserver<'a> {
    session: &'a mut ChatSession,
}

impl StreamObserver for ConsoleObserver<'_> {
    fn on_delta(&mut self, delta: SemanticDelta) {
        if let Some(text) = delta.text() {
            if let Err(e) = write_reply_text(&mut std::io::stdout(), text) {
                tracing::debug!(error = %e, "failed to write reply text");
            }
        }
        self.session.on_delta(delta);
    }

    fn on_error(&mut self, error: &ChatError) {
        println!();
        self.session.on_error(error);
    }

    fn on_stream_end(&mut self) {
        println!();
        self.session.on_stream_end();
    }
}

/// Send one message, printing the reply or the failure.
async fn send_and_print(
    client: &ChatClient,
    session: &mut ChatSession,
    text: &str,
) -> Result<(), ChatError> {
    let outcome = match session.begin_send(text) {
        Ok(()) => {
            let mut observer = ConsoleObserver { session };
            client.send_with_observer(text, &mut observer).await
        }
        Err(e) => Err(e),
    };
    if let Err(e) = &outcome {
        eprintln!("{}", failure_report(e));
    }
    outcome
}

async fn run_interactive(client: &ChatClient) -> Result<ExitCode> {
    let mut session = ChatSession::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    eprintln!(
        "Connected to {}. Type {} to exit.",
        client.config().run_url(),
        QUIT_COMMAND
    );

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text == QUIT_COMMAND {
            break;
        }
        if text.is_empty() {
            continue;
        }

        // Failures are already reported and the session stays usable.
        let _ = send_and_print(client, &mut session, text).await;
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_chat(args: ChatArgs) -> Result<ExitCode> {
    let config = resolve_config(&args)?;
    tracing::debug!(url = %config.run_url(), "starting chat");
    let client = ChatClient::new(config)?;

    match args.message {
        Some(message) => {
            let mut session = ChatSession::new();
            let outcome = send_and_print(&client, &mut session, &message).await;
            Ok(exit_code(&outcome))
        }
        None => run_interactive(&client).await,
    }
}

fn main() -> Result<ExitCode> {
    let command = parse_args(std::env::args());
    if let Some(result) = run_cli_command(&command) {
        return result.map(|()| ExitCode::SUCCESS);
    }
    let CliCommand::Chat(args) = command else {
        return Ok(ExitCode::SUCCESS);
    };

    color_eyre::install()?;
    setup_logging(args.log_level.as_deref());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_chat(args))
}
