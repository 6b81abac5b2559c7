//! Command-line argument parsing for the streamchat binary.

use std::path::PathBuf;

/// Options for a chat run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatArgs {
    /// Send this one message and exit; `None` runs the interactive loop
    pub message: Option<String>,
    pub base_url: Option<String>,
    /// Config file to load instead of the default location
    pub config_path: Option<PathBuf>,
    /// Log filter directive, e.g. `debug` or `streamchat=trace`
    pub log_level: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Chat with the backend (default)
    Chat(ChatArgs),
    /// Unusable arguments, with the reason
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// `--version` and `--help` win over everything else on the line.
///
/// # Examples
///
/// ```
/// use streamchat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["streamchat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut chat = ChatArgs::default();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--message" | "-m" => &mut chat.message,
            "--base-url" => &mut chat.base_url,
            "--log-level" => &mut chat.log_level,
            "--config" => {
                match args.next() {
                    Some(path) => chat.config_path = Some(PathBuf::from(path)),
                    None => return missing_value(&arg),
                }
                continue;
            }
            other => return CliCommand::Invalid(format!("unknown argument '{}'", other)),
        };

        match args.next() {
            Some(value) => *slot = Some(value),
            None => return missing_value(&arg),
        }
    }

    CliCommand::Chat(chat)
}

fn missing_value(flag: &str) -> CliCommand {
    CliCommand::Invalid(format!("{} requires a value", flag))
}
