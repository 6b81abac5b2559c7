//! CLI module for streamchat.
//!
//! Flags that only print something are handled here; a chat run is handed
//! back to the binary.
//!
//! ```ignore
//! use streamchat::cli::{parse_args, run_cli_command, CliCommand};
//!
//! let command = parse_args(std::env::args());
//! if let Some(result) = run_cli_command(&command) {
//!     return result;
//! }
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, ChatArgs, CliCommand};
pub use version::{version_line, VERSION};

use color_eyre::eyre::eyre;
use color_eyre::Result;

/// Usage text for `--help`.
pub fn usage() -> String {
    format!(
        "{}
Stream chat replies from an agent backend.

USAGE:
    streamchat [OPTIONS]

OPTIONS:
    -m, --message <TEXT>     Send one message, print the reply and exit
        --base-url <URL>     Backend base URL (default http://localhost:8000)
        --config <PATH>      Config file (default ~/.streamchat/config.json)
        --log-level <LEVEL>  Log filter written to stderr (default warn)
    -V, --version            Print version
    -h, --help               Print this help

Without --message, lines read from stdin are sent one at a time.
Type /quit or send EOF to exit.",
        version_line()
    )
}

/// Run a CLI command if applicable.
///
/// # Returns
///
/// * `None` - for `Chat`, which the caller runs
/// * `Some(Ok(()))` - the command printed its output
/// * `Some(Err(e))` - the arguments were invalid
pub fn run_cli_command(command: &CliCommand) -> Option<Result<()>> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Some(Ok(()))
        }
        CliCommand::Help => {
            println!("{}", usage());
            Some(Ok(()))
        }
        CliCommand::Invalid(reason) => Some(Err(eyre!("{}\n\n{}", reason, usage()))),
        CliCommand::Chat(_) => None,
    }
}
