//! Command-line interface for craftops.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::config::TransportKind;

/// The operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Run one local shell command and print its captured output.
    Exec(Vec<String>),
    /// Send one command to the remote console.
    Send(Vec<String>),
    /// Run a backup+verify cycle.
    Backup,
    /// Prune backups past the retention window.
    Prune,
}

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Selected operation, if any.
    pub command: Option<CliCommand>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Remote console transport override.
    pub transport: Option<TransportKind>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Print composed commands without executing them.
    pub dry_run: bool,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('t') | Long("transport") => {
                let value: String = parser.value()?.parse()?;
                result.transport = Some(
                    value
                        .parse()
                        .map_err(|_| ArgsError::InvalidValue("transport", value))?,
                );
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Short('n') | Long("dry-run") => {
                result.dry_run = true;
            }
            Value(val) if result.command.is_none() => {
                let name = val.to_string_lossy().into_owned();
                match name.as_str() {
                    "exec" => {
                        result.command = Some(CliCommand::Exec(trailing_words(&mut parser)?));
                    }
                    "send" => {
                        result.command = Some(CliCommand::Send(trailing_words(&mut parser)?));
                    }
                    "backup" => {
                        result.command = Some(CliCommand::Backup);
                    }
                    "prune" => {
                        result.command = Some(CliCommand::Prune);
                    }
                    _ => return Err(ArgsError::UnknownCommand(name)),
                }
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    if let Some(CliCommand::Exec(words) | CliCommand::Send(words)) = &result.command {
        if words.is_empty() && !result.help && !result.version {
            return Err(ArgsError::MissingCommandWords);
        }
    }

    Ok(result)
}

/// Consume the rest of the command line verbatim as command words.
///
/// Everything after `exec`/`send` belongs to the command being relayed, so
/// dashed words like `ls -la` must not be parsed as craftops flags.
fn trailing_words(parser: &mut lexopt::Parser) -> Result<Vec<String>, ArgsError> {
    let mut words = Vec::new();
    for raw in parser.raw_args()? {
        words.push(raw.to_string_lossy().into_owned());
    }
    Ok(words)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"craftops {version}
Game-server operations: remote console commands and offsite B2 backups

USAGE:
    craftops [OPTIONS] <COMMAND>

COMMANDS:
    exec <command...>    Run a local shell command, print captured output
    send <command...>    Send a command to the game server console
    backup               Back up the configured directory to B2, then verify
    prune                Delete backups past the retention window

OPTIONS:
    -c, --config <FILE>       Path to configuration file (JSON)
    -t, --transport <KIND>    Remote console transport: rcon or panel
    -l, --log-level <LVL>     Log level (error, warn, info, debug, trace)
    -n, --dry-run             Print composed backup commands without running
    -h, --help                Print help
    -V, --version             Print version

ENVIRONMENT VARIABLES:
    RCON_HOST, RCON_PORT, RCON_PASSWORD
                            RCON session settings
    PTERODACTYL_BASE_URL, PTERODACTYL_SERVER_IDENTIFIER, PTERODACTYL_TOKEN
                            Control-panel API settings
    B2_KEY_ID, B2_APPLICATION_KEY, B2_BUCKET_NAME, DIR_TO_BACKUP
                            Backup settings
    CRAFTOPS_TRANSPORT      Transport selection (overrides config file)
    CRAFTOPS_LOG_LEVEL      Log level (overrides config file)
    RUST_LOG                Alternative log level setting

EXAMPLES:
    # Announce a restart over RCON
    craftops send say restarting in 5 minutes

    # Same command through the control-panel API
    craftops -t panel send say restarting in 5 minutes

    # Nightly backup cycle
    craftops backup

    # See what backup would run, secrets redacted
    craftops backup --dry-run
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("craftops {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unknown subcommand.
    UnknownCommand(String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
    /// `exec`/`send` given without a command to run.
    MissingCommandWords,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnknownCommand(name) => {
                write!(f, "unknown command: '{}'", name)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
            Self::MissingCommandWords => {
                write!(f, "expected a command to run, e.g. 'craftops send list'")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
