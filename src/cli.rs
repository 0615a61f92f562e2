//! CLI - Command Line Interface for DramaShorts
//!
//! Scriptable views over the catalogue plus a one-shot character chat.
//! All output is JSON-parseable with `--json`.
//!
//! # Examples
//!
//! ```bash
//! # List the premium episodes
//! dramashorts episodes --locked
//!
//! # Ask the character something
//! dramashorts chat "Quem é seu pai?" --json
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::config::Config;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Config file unreadable or invalid
    ConfigError = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// DramaShorts - short vertical drama in your terminal
///
/// Run without arguments to launch interactive TUI.
/// Use subcommands for scriptable automation.
#[derive(Parser, Debug)]
#[command(
    name = "dramashorts",
    version,
    author = "Gorka & Hermes",
    about = "Short-form drama streaming in the terminal",
    long_about = "Watch a serialized short drama, unlock premium episodes with \
                  coins and chat with a character played by Gemini.\n\n\
                  Run without arguments to launch the interactive TUI.\n\
                  Use subcommands for automation and scripting.",
    after_help = "EXAMPLES:\n\
                  dramashorts                         Launch interactive TUI\n\
                  dramashorts episodes --locked       List premium episodes\n\
                  dramashorts chat \"Oi Sofia\"         Talk to the character\n\
                  dramashorts info --json             Series details as JSON"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Starting coin balance (overrides config)
    #[arg(long, global = true)]
    pub coins: Option<u32>,

    /// Never start playback without a keypress
    #[arg(long, global = true)]
    pub no_autoplay: bool,

    /// Subcommand to run (omit for TUI mode)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Check if running in CLI mode (has subcommand)
    pub fn is_cli_mode(&self) -> bool {
        self.command.is_some()
    }

    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }

    /// Fold command-line overrides into the loaded config
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(coins) = self.coins {
            config.starting_coins = Some(coins);
        }
        if self.no_autoplay {
            config.autoplay = Some(false);
        }
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the episode catalogue
    #[command(visible_alias = "ep")]
    Episodes(EpisodesCmd),

    /// Show series details
    #[command(visible_alias = "i")]
    Info(InfoCmd),

    /// List coin packages
    #[command(visible_alias = "p")]
    Packages(PackagesCmd),

    /// Send one message to the character
    #[command(visible_alias = "c")]
    Chat(ChatCmd),
}

// =============================================================================
// Episodes Command
// =============================================================================

/// List episodes
#[derive(Args, Debug)]
pub struct EpisodesCmd {
    /// Only premium (locked) episodes
    #[arg(long, conflicts_with = "free")]
    pub locked: bool,

    /// Only free episodes
    #[arg(long)]
    pub free: bool,
}

impl EpisodesCmd {
    /// Lock filter: Some(true) for locked only, Some(false) for free only
    pub fn lock_filter(&self) -> Option<bool> {
        match (self.locked, self.free) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

/// Show series details
#[derive(Args, Debug)]
pub struct InfoCmd {
    /// Include seed comments
    #[arg(long)]
    pub comments: bool,
}

/// List coin packages
#[derive(Args, Debug)]
pub struct PackagesCmd {}

// =============================================================================
// Chat Command
// =============================================================================

/// One-shot chat
#[derive(Args, Debug)]
pub struct ChatCmd {
    /// Message for the character
    pub message: String,

    /// Character to talk to (overrides config)
    #[arg(long)]
    pub character: Option<String>,
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// JSON envelope for every command result
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            success: false,
            data: None,
            error: Some(msg.into()),
            code: Some(code.into()),
        }
    }
}

/// Chat command response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub character: String,
    pub message: String,
    pub reply: String,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data as the JSON envelope, or as `text` for humans
    pub fn print<T: Serialize>(&self, data: T, text: impl FnOnce() -> String) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Validation
// =============================================================================

/// Reject empty or whitespace-only chat messages
pub fn validate_message(message: &str) -> Result<&str, &'static str> {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        Err("Message must not be empty")
    } else {
        Ok(trimmed)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_args_is_tui_mode() {
        let cli = Cli::parse_from(["dramashorts"]);
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_episodes_filters() {
        let cli = Cli::parse_from(["dramashorts", "episodes", "--locked"]);
        match cli.command {
            Some(Command::Episodes(cmd)) => assert_eq!(cmd.lock_filter(), Some(true)),
            _ => panic!("Expected Episodes command"),
        }

        let cli = Cli::parse_from(["dramashorts", "ep", "--free"]);
        match cli.command {
            Some(Command::Episodes(cmd)) => assert_eq!(cmd.lock_filter(), Some(false)),
            _ => panic!("Expected Episodes command"),
        }
    }

    #[test]
    fn test_locked_and_free_conflict() {
        let result = Cli::try_parse_from(["dramashorts", "episodes", "--locked", "--free"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from(["dramashorts", "--coins", "10", "--no-autoplay"]);
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.starting_coins, Some(10));
        assert_eq!(config.autoplay, Some(false));
    }

    #[test]
    fn test_validate_message() {
        assert_eq!(validate_message("  oi  "), Ok("oi"));
        assert!(validate_message("").is_err());
        assert!(validate_message(" \t ").is_err());
    }

    #[test]
    fn test_json_envelope() {
        let ok = serde_json::to_value(JsonOutput::success(vec![1, 2])).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["data"], serde_json::json!([1, 2]));
        assert!(ok.get("error").is_none());
        assert!(ok.get("code").is_none());

        let err = serde_json::to_value(JsonOutput::<()>::error_msg("boom", ExitCode::InvalidArgs))
            .unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "boom");
        assert_eq!(err["code"], 2);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::InvalidArgs), 2);
        assert_eq!(i32::from(ExitCode::ConfigError), 4);
    }
}
