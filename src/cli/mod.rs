// ABOUTME: CLI argument parsing and command routing for shieldquote
//
// Provides command-line interface for:
// - Filling in a quote interactively (tui, default)
// - Inspecting the saved session (steps, analyze)
// - Listing promo codes (promos)
// - Discarding the saved session (reset)

pub mod promos;
pub mod session;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use shieldquote::config::AppConfig;
use shieldquote::wizard::{FileSessionStorage, QuoteStore};

/// Vehicle protection quote configurator
#[derive(Parser)]
#[command(name = "shieldquote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Config file (default: ~/.shieldquote/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Output format for commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (default if no command given)
    Tui,

    /// Print the step graph of the saved quote
    Steps,

    /// Print the promotions the saved quote qualifies for
    Analyze,

    /// List accepted promo codes
    Promos,

    /// Discard the saved quote
    Reset,
}

/// Load config from `--config` or the default location
pub fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Open the file-backed store named by the config
pub fn open_store(config: &AppConfig) -> Result<QuoteStore> {
    let path = config.storage.session_path()?;
    Ok(QuoteStore::open(Box::new(FileSessionStorage::new(path))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_defaults_to_tui() {
        let cli = Cli::parse_from(["shieldquote"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.format, OutputFormat::Text);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["shieldquote", "analyze", "--format", "json", "--config", "/tmp/q.toml"]);
        assert!(matches!(cli.command, Some(Commands::Analyze)));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/q.toml")));
    }
}
