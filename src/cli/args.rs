//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `scan`: Report literals that still need a translation key
//! - `suggest-keys`: Add keys for those literals to the reference locale
//! - `rewrite`: Replace literals that have a key with key references
//! - `check`: Cross-locale completeness report
//! - `sync`: suggest-keys, rewrite and check in one run
//! - `translate`: Fill missing locale values through machine translation
//! - `init`: Write a default `.trsyncrc.json`

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        self.common().is_some_and(|c| c.verbose)
    }

    pub fn common(&self) -> Option<&CommonArgs> {
        match &self.command {
            Some(Command::Scan(cmd)) => Some(&cmd.common),
            Some(Command::SuggestKeys(cmd)) => Some(&cmd.common),
            Some(Command::Rewrite(cmd)) => Some(&cmd.common),
            Some(Command::Check(cmd)) => Some(&cmd.common),
            Some(Command::Sync(cmd)) => Some(&cmd.common),
            Some(Command::Translate(cmd)) => Some(&cmd.common),
            Some(Command::Init) | None => None,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Source code root directory (overrides config file)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Translation resources directory (overrides config file)
    #[arg(long)]
    pub resources_root: Option<PathBuf>,

    /// Reference locale (overrides config file)
    #[arg(long)]
    pub reference_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ScanCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SuggestKeysCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show the keys that would be added without writing the reference locale
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct RewriteCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show the replacements without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Only rewrite this file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Show what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct TranslateCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Locales to fill (default: every non-reference locale).
    /// Can be specified multiple times: --locale de --locale fr
    #[arg(long = "locale", value_name = "LOCALE")]
    pub locales: Vec<String>,

    /// Show the keys that would be filled without calling the provider
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Report user-facing literals that are not localized yet
    Scan(ScanCommand),
    /// Add keys for unlocalized literals to the reference locale
    SuggestKeys(SuggestKeysCommand),
    /// Replace literals that have a key with key references
    Rewrite(RewriteCommand),
    /// Check that every locale has the same keys as the reference locale
    Check(CheckCommand),
    /// Run suggest-keys, rewrite and check in one go
    Sync(SyncCommand),
    /// Fill missing locale values through machine translation
    Translate(TranslateCommand),
    /// Initialize a new .trsyncrc.json configuration file
    Init,
}
