//! Dispatch a parsed command line to its command handler.

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, init::init, rewrite::rewrite, scan::scan,
        suggest::suggest_keys, sync::sync, translate::translate,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Scan(cmd)) => scan(cmd),
        Some(Command::SuggestKeys(cmd)) => suggest_keys(cmd),
        Some(Command::Rewrite(cmd)) => rewrite(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Translate(cmd)) => translate(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
