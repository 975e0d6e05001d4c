use std::{fs, path::Path};

use anyhow::{Result, bail};

use super::{
    CommandKind, CommandResult, CommandSummary, InitSummary,
    helper::{Counts, finish},
};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write a default `.trsyncrc.json` in the current directory.
pub fn init() -> Result<CommandResult> {
    let config_path = Path::new(CONFIG_FILE_NAME);
    if config_path.exists() {
        bail!("{} already exists", CONFIG_FILE_NAME);
    }

    fs::write(config_path, default_config_json()?)?;

    Ok(finish(
        CommandKind::Init,
        CommandSummary::Init(InitSummary { created: true }),
        Vec::new(),
        Counts {
            source_files: 0,
            locale_files: 0,
        },
        true,
    ))
}
