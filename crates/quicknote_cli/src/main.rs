//! Terminal front end for QuickNote.
//!
//! # Responsibility
//! - Map subcommands onto the note store operations.
//! - Report validation problems as short notices and storage failures loudly.

use crate::cli::CliConfig;
use clap::Parser;
use quicknote_core::{init_logging, NoteStore};
use std::io;
use std::path::Path;
use std::process::ExitCode;

mod cli;
mod commands;
mod render;
mod shell;

fn main() -> ExitCode {
    let cli_config = CliConfig::parse();

    if let Some(log_dir) = cli_config.log_dir.as_deref() {
        if let Err(err) = start_logging(cli_config.log_level.as_str(), log_dir) {
            eprintln!("warning: logging disabled: {err}");
        }
    }

    let store = NoteStore::new(cli_config.store_config());
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    match commands::run(&store, cli_config.command, stdin.lock(), &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=cli_command module=cli status=error error={err}");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

fn start_logging(level: &str, log_dir: &Path) -> Result<(), String> {
    let absolute = std::path::absolute(log_dir).map_err(|err| err.to_string())?;
    let dir = absolute
        .to_str()
        .ok_or_else(|| format!("log dir `{}` is not valid UTF-8", absolute.display()))?;
    init_logging(level, dir).map_err(|err| err.to_string())
}
