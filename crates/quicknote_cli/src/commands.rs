use crate::cli::Command;
use crate::render::{render_detail, render_list};
use crate::shell::run_shell;
use log::info;
use quicknote_core::{core_version, ping, NoteServiceError, NoteStore, ViewError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

#[derive(Debug)]
pub enum CliError {
    Service(NoteServiceError),
    View(ViewError),
    Io(io::Error),
    Json(serde_json::Error),
}

impl CliError {
    /// Text shown to the user on stderr.
    pub fn user_message(&self) -> String {
        match self {
            Self::Service(err) => err.user_message(),
            Self::View(ViewError::Service(err)) => err.user_message(),
            Self::View(err) => err.to_string(),
            Self::Io(err) => format!("I/O error: {err}"),
            Self::Json(err) => format!("failed to encode notes: {err}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::View(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            Self::View(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<NoteServiceError> for CliError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

impl From<ViewError> for CliError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Executes one subcommand against `store`, writing user output to `out`.
pub fn run(
    store: &NoteStore,
    command: Command,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    info!(
        "event=cli_command module=cli status=start command={}",
        command_name(&command)
    );
    match command {
        Command::Add { text } => {
            let id = store.create(&text)?;
            writeln!(out, "Created note #{id}")?;
        }
        Command::Show { id } => {
            let note = store.get_by_id(id)?;
            writeln!(out, "{}", render_detail(&note))?;
        }
        Command::List { json } => {
            let notes = store.list_all()?;
            if json {
                serde_json::to_writer_pretty(&mut *out, &notes)?;
                writeln!(out)?;
            } else {
                for line in render_list(&notes) {
                    writeln!(out, "{line}")?;
                }
            }
        }
        Command::Count => {
            writeln!(out, "{}", store.count()?)?;
        }
        Command::Edit { id, text } => {
            if store.update(id, &text)? == 0 {
                return Err(NoteServiceError::NotFound(id).into());
            }
            writeln!(out, "Updated note #{id}")?;
        }
        Command::Rm { id } => {
            store.delete(id)?;
            writeln!(out, "Deleted note #{id}")?;
        }
        Command::Shell => run_shell(store, input, out)?,
        Command::Version => {
            writeln!(out, "quicknote_core ping={}", ping())?;
            writeln!(out, "quicknote_core version={}", core_version())?;
        }
    }
    Ok(())
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::Add { .. } => "add",
        Command::Show { .. } => "show",
        Command::List { .. } => "list",
        Command::Count => "count",
        Command::Edit { .. } => "edit",
        Command::Rm { .. } => "rm",
        Command::Shell => "shell",
        Command::Version => "version",
    }
}
