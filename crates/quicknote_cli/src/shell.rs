//! Interactive single-screen notes list.
//!
//! Rows are addressed by their 1-based position on screen, mirroring the
//! long-press edit/delete flow of the mobile list.

use crate::commands::CliError;
use crate::render::{render_row, EMPTY_PLACEHOLDER};
use quicknote_core::{NoteListView, NoteServiceError, NoteStore, ViewError};
use std::io::{BufRead, Write};

const HELP: &str = "commands: ls | add <text> | edit <n> <text> | rm <n> | help | quit";

#[derive(Debug, PartialEq, Eq)]
enum ShellAction<'a> {
    List,
    Add(&'a str),
    Edit(usize, &'a str),
    Remove(usize),
    Help,
    Quit,
    Unknown(&'a str),
}

fn parse_line(line: &str) -> ShellAction<'_> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match verb {
        "ls" | "list" | "" => ShellAction::List,
        "add" => ShellAction::Add(rest),
        "edit" => {
            let (position, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            match parse_position(position) {
                Some(position) => ShellAction::Edit(position, text.trim()),
                None => ShellAction::Unknown(line),
            }
        }
        "rm" | "delete" => match parse_position(rest) {
            Some(position) => ShellAction::Remove(position),
            None => ShellAction::Unknown(line),
        },
        "help" | "?" => ShellAction::Help,
        "quit" | "exit" | "q" => ShellAction::Quit,
        _ => ShellAction::Unknown(line),
    }
}

// Screen positions are 1-based; the view is 0-based.
fn parse_position(value: &str) -> Option<usize> {
    value.parse::<usize>().ok()?.checked_sub(1)
}

/// Runs the list screen until `quit` or end of input.
pub fn run_shell(
    store: &NoteStore,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut view = NoteListView::load(store)?;
    draw(store, &view, out)?;

    for line in input.lines() {
        let line = line?;
        let outcome = match parse_line(&line) {
            ShellAction::List => view.reload(store),
            ShellAction::Add(text) => view.create(store, text).map(|_| ()),
            ShellAction::Edit(position, text) => {
                view.update_at(store, position, text).map(|_| ())
            }
            ShellAction::Remove(position) => view.delete_at(store, position).map(|_| ()),
            ShellAction::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            ShellAction::Quit => break,
            ShellAction::Unknown(raw) => {
                writeln!(out, "unknown command `{raw}`; {HELP}")?;
                continue;
            }
        };

        match outcome {
            Ok(()) => draw(store, &view, out)?,
            // Input and position problems are transient notices; storage
            // failures end the session.
            Err(ViewError::Service(err @ NoteServiceError::Storage(_))) => {
                return Err(CliError::Service(err));
            }
            Err(err) => writeln!(out, "! {}", CliError::View(err).user_message())?,
        }
    }
    Ok(())
}

fn draw(store: &NoteStore, view: &NoteListView, out: &mut impl Write) -> Result<(), CliError> {
    if view.is_empty_placeholder_visible(store)? {
        writeln!(out, "{EMPTY_PLACEHOLDER}")?;
        return Ok(());
    }
    for (index, note) in view.notes().iter().enumerate() {
        writeln!(out, "{}", render_row(&format!("{}.", index + 1), note))?;
    }
    Ok(())
}
