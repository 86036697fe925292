//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted note record shared by storage and presentation.
//! - Own text validation and display helpers used by list renderers.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused after deletion.
//! - `created_at` is assigned by storage at insert and never rewritten.
//! - Stored text is kept byte-for-byte; validation never normalizes it.

use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned note identifier (`notes.id`).
pub type NoteId = i64;

/// Layout of `notes.timestamp`, e.g. `2018-02-21 00:15:42`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DISPLAY_DATE_FORMAT: &str = "%b %-d";

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Auto-increment primary key.
    pub id: NoteId,
    /// Note body as entered by the user.
    pub text: String,
    /// Insert time, `YYYY-MM-DD HH:MM:SS` in UTC.
    pub created_at: String,
}

impl Note {
    /// Parses `created_at` using [`TIMESTAMP_FORMAT`].
    pub fn created_at_datetime(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.created_at.as_str(), TIMESTAMP_FORMAT).ok()
    }

    /// Short list-row date such as `Feb 21`.
    ///
    /// Returns an empty string when the stored timestamp is malformed so a
    /// single bad row never breaks list rendering.
    pub fn display_date(&self) -> String {
        self.created_at_datetime()
            .map(|value| value.format(DISPLAY_DATE_FORMAT).to_string())
            .unwrap_or_default()
    }
}

/// Validation failures for note input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// Text is the empty string.
    EmptyText,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text must not be empty"),
        }
    }
}

impl Error for NoteValidationError {}

/// Rejects the empty string. Whitespace-only text is a valid note.
pub fn validate_note_text(text: &str) -> Result<(), NoteValidationError> {
    if text.is_empty() {
        return Err(NoteValidationError::EmptyText);
    }
    Ok(())
}

/// Collapses note text into one display line of at most `max_chars` chars.
///
/// Truncated output ends with `...`.
pub fn preview_line(text: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ");
    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }
    let mut truncated = collapsed.chars().take(max_chars).collect::<String>();
    truncated.push_str("...");
    truncated
}
