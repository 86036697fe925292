use quicknote_core::{preview_line, Note};

pub const EMPTY_PLACEHOLDER: &str = "No notes found.";

const PREVIEW_CHARS: usize = 60;

/// One list row: `<label>  <date>  <preview>`.
pub fn render_row(label: &str, note: &Note) -> String {
    format!(
        "{label:>4}  {:<6}  {}",
        note.display_date(),
        preview_line(note.text.as_str(), PREVIEW_CHARS)
    )
}

/// Rows keyed by note id, or the placeholder when there is nothing to show.
pub fn render_list(notes: &[Note]) -> Vec<String> {
    if notes.is_empty() {
        return vec![EMPTY_PLACEHOLDER.to_string()];
    }
    notes
        .iter()
        .map(|note| render_row(&format!("#{}", note.id), note))
        .collect()
}

/// Full detail view of one note.
pub fn render_detail(note: &Note) -> String {
    format!("#{} ({})\n{}", note.id, note.created_at, note.text)
}
