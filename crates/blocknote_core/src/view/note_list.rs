//! Headless list/search view model.
//!
//! # Responsibility
//! - Project the controller's note collection into filtered display rows.
//! - Translate row clicks into intents for the controller.
//!
//! # Invariants
//! - The only local state is the search query; persistence is never touched.
//! - Row order follows the controller's collection order.
//! - Deleting a row never also selects it.

use crate::model::note::{Note, NoteId, Timestamp, DEFAULT_NOTE_TITLE};
use crate::search::filter::NoteFilter;
use crate::view::format::{derive_preview, modified_label};
use crate::view::EmptyState;

/// Preview shown for notes without body text.
pub const EMPTY_PREVIEW: &str = "No content";

const EMPTY_LIST: EmptyState = EmptyState {
    headline: "No notes yet",
    hint: "Create your first note to get started",
};

/// User intent emitted by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListIntent {
    Create,
    Select(NoteId),
    Delete(NoteId),
}

/// One rendered list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub note_id: NoteId,
    pub emoji: String,
    pub title: String,
    pub preview: String,
    pub modified: String,
    pub is_selected: bool,
}

/// Rendered list pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListing {
    pub query: String,
    pub rows: Vec<NoteRow>,
    /// Present when no row survived filtering.
    pub empty_state: Option<EmptyState>,
}

/// List/search view state.
#[derive(Debug, Clone, Default)]
pub struct NoteListView {
    query: String,
}

impl NoteListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    /// Renders rows for `notes` at time `now`.
    pub fn render(&self, notes: &[Note], selected: Option<&str>, now: Timestamp) -> NoteListing {
        let filter = NoteFilter::new(&self.query);
        let rows: Vec<NoteRow> = notes
            .iter()
            .filter(|note| filter.matches(note))
            .map(|note| to_row(note, selected, now))
            .collect();
        let empty_state = rows.is_empty().then_some(EMPTY_LIST);

        NoteListing {
            query: self.query.clone(),
            rows,
            empty_state,
        }
    }

    pub fn click_row(&self, note_id: &str) -> ListIntent {
        ListIntent::Select(note_id.to_string())
    }

    pub fn click_delete(&self, note_id: &str) -> ListIntent {
        ListIntent::Delete(note_id.to_string())
    }

    pub fn click_create(&self) -> ListIntent {
        ListIntent::Create
    }
}

fn to_row(note: &Note, selected: Option<&str>, now: Timestamp) -> NoteRow {
    let title = if note.title.is_empty() {
        DEFAULT_NOTE_TITLE.to_string()
    } else {
        note.title.clone()
    };

    NoteRow {
        note_id: note.id.clone(),
        emoji: note.emoji.clone(),
        title,
        preview: derive_preview(note).unwrap_or_else(|| EMPTY_PREVIEW.to_string()),
        modified: modified_label(note.updated_at, now),
        is_selected: selected == Some(note.id.as_str()),
    }
}
