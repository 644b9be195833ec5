//! Substring filter for the note list.
//!
//! # Invariants
//! - Matching is case-insensitive and computed from the live query; there is
//!   no index.
//! - An empty query matches every note. Whitespace is significant.
//! - A note matches when the query occurs in its title, its legacy
//!   `content`, or any block's content.

use crate::model::note::Note;

/// Lowercased query ready for repeated matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    needle: String,
}

impl NoteFilter {
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// Returns whether the filter lets every note through.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, note: &Note) -> bool {
        if self.needle.is_empty() {
            return true;
        }

        contains_folded(&note.title, &self.needle)
            || note
                .legacy_content
                .as_deref()
                .is_some_and(|content| contains_folded(content, &self.needle))
            || note
                .blocks
                .iter()
                .any(|block| contains_folded(&block.content, &self.needle))
    }
}

/// Returns whether `note` matches `query`.
pub fn note_matches(note: &Note, query: &str) -> bool {
    NoteFilter::new(query).matches(note)
}

/// Filters `notes` by `query`, preserving order.
pub fn filter_notes<'a>(notes: &'a [Note], query: &str) -> Vec<&'a Note> {
    let filter = NoteFilter::new(query);
    notes.iter().filter(|note| filter.matches(note)).collect()
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
