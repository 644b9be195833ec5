//! Headless view models for the editor and list panes.
//!
//! # Responsibility
//! - Hold per-view local state (editor copies, search query).
//! - Produce plain render trees and intents; rendering itself is up to the
//!   embedding UI.
//!
//! # Invariants
//! - Views never call the storage adapter; all writes go through
//!   `app::controller::NotesController`.

pub mod editor;
pub mod format;
pub mod note_list;

/// Placeholder shown when a pane has nothing to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub headline: &'static str,
    pub hint: &'static str,
}
